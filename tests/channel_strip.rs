// SPDX-License-Identifier: LGPL-3.0-or-later

//! End-to-end scenarios chaining the processors the way a channel
//! strip would: equalizer into compressor into delay, in mono, stereo
//! and mid/side configurations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use strip_dsp::channel::StereoChannel;
use strip_dsp::dynamics::compressor::{Compressor, MsCompressor};
use strip_dsp::filters::coeffs::FilterType;
use strip_dsp::filters::equalizer::Equalizer;
use strip_dsp::units::db_to_gain;
use strip_dsp::util::delay::StereoDelay;
use strip_dsp::waveshape::{ClipType, Clipper, SaturationCurve, Saturator};

fn seeded_noise(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

#[test]
fn lowpass_band_impulse_response_is_critically_damped() {
    // Classic two-pole lowpass: 44.1 kHz, 1 kHz, Q = 0.707, 0 dB
    let mut eq = Equalizer::new(44100.0);
    eq.add_band(1000.0, 0.707, 0.0, FilterType::Lowpass);

    let mut response = Vec::new();
    for n in 0..1024 {
        let x = if n == 0 { 1.0 } else { 0.0 };
        response.push(eq.process(x));
    }

    // Rises to a single positive peak, then decays without ringing
    // below zero by more than the critically-damped undershoot
    let peak_index = response
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().partial_cmp(&b.1.abs()).unwrap())
        .map(|(i, _)| i)
        .unwrap();
    assert!(peak_index < 32, "energy should arrive early, peaked at {peak_index}");
    assert!(response[peak_index] > 0.0);
    assert!(response[peak_index] < 1.0, "no overshoot beyond the input");

    let tail: f32 = response[512..].iter().map(|s| s.abs()).sum();
    assert!(tail < 1e-3, "response must have died out, tail {tail}");

    // DC gain of unity: the impulse response sums to ~1
    let sum: f32 = response.iter().sum();
    assert!((sum - 1.0).abs() < 1e-3, "lowpass DC gain should be 1, got {sum}");
}

#[test]
fn equalizer_survives_sustained_noise_without_blowup() {
    let mut eq = Equalizer::new(48000.0);
    eq.add_band(80.0, 0.707, 4.0, FilterType::LowShelf);
    eq.add_band(400.0, 1.2, -3.0, FilterType::Peak);
    eq.add_band(2500.0, 0.8, 2.0, FilterType::Peak);
    eq.add_band(9000.0, 0.707, -2.0, FilterType::HighShelfNoQ);

    for s in seeded_noise(48_000, 7) {
        let out = eq.process(s);
        assert!(out.is_finite());
        assert!(out.abs() < 16.0, "bounded gain stack, got {out}");
    }
}

#[test]
fn compressor_reduces_crest_factor_of_noise() {
    let mut comp = Compressor::new(48000.0);
    comp.set_threshold(-12.0);
    comp.set_ratio(4.0);
    comp.set_knee(6.0);
    comp.set_attack(1.0);
    comp.set_release(50.0);

    let noise = seeded_noise(96_000, 42);
    let mut peak_in = 0.0f32;
    let mut peak_out = 0.0f32;
    for (n, &s) in noise.iter().enumerate() {
        let out = comp.process(s);
        assert!(out.is_finite());
        // Skip the attack transient before measuring
        if n > 4800 {
            peak_in = peak_in.max(s.abs());
            peak_out = peak_out.max(out.abs());
        }
    }
    assert!(
        peak_out < peak_in,
        "compression should tame peaks: in {peak_in}, out {peak_out}"
    );
}

#[test]
fn ratio_ordering_holds_on_noise() {
    let noise = seeded_noise(48_000, 9);

    let run = |ratio: f32| -> f32 {
        let mut comp = Compressor::new(48000.0);
        comp.set_threshold(-18.0);
        comp.set_ratio(ratio);
        comp.set_knee(6.0);

        let mut sum = 0.0f32;
        for &s in &noise {
            sum += comp.process(s).abs();
        }
        sum
    };

    let gentle = run(2.0);
    let firm = run(8.0);
    assert!(
        firm <= gentle,
        "higher ratio must not raise the summed level: {firm} vs {gentle}"
    );
}

#[test]
fn ms_compressor_preserves_mono_compatibility() {
    // A mono source must come out mono whatever the side channel
    // settings are, because its side signal is identically zero
    let mut comp = MsCompressor::new(48000.0);
    comp.set_threshold(-20.0);
    comp.set_ratio(4.0);
    comp.set_knee(6.0);

    for (n, &s) in seeded_noise(24_000, 3).iter().enumerate() {
        let (l, r) = comp.process(s, s, false);
        assert!(
            (l - r).abs() < 1e-5,
            "sample {n}: mid/side compression broke mono, {l} vs {r}"
        );
    }
}

#[test]
fn output_stage_waveshaping_caps_hot_program_material() {
    // Saturator drive into a clipper: whatever the level coming in,
    // the strip's output stage never exceeds the rails
    let mut sat = Saturator::new(SaturationCurve::Tangent);
    sat.set_drive(18.0);
    let mut clipper = Clipper::new();
    clipper.set_clip_type(ClipType::Quintic);

    for s in seeded_noise(48_000, 5) {
        let hot = s * 8.0;
        let (l, r) = sat.process_stereo(hot, -hot);
        let (l, r) = clipper.process_stereo(l, r);
        assert!(l.abs() <= 1.0 && r.abs() <= 1.0);
        assert!((l + r).abs() < 1e-6, "odd curves must preserve symmetry");
    }
}

#[test]
fn full_strip_stays_stable_and_decays_to_silence() {
    let sr = 48000.0;

    let mut eq = Equalizer::new(sr);
    eq.add_band(100.0, 0.707, 3.0, FilterType::LowShelf);
    eq.add_band(3000.0, 1.0, -2.0, FilterType::Peak);

    let mut comp = Compressor::new(sr);
    comp.set_threshold(-18.0);
    comp.set_ratio(3.0);
    comp.set_knee(6.0);
    comp.set_makeup_gain(2.0);

    let mut delay = StereoDelay::new(sr, 1.0).expect("valid delay settings");
    delay.set_time(0.05, StereoChannel::Both);
    delay.set_feedback(0.6, StereoChannel::Both);
    delay.set_dry_wet(0.3, StereoChannel::Both);
    delay.set_ping_pong(true);

    // One second of program material, then silence
    let noise = seeded_noise(48_000, 11);
    let mut tail_level = 0.0f32;
    for n in 0..144_000usize {
        let x = if n < noise.len() { noise[n] } else { 0.0 };
        let shaped = comp.process(eq.process(x));
        let (l, r) = delay.process(shaped, shaped);

        assert!(l.is_finite() && r.is_finite(), "sample {n} not finite");
        if n >= 120_000 {
            tail_level = tail_level.max(l.abs()).max(r.abs());
        }
    }

    // 0.5 s after the input stops the feedback tail must have decayed
    // well below the program level
    assert!(
        tail_level < db_to_gain(-20.0),
        "echo tail should decay, still at {tail_level}"
    );
}
