// SPDX-License-Identifier: LGPL-3.0-or-later

//! Fixed-capacity circular sample buffer.
//!
//! Allocates once at construction and never resizes. `push` overwrites
//! the oldest sample when the buffer is full, which is exactly the
//! behavior a delay line wants: the ring always holds the most recent
//! `max_length` samples and `head` marks where the next one lands.

/// Circular buffer of `f32` samples.
#[derive(Debug, Clone)]
pub struct CircularBuffer {
    data: Vec<f32>,
    head: usize,
    tail: usize,
    max_length: usize,
}

impl CircularBuffer {
    /// Create a zero-filled buffer holding `max_length` samples.
    ///
    /// Callers validate sizing; a zero capacity is a host integration
    /// bug, not a runtime condition.
    pub fn new(max_length: usize) -> Self {
        assert!(max_length > 0, "circular buffer capacity must be non-zero");
        Self {
            data: vec![0.0; max_length],
            head: 0,
            tail: 0,
            max_length,
        }
    }

    /// Write one sample at `head`, advancing it. When the buffer is
    /// full the oldest sample is dropped by bumping `tail`.
    #[inline]
    pub fn push(&mut self, value: f32) {
        let next = (self.head + 1) % self.max_length;
        if next == self.tail {
            self.tail = (self.tail + 1) % self.max_length;
        }
        self.data[self.head] = value;
        self.head = next;
    }

    /// Read the sample at an absolute ring position.
    ///
    /// The index wraps modulo the capacity; this never panics for any
    /// `index`.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.data[index % self.max_length]
    }

    /// Position the next `push` will write to.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Total capacity in samples.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Zero the contents and reset the positions.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.head = 0;
        self.tail = 0;
    }
}
