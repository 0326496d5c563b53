//! Rotary encoder integration.
//!
//! The QDEC task accumulates raw quadrature counts into a [`SharedPosition`];
//! the control loop turns them into whole detent steps with an
//! [`EncoderTracker`].

use core::sync::atomic::{AtomicI32, Ordering};

use crate::hal::EncoderReader;

/// Cumulative raw count shared between the encoder task and the control loop.
pub struct SharedPosition {
    raw: AtomicI32,
}

impl SharedPosition {
    pub const fn new() -> Self {
        Self {
            raw: AtomicI32::new(0),
        }
    }

    /// Add a signed batch of counts reported by the decoder.
    pub fn accumulate(&self, counts: i32) {
        // fetch_add wraps on overflow; the tracker uses wrapping deltas.
        self.raw.fetch_add(counts, Ordering::Relaxed);
    }

    pub fn get(&self) -> i32 {
        self.raw.load(Ordering::Relaxed)
    }
}

impl Default for SharedPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderReader for &SharedPosition {
    fn position(&mut self) -> i32 {
        self.get()
    }
}

/// Converts a cumulative count into per-poll step deltas.
pub struct EncoderTracker {
    counts_per_step: i32,
    last_raw: Option<i32>,
    /// Raw counts not yet turned into a whole step.
    remainder: i32,
}

impl EncoderTracker {
    /// `counts_per_step` below 1 is treated as 1.
    pub const fn new(counts_per_step: i32) -> Self {
        Self {
            counts_per_step: if counts_per_step < 1 { 1 } else { counts_per_step },
            last_raw: None,
            remainder: 0,
        }
    }

    /// Whole steps turned since the previous call.
    ///
    /// The first call only records the starting position and returns 0.
    /// Counts short of a full step carry over to later polls. Turning one
    /// way only, the deltas sum to `trunc(total counts / counts_per_step)`.
    pub fn delta(&mut self, raw: i32) -> i32 {
        let Some(last) = self.last_raw.replace(raw) else {
            return 0;
        };
        let counts = self.remainder.wrapping_add(raw.wrapping_sub(last));
        self.remainder = counts % self.counts_per_step;
        counts / self.counts_per_step
    }

    /// Read `encoder` and return the step delta.
    pub fn poll<E: EncoderReader>(&mut self, encoder: &mut E) -> i32 {
        self.delta(encoder.position())
    }
}
