//! Interaction core of the rotary countdown timer.
//!
//! Everything here is hardware-free and runs on the host:
//!
//! - [`button`] - noise / short / long press classification
//! - [`encoder`] - quadrature counts to detent steps
//! - [`timer`] - the Waiting / Countdown state machine
//! - [`melody`] + [`sequencer`] - buzzer melodies and their player
//! - [`controller`] - one control-loop tick tying the above together
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`. It implements the traits in
//! [`hal`] over the nRF52840 peripherals.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod controller;
pub mod encoder;
pub mod error;
pub mod hal;
pub mod melody;
pub mod sequencer;
pub mod timer;

pub use button::{ButtonClassifier, PressEvent, PressKind};
pub use config::TimerSettings;
pub use controller::Controller;
pub use error::Error;
pub use melody::{EndMelody, Melody, Tone};
pub use timer::{Mode, Outcome, TimerConfig, TimerMachine};

/// Format whole seconds as `MM:SS`.
///
/// Minutes are not wrapped. [`TimerSettings::normalized`] caps every
/// settable value at 99:00; larger inputs beyond five minute digits come
/// back truncated.
pub fn format_mm_ss(secs: u32) -> heapless::String<8> {
    use core::fmt::Write;

    let mut out = heapless::String::new();
    // Room for five minute digits; the settable range needs two.
    let _ = write!(out, "{:02}:{:02}", secs / 60, secs % 60);
    out
}

#[cfg(test)]
mod tests {
    use super::format_mm_ss;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(0).as_str(), "00:00");
        assert_eq!(format_mm_ss(59).as_str(), "00:59");
        assert_eq!(format_mm_ss(300).as_str(), "05:00");
        assert_eq!(format_mm_ss(5940).as_str(), "99:00");
    }

    #[test]
    fn three_digit_minutes_still_fit() {
        assert_eq!(format_mm_ss(100 * 60 + 1).as_str(), "100:01");
    }
}
