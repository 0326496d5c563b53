//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and timer bounds
//! live here so they can be tuned in one place.

use crate::melody::EndMelody;

// Control loop

/// Interval between two polls of the button and the encoder (ms).
pub const POLL_INTERVAL_MS: u64 = 5;

// Button

/// Presses held shorter than this are contact noise (ms).
pub const SHORT_PRESS_THRESHOLD_MS: u64 = 100;

/// Presses held at least this long are long presses (ms).
pub const LONG_PRESS_THRESHOLD_MS: u64 = 500;

// Timer

/// Countdown value at power-up (seconds). 5 minutes.
pub const DEFAULT_REMAINING_SECS: u32 = 300;

/// Largest settable value (seconds). 99:00 is the widest `MM:SS` readout.
pub const MAX_TIME_SECS: u32 = 5940;

/// Smallest settable value (seconds).
pub const MIN_TIME_SECS: u32 = 0;

/// Melody played when a countdown runs out.
pub const END_MELODY: EndMelody = EndMelody::Thirori;

// Encoder

/// Raw quadrature counts per detent. One detent adjusts the timer by one second.
pub const ENCODER_COUNTS_PER_STEP: i32 = 4;

// Display

/// SSD1306 I²C address.
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder button → P0.11 (active-low, internal pull-up)
//   Encoder A      → P0.28 (QDEC)
//   Encoder B      → P0.29 (QDEC)
//   Buzzer         → P0.03 (PWM0 channel 0)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Runtime view of the timer bounds and melody choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSettings {
    /// Value loaded at power-up (seconds).
    pub default_secs: u32,
    /// Lower bound for every adjustment (seconds).
    pub min_secs: u32,
    /// Upper bound for every adjustment (seconds).
    pub max_secs: u32,
    /// Melody played at expiry.
    pub end_melody: EndMelody,
}

impl TimerSettings {
    /// Returns settings with `min <= default <= max <= MAX_TIME_SECS`.
    ///
    /// Swapped bounds are put back in order, both are capped at the widest
    /// `MM:SS` readout and the default is clamped into them.
    pub fn normalized(self) -> Self {
        let lo = self.min_secs.min(MAX_TIME_SECS);
        let hi = self.max_secs.min(MAX_TIME_SECS);
        let (min_secs, max_secs) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Self {
            default_secs: self.default_secs.clamp(min_secs, max_secs),
            min_secs,
            max_secs,
            end_melody: self.end_melody,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_secs: DEFAULT_REMAINING_SECS,
            min_secs: MIN_TIME_SECS,
            max_secs: MAX_TIME_SECS,
            end_melody: END_MELODY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_constants() {
        let s = TimerSettings::default();
        assert_eq!(s.default_secs, 300);
        assert_eq!(s.min_secs, 0);
        assert_eq!(s.max_secs, 5940);
        assert_eq!(s.end_melody, EndMelody::Thirori);
    }

    #[test]
    fn normalized_orders_bounds_and_clamps_default() {
        let s = TimerSettings {
            default_secs: 900,
            min_secs: 600,
            max_secs: 60,
            end_melody: EndMelody::ColorTimer,
        }
        .normalized();
        assert_eq!((s.min_secs, s.max_secs), (60, 600));
        assert_eq!(s.default_secs, 600);
    }

    #[test]
    fn normalized_caps_bounds_at_readout_width() {
        let s = TimerSettings {
            default_secs: u32::MAX,
            min_secs: 0,
            max_secs: u32::MAX,
            end_melody: EndMelody::Thirori,
        }
        .normalized();
        assert_eq!(s.max_secs, MAX_TIME_SECS);
        assert_eq!(s.default_secs, MAX_TIME_SECS);
        assert_eq!(crate::format_mm_ss(s.max_secs).as_str(), "99:00");
    }
}
