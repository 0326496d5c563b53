//! Unified error type for the timer firmware.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for on-target logging when `defmt` is enabled.
//!
//! Starting a zero-length countdown is not an error here: the state machine
//! answers it with the error tone.

/// Peripheral failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The display did not acknowledge its init sequence. Fatal at boot.
    DisplayInit,

    /// Pushing a frame to the display failed. The next render retries.
    DisplayFlush,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::DisplayInit => f.write_str("display initialisation failed"),
            Error::DisplayFlush => f.write_str("display flush failed"),
        }
    }
}
