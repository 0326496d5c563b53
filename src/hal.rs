//! Boundary traits between the timer core and the board.
//!
//! The firmware implements these over embassy-nrf peripherals; tests
//! implement them over plain fields.

/// Cumulative rotary encoder count.
pub trait EncoderReader {
    /// Current position. Monotonic in the sense that it only moves by turning
    /// the knob; the core computes deltas itself.
    fn position(&mut self) -> i32;
}

/// Active-low pushbutton on a pulled-up input.
pub trait ButtonPin {
    /// `true` while the button is not pressed.
    fn is_released(&mut self) -> bool;
}

/// Time readout.
pub trait DisplayPresenter {
    /// Show `remaining_secs` as `MM:SS`.
    fn render(&mut self, remaining_secs: u32);
}

/// Buzzer output.
pub trait Speaker {
    /// Emit a square wave at `hz` until the next call. `0` mutes.
    fn set_pitch(&mut self, hz: u32);
}

impl<S: Speaker + ?Sized> Speaker for &mut S {
    fn set_pitch(&mut self, hz: u32) {
        (**self).set_pitch(hz)
    }
}
