//! Piezo buzzer on a PWM channel.
//!
//! The counter runs at 1 MHz (16 MHz / 16), so a tone of `hz` needs a top
//! value of `1_000_000 / hz` and 50 % duty for a square wave. The 15-bit
//! counter limits the lowest tone to about 31 Hz.

use embassy_nrf::peripherals::PWM0;
use embassy_nrf::pwm::{Prescaler, SimplePwm};
use rotary_timer::hal::Speaker;

const PWM_CLOCK_HZ: u32 = 1_000_000;
const MAX_TOP: u32 = 0x7FFF;

pub struct PwmSpeaker<'d> {
    pwm: SimplePwm<'d, PWM0>,
}

impl<'d> PwmSpeaker<'d> {
    /// Takes a one-channel PWM and leaves it silent.
    pub fn new(pwm: SimplePwm<'d, PWM0>) -> Self {
        pwm.set_prescaler(Prescaler::Div16);
        pwm.disable();
        Self { pwm }
    }
}

impl Speaker for PwmSpeaker<'_> {
    fn set_pitch(&mut self, hz: u32) {
        if hz == 0 {
            self.pwm.disable();
            return;
        }
        let top = (PWM_CLOCK_HZ / hz).clamp(2, MAX_TOP) as u16;
        self.pwm.set_max_duty(top);
        self.pwm.set_duty(0, top / 2);
        self.pwm.enable();
    }
}
