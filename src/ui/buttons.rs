//! GPIO and QDEC input for the encoder knob.
//!
//! The pushbutton (active-low with internal pull-up) is sampled by the control
//! loop through [`ButtonPin`]. The rotation is counted by the QDEC peripheral
//! in its own task, which accumulates every report into a [`SharedPosition`].

use defmt::debug;
use embassy_nrf::gpio::Input;
use embassy_nrf::peripherals::QDEC;
use embassy_nrf::qdec::Qdec;
use rotary_timer::encoder::SharedPosition;
use rotary_timer::hal::ButtonPin;

/// Knob pushbutton.
pub struct KnobButton<'d> {
    pin: Input<'d>,
}

impl<'d> KnobButton<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl ButtonPin for KnobButton<'_> {
    fn is_released(&mut self) -> bool {
        self.pin.is_high()
    }
}

/// Accumulate QDEC reports forever.
///
/// `Qdec::read` resolves once per report period with the signed count since
/// the previous report.
pub async fn encoder_task(mut qdec: Qdec<'static, QDEC>, position: &'static SharedPosition) -> ! {
    loop {
        let counts = qdec.read().await;
        if counts != 0 {
            position.accumulate(i32::from(counts));
            debug!("Encoder: {} counts, position {}", counts, position.get());
        }
    }
}
