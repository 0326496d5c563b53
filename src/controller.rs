//! One control-loop tick: sample inputs, drive the timer.

use crate::button::{ButtonClassifier, PressEvent};
use crate::config::{TimerSettings, ENCODER_COUNTS_PER_STEP};
use crate::encoder::EncoderTracker;
use crate::hal::{ButtonPin, EncoderReader};
use crate::melody::Tone;
use crate::timer::{Mode, Outcome, TimerMachine};

pub struct Controller {
    button: ButtonClassifier,
    encoder: EncoderTracker,
    timer: TimerMachine,
}

impl Controller {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            button: ButtonClassifier::new(),
            encoder: EncoderTracker::new(ENCODER_COUNTS_PER_STEP),
            timer: TimerMachine::new(settings),
        }
    }

    /// Swap in a classifier with non-default thresholds.
    pub fn with_classifier(mut self, button: ButtonClassifier) -> Self {
        self.button = button;
        self
    }

    /// Power-up: show the initial value and chirp.
    pub fn boot<E: EncoderReader>(&mut self, encoder: &mut E) -> Outcome {
        self.encoder.poll(encoder);
        Outcome {
            render: Some(self.timer.remaining()),
            tone: Some(Tone::Pipo),
            end_melody: None,
        }
    }

    /// Sample the button and encoder at `now_ms` and apply them.
    ///
    /// The press is applied first, then the branch for the resulting mode:
    /// encoder adjustment while waiting, clock update while counting down.
    /// The encoder is read on every tick so turns made during a countdown
    /// are discarded rather than applied after it.
    pub fn poll<B, E>(&mut self, button: &mut B, encoder: &mut E, now_ms: u64) -> Outcome
    where
        B: ButtonPin,
        E: EncoderReader,
    {
        let pressed = match self.button.sample(button.is_released(), now_ms) {
            Some(press) => self.timer.on_press(press, now_ms),
            None => Outcome::none(),
        };

        let delta = self.encoder.poll(encoder);
        let branch = match self.timer.mode() {
            Mode::Waiting => self.timer.on_encoder(delta),
            Mode::Countdown => self.timer.tick(now_ms),
        };

        pressed.merge(branch)
    }

    /// Apply an already classified press, bypassing the pin.
    pub fn press(&mut self, press: PressEvent, now_ms: u64) -> Outcome {
        self.timer.on_press(press, now_ms)
    }

    pub fn timer(&self) -> &TimerMachine {
        &self.timer
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}
