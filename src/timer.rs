//! Countdown state machine.
//!
//! ```text
//!            short press (remaining > 0)
//!  Waiting ───────────────────────────────▶ Countdown
//!     ▲  ◀─────────────────────────────────    │
//!     │        short press (pause)             │
//!     └────────────────────────────────────────┘
//!               derived remaining < 0  (end melody)
//! ```
//!
//! A long press restores the last committed value in either mode. The
//! encoder only adjusts the value while waiting.
//!
//! During a countdown the remaining time is derived from the start instant
//! on every tick instead of being decremented, so loop jitter never
//! accumulates.
//!
//! The machine does not touch hardware. Every input returns an [`Outcome`]
//! that the caller executes: render, play a tone inline, spawn the end melody.

use crate::button::{PressEvent, PressKind};
use crate::config::TimerSettings;
use crate::melody::{EndMelody, Tone};

/// Timer mode. Lives for the whole process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Idle, value adjustable with the encoder.
    Waiting,
    /// Counting down from `previous`.
    Countdown,
}

/// Timer values in whole seconds.
///
/// `min` and `max` bound the settable value: `min <= remaining <= max`
/// holds after every adjustment, restore and expiry. A running countdown
/// only respects `max` and may show values below `min` on its way to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    pub remaining: u32,
    /// Value committed at the last countdown start; restored by a long press.
    pub previous: u32,
    pub min: u32,
    pub max: u32,
}

impl TimerConfig {
    pub fn new(settings: TimerSettings) -> Self {
        let s = settings.normalized();
        Self {
            remaining: s.default_secs,
            previous: s.default_secs,
            min: s.min_secs,
            max: s.max_secs,
        }
    }

    /// Move `remaining` by `delta_secs`, clamped to `[min, max]`.
    pub fn adjust(&mut self, delta_secs: i32) -> u32 {
        let target = i64::from(self.remaining) + i64::from(delta_secs);
        self.remaining = target.clamp(i64::from(self.min), i64::from(self.max)) as u32;
        self.remaining
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

/// Side effects requested by one input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    /// Redraw the readout with this many seconds.
    pub render: Option<u32>,
    /// Play inline; the control loop is suspended meanwhile.
    pub tone: Option<Tone>,
    /// Start in the background; never awaited.
    pub end_melody: Option<EndMelody>,
}

impl Outcome {
    pub const fn none() -> Self {
        Self {
            render: None,
            tone: None,
            end_melody: None,
        }
    }

    fn render(secs: u32) -> Self {
        Self {
            render: Some(secs),
            ..Self::none()
        }
    }

    fn tone(tone: Tone) -> Self {
        Self {
            tone: Some(tone),
            ..Self::none()
        }
    }

    fn with_tone(self, tone: Tone) -> Self {
        Self {
            tone: Some(tone),
            ..self
        }
    }

    /// Combine with an outcome produced later in the same tick.
    ///
    /// The later render supersedes the earlier one.
    pub fn merge(self, later: Outcome) -> Self {
        Self {
            render: later.render.or(self.render),
            tone: self.tone.or(later.tone),
            end_melody: self.end_melody.or(later.end_melody),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

/// The timer: values, mode and countdown clock.
pub struct TimerMachine {
    config: TimerConfig,
    mode: Mode,
    started_at_ms: u64,
    end_melody: EndMelody,
}

impl TimerMachine {
    /// Starts in [`Mode::Waiting`] with `remaining == previous == default`.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            config: TimerConfig::new(settings),
            mode: Mode::Waiting,
            started_at_ms: 0,
            end_melody: settings.end_melody,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn remaining(&self) -> u32 {
        self.config.remaining
    }

    /// Apply a classified press observed at `now_ms`.
    pub fn on_press(&mut self, press: PressEvent, now_ms: u64) -> Outcome {
        match press.kind {
            PressKind::Noise => Outcome::none(),
            PressKind::Long => {
                self.config.remaining = self.config.previous;
                info!("Timer: restored {} s", self.config.remaining);
                Outcome::render(self.config.remaining).with_tone(Tone::Pipo)
            }
            PressKind::Short => match self.mode {
                Mode::Waiting if self.config.remaining > 0 => {
                    self.config.previous = self.config.remaining;
                    self.started_at_ms = now_ms;
                    self.set_mode(Mode::Countdown);
                    Outcome::tone(Tone::Click)
                }
                Mode::Waiting => {
                    warn!("Timer: nothing to count down - turn the knob or long-press to restore");
                    Outcome::tone(Tone::Error)
                }
                Mode::Countdown => {
                    self.set_mode(Mode::Waiting);
                    Outcome::tone(Tone::Click)
                }
            },
        }
    }

    /// Apply an encoder movement of `delta` steps (one step = one second).
    pub fn on_encoder(&mut self, delta: i32) -> Outcome {
        if delta == 0 || self.mode != Mode::Waiting {
            return Outcome::none();
        }
        let remaining = self.config.adjust(delta);
        debug!("Timer: {} -> {} s", delta, remaining);
        Outcome::render(remaining)
    }

    /// Advance the countdown clock to `now_ms`. No-op while waiting.
    pub fn tick(&mut self, now_ms: u64) -> Outcome {
        if self.mode != Mode::Countdown {
            return Outcome::none();
        }

        let elapsed_secs = now_ms.saturating_sub(self.started_at_ms) / 1000;
        let left = i64::from(self.config.previous) - elapsed_secs as i64;

        if left >= 0 {
            let left = (left as u32).min(self.config.max);
            if left == self.config.remaining {
                return Outcome::none();
            }
            self.config.remaining = left;
            return Outcome::render(left);
        }

        self.config.remaining = self.config.min;
        self.set_mode(Mode::Waiting);
        info!("Timer: expired, playing {:?}", self.end_melody);
        Outcome {
            render: Some(self.config.remaining),
            tone: None,
            end_melody: Some(self.end_melody),
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            info!("Timer: {:?} -> {:?} ({} s)", self.mode, mode, self.config.remaining);
            self.mode = mode;
        }
    }
}

impl Default for TimerMachine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}
