//! Press classification for the encoder pushbutton.
//!
//! The pin is sampled once per control-loop tick. A press is timed from the
//! released→pressed edge to the pressed→released edge and classified only on
//! release, so nothing is emitted while the button is held.

use crate::config::{LONG_PRESS_THRESHOLD_MS, SHORT_PRESS_THRESHOLD_MS};

/// How long a press was held, bucketed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Held shorter than the short threshold - contact bounce or a graze.
    Noise,
    /// Start / pause.
    Short,
    /// Restore the last committed value.
    Long,
}

/// One completed press-release cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent {
    pub kind: PressKind,
    pub held_ms: u64,
}

/// Edge-timing classifier.
pub struct ButtonClassifier {
    short_ms: u64,
    long_ms: u64,
    pressed_at: Option<u64>,
}

impl ButtonClassifier {
    /// Classifier with the thresholds from [`crate::config`].
    pub const fn new() -> Self {
        Self::with_thresholds(SHORT_PRESS_THRESHOLD_MS, LONG_PRESS_THRESHOLD_MS)
    }

    pub const fn with_thresholds(short_ms: u64, long_ms: u64) -> Self {
        Self {
            short_ms,
            long_ms,
            pressed_at: None,
        }
    }

    /// Feed one pin sample taken at `now_ms`.
    ///
    /// `released` follows the pull-up wiring: `false` means pressed.
    /// Returns an event only on the sample that observes the release.
    pub fn sample(&mut self, released: bool, now_ms: u64) -> Option<PressEvent> {
        match (self.pressed_at, released) {
            (None, false) => {
                self.pressed_at = Some(now_ms);
                debug!("Button: pressed at {} ms", now_ms);
                None
            }
            (Some(start), true) => {
                self.pressed_at = None;
                let held_ms = now_ms.saturating_sub(start);
                let event = PressEvent {
                    kind: self.classify(held_ms),
                    held_ms,
                };
                match event.kind {
                    PressKind::Noise => debug!("Button: ignoring {} ms press as noise", held_ms),
                    _ => info!("Button: {:?} press ({} ms)", event.kind, held_ms),
                }
                Some(event)
            }
            _ => None,
        }
    }

    /// Bucket a hold duration.
    pub fn classify(&self, held_ms: u64) -> PressKind {
        if held_ms >= self.long_ms {
            PressKind::Long
        } else if held_ms >= self.short_ms {
            PressKind::Short
        } else {
            PressKind::Noise
        }
    }

    /// `true` between the press edge and the release edge.
    pub fn is_held(&self) -> bool {
        self.pressed_at.is_some()
    }
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Press at `start`, release at `end`, sampling every 5 ms in between.
    fn press(classifier: &mut ButtonClassifier, start: u64, end: u64) -> Vec<PressEvent> {
        let mut events = Vec::new();
        let mut t = start;
        while t < end {
            events.extend(classifier.sample(false, t));
            t += 5;
        }
        events.extend(classifier.sample(true, end));
        events
    }

    #[test]
    fn thresholds_bucket_hold_durations() {
        let c = ButtonClassifier::new();
        assert_eq!(c.classify(0), PressKind::Noise);
        assert_eq!(c.classify(99), PressKind::Noise);
        assert_eq!(c.classify(100), PressKind::Short);
        assert_eq!(c.classify(499), PressKind::Short);
        assert_eq!(c.classify(500), PressKind::Long);
        assert_eq!(c.classify(10_000), PressKind::Long);
    }

    #[test]
    fn short_press_emits_once_on_release() {
        let mut c = ButtonClassifier::new();
        let events = press(&mut c, 1_000, 1_200);
        assert_eq!(
            events,
            vec![PressEvent {
                kind: PressKind::Short,
                held_ms: 200
            }]
        );
        assert!(!c.is_held());
    }

    #[test]
    fn nothing_is_emitted_while_held() {
        let mut c = ButtonClassifier::new();
        for t in (0..2_000).step_by(5) {
            assert_eq!(c.sample(false, t), None);
            assert!(c.is_held());
        }
        let event = c.sample(true, 2_000).unwrap();
        assert_eq!(event.kind, PressKind::Long);
        assert_eq!(event.held_ms, 2_000);
    }

    #[test]
    fn idle_released_samples_emit_nothing() {
        let mut c = ButtonClassifier::new();
        for t in (0..100).step_by(5) {
            assert_eq!(c.sample(true, t), None);
        }
        assert!(!c.is_held());
    }

    #[test]
    fn bounce_is_reported_as_noise() {
        let mut c = ButtonClassifier::new();
        let events = press(&mut c, 50, 65);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PressKind::Noise);
        assert_eq!(events[0].held_ms, 15);
    }

    #[test]
    fn consecutive_presses_are_timed_independently() {
        let mut c = ButtonClassifier::new();
        let first = press(&mut c, 0, 600);
        let second = press(&mut c, 700, 850);
        assert_eq!(first[0].kind, PressKind::Long);
        assert_eq!(second[0].kind, PressKind::Short);
        assert_eq!(second[0].held_ms, 150);
    }

    #[test]
    fn custom_thresholds() {
        let c = ButtonClassifier::with_thresholds(20, 1_000);
        assert_eq!(c.classify(20), PressKind::Short);
        assert_eq!(c.classify(999), PressKind::Short);
        assert_eq!(c.classify(1_000), PressKind::Long);
    }
}
