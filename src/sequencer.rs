//! Tone sequencer.
//!
//! [`play`] walks a [`Melody`] step by step: set the pitch, wait the step's
//! duration, then mute after the last step. It is async so the same routine
//! serves both invocation modes:
//!
//! - **Blocking** - the control loop awaits it inline. The loop stops polling
//!   for the length of the tone; the executor keeps running other tasks.
//! - **Background** - the firmware spawns it as its own task for end-of-
//!   countdown melodies. Fire-and-forget: never awaited, never cancelled.
//!
//! Both modes can drive one buzzer through a [`SharedSpeaker`]. There is no
//! arbitration between them: whoever calls `set_pitch` last wins.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal_async::delay::DelayNs;

use crate::hal::Speaker;
use crate::melody::{Melody, REST};

/// Play `melody` to completion and leave the output muted.
pub async fn play<S, D>(speaker: &mut S, delay: &mut D, melody: Melody)
where
    S: Speaker,
    D: DelayNs,
{
    debug!("Sequencer: {} steps, {} ms", melody.steps.len(), melody.total_ms());
    for step in melody.iter() {
        speaker.set_pitch(step.pitch_hz);
        delay.delay_ms(step.duration_ms).await;
    }
    speaker.set_pitch(REST);
}

/// Copyable handle to a speaker behind a blocking mutex.
///
/// Each `set_pitch` is a single short critical section, so holders never wait
/// on each other for longer than one register write.
pub struct SharedSpeaker<'a, M: RawMutex, S> {
    inner: &'a Mutex<M, RefCell<S>>,
}

impl<'a, M: RawMutex, S> SharedSpeaker<'a, M, S> {
    pub const fn new(inner: &'a Mutex<M, RefCell<S>>) -> Self {
        Self { inner }
    }
}

impl<M: RawMutex, S> Clone for SharedSpeaker<'_, M, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, S> Copy for SharedSpeaker<'_, M, S> {}

impl<M: RawMutex, S: Speaker> Speaker for SharedSpeaker<'_, M, S> {
    fn set_pitch(&mut self, hz: u32) {
        self.inner.lock(|cell| cell.borrow_mut().set_pitch(hz));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::melody::{CLICK, COLOR_TIMER, ERROR, PIPO, THIRORI};
    use embassy_futures::{block_on, join::join, yield_now};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Delay that advances a shared virtual clock and yields once.
    struct VirtualDelay {
        now_ns: Rc<Cell<u64>>,
    }

    impl DelayNs for VirtualDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.now_ns.set(self.now_ns.get() + u64::from(ns));
            yield_now().await;
        }
    }

    /// Records every pitch change with its virtual timestamp.
    struct RecordingSpeaker {
        now_ns: Rc<Cell<u64>>,
        log: Vec<(u64, u32)>,
    }

    impl Speaker for RecordingSpeaker {
        fn set_pitch(&mut self, hz: u32) {
            self.log.push((self.now_ns.get() / 1_000_000, hz));
        }
    }

    fn rig() -> (RecordingSpeaker, VirtualDelay) {
        let clock = Rc::new(Cell::new(0));
        (
            RecordingSpeaker {
                now_ns: clock.clone(),
                log: Vec::new(),
            },
            VirtualDelay { now_ns: clock },
        )
    }

    #[test]
    fn click_is_one_beep_then_mute() {
        let (mut speaker, mut delay) = rig();
        block_on(play(&mut speaker, &mut delay, CLICK));
        assert_eq!(speaker.log, vec![(0, 2093), (100, 0)]);
    }

    #[test]
    fn error_tone_holds_for_a_second() {
        let (mut speaker, mut delay) = rig();
        block_on(play(&mut speaker, &mut delay, ERROR));
        assert_eq!(speaker.log, vec![(0, 220), (1000, 0)]);
    }

    #[test]
    fn pipo_timeline() {
        let (mut speaker, mut delay) = rig();
        block_on(play(&mut speaker, &mut delay, PIPO));
        assert_eq!(
            speaker.log,
            vec![(0, 1980), (100, 0), (120, 990), (220, 0)]
        );
    }

    #[test]
    fn repeated_melody_runs_its_full_length() {
        let (mut speaker, mut delay) = rig();
        block_on(play(&mut speaker, &mut delay, THIRORI));
        assert_eq!(speaker.log.len(), 13);
        assert_eq!(speaker.log.last(), Some(&(2_880, 0)));
        assert_eq!(delay.now_ns.get(), 2_880 * 1_000_000);
    }

    #[test]
    fn overlapping_players_share_one_speaker() {
        let clock = Rc::new(Cell::new(0));
        let output = Mutex::<CriticalSectionRawMutex, _>::new(RefCell::new(RecordingSpeaker {
            now_ns: clock.clone(),
            log: Vec::new(),
        }));
        let mut background = SharedSpeaker::new(&output);
        let mut foreground = background;
        let mut bg_delay = VirtualDelay {
            now_ns: clock.clone(),
        };
        let mut fg_delay = VirtualDelay { now_ns: clock };

        block_on(join(
            play(&mut background, &mut bg_delay, COLOR_TIMER),
            play(&mut foreground, &mut fg_delay, CLICK),
        ));

        let log = output.lock(|cell| cell.borrow().log.clone());
        // Every step of both melodies reached the output, plus one mute each.
        assert_eq!(log.len(), COLOR_TIMER.iter().count() + 1 + CLICK.iter().count() + 1);
        assert!(log.iter().any(|&(_, hz)| hz == 2093));
        // The longer melody finishes last and leaves the buzzer silent.
        assert_eq!(log.last().map(|&(_, hz)| hz), Some(0));
    }
}
