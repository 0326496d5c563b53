//! Fixed buzzer melodies.
//!
//! A melody is a short step pattern repeated a number of times. Pitch 0 is a
//! rest. The sequencer mutes the output after the last step.

/// Silence.
pub const REST: u32 = 0;

// Equal-temperament pitches (Hz, rounded).
pub const A3: u32 = 220;
pub const D6: u32 = 1175;
pub const E6: u32 = 1319;
pub const G6: u32 = 1568;
pub const A6: u32 = 1760;
pub const C7: u32 = 2093;

// The PC-98 style boot chirp is a plain 2:1 pair, not tempered B6/B5.
const PI: u32 = 1980;
const PO: u32 = 990;

/// One note or rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub pitch_hz: u32,
    pub duration_ms: u32,
}

const fn step(pitch_hz: u32, duration_ms: u32) -> Step {
    Step {
        pitch_hz,
        duration_ms,
    }
}

/// A step pattern played `repeats` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Melody {
    pub steps: &'static [Step],
    pub repeats: u8,
}

impl Melody {
    /// All steps in play order, repeats unrolled.
    pub fn iter(&self) -> impl Iterator<Item = Step> + '_ {
        (0..self.repeats).flat_map(move |_| self.steps.iter().copied())
    }

    /// Total playing time in milliseconds.
    pub fn total_ms(&self) -> u32 {
        let once: u32 = self.steps.iter().map(|s| s.duration_ms).sum();
        once * u32::from(self.repeats)
    }
}

/// Accept / start / pause.
pub const CLICK: Melody = Melody {
    steps: &[step(C7, 100)],
    repeats: 1,
};

/// Refused input, e.g. starting at 00:00.
pub const ERROR: Melody = Melody {
    steps: &[step(A3, 1000)],
    repeats: 1,
};

/// Boot and reset chirp.
pub const PIPO: Melody = Melody {
    steps: &[step(PI, 100), step(REST, 20), step(PO, 100)],
    repeats: 1,
};

/// JIS S 0013 "finished (near)" pattern: short beep, long beep.
pub const JIS_S0013_END: Melody = Melody {
    steps: &[step(C7, 100), step(REST, 100), step(C7, 500), step(REST, 500)],
    repeats: 10,
};

/// The fast-food fryer jingle. Eighth notes at 125 BPM.
pub const THIRORI: Melody = Melody {
    steps: &[step(G6, 240), step(E6, 240), step(G6, 240), step(REST, 240)],
    repeats: 3,
};

/// Warning-light two-tone.
pub const COLOR_TIMER: Melody = Melody {
    steps: &[step(A6, 200), step(D6, 400)],
    repeats: 20,
};

/// Short interaction sounds, played inline by the control loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    Click,
    Error,
    Pipo,
}

impl Tone {
    pub const fn melody(self) -> Melody {
        match self {
            Tone::Click => CLICK,
            Tone::Error => ERROR,
            Tone::Pipo => PIPO,
        }
    }
}

/// End-of-countdown melodies, played in the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndMelody {
    JisS0013,
    Thirori,
    ColorTimer,
}

impl EndMelody {
    pub const fn melody(self) -> Melody {
        match self {
            EndMelody::JisS0013 => JIS_S0013_END,
            EndMelody::Thirori => THIRORI,
            EndMelody::ColorTimer => COLOR_TIMER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_tones() {
        assert_eq!(CLICK.iter().collect::<Vec<_>>(), vec![step(2093, 100)]);
        assert_eq!(ERROR.iter().collect::<Vec<_>>(), vec![step(220, 1000)]);
        assert_eq!(
            PIPO.iter().collect::<Vec<_>>(),
            vec![step(1980, 100), step(0, 20), step(990, 100)]
        );
    }

    #[test]
    fn jis_end_melody_shape() {
        let steps: Vec<_> = JIS_S0013_END.iter().collect();
        assert_eq!(steps.len(), 40);
        assert_eq!(&steps[..4], JIS_S0013_END.steps);
        assert_eq!(JIS_S0013_END.total_ms(), 12_000);
    }

    #[test]
    fn thirori_shape() {
        let steps: Vec<_> = THIRORI.iter().collect();
        assert_eq!(steps.len(), 12);
        assert!(steps.iter().all(|s| s.duration_ms == 240));
        assert_eq!(
            steps[..4].iter().map(|s| s.pitch_hz).collect::<Vec<_>>(),
            vec![G6, E6, G6, REST]
        );
        assert_eq!(THIRORI.total_ms(), 2_880);
    }

    #[test]
    fn color_timer_shape() {
        let steps: Vec<_> = COLOR_TIMER.iter().collect();
        assert_eq!(steps.len(), 40);
        assert_eq!(steps[0], step(A6, 200));
        assert_eq!(steps[1], step(D6, 400));
        assert_eq!(COLOR_TIMER.total_ms(), 12_000);
    }

    #[test]
    fn selectors_map_to_melodies() {
        assert_eq!(Tone::Click.melody(), CLICK);
        assert_eq!(Tone::Error.melody(), ERROR);
        assert_eq!(Tone::Pipo.melody(), PIPO);
        assert_eq!(EndMelody::JisS0013.melody(), JIS_S0013_END);
        assert_eq!(EndMelody::Thirori.melody(), THIRORI);
        assert_eq!(EndMelody::ColorTimer.melody(), COLOR_TIMER);
    }
}
