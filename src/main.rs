//! Rotary countdown timer firmware for the nRF52840.
//!
//! Turn the knob to set the time, short-press to start or pause, long-press
//! to restore the last started value. The timer logic lives in the
//! `rotary_timer` library; this binary wires it to the peripherals:
//!
//! - TWIM0 → SSD1306 OLED (time readout)
//! - QDEC  → rotary encoder (own task, lock-free position counter)
//! - GPIO  → encoder pushbutton, sampled every control-loop tick
//! - PWM0  → piezo buzzer (inline tones + background end melody task)

#![no_std]
#![no_main]

mod sound;
mod ui;

use core::cell::RefCell;

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::qdec::{self, Qdec};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Duration, Instant, Timer};
use rotary_timer::config::POLL_INTERVAL_MS;
use rotary_timer::encoder::SharedPosition;
use rotary_timer::hal::DisplayPresenter;
use rotary_timer::melody::Melody;
use rotary_timer::sequencer::{self, SharedSpeaker};
use rotary_timer::{Controller, Outcome, TimerSettings};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::sound::PwmSpeaker;
use crate::ui::buttons::KnobButton;
use crate::ui::display::OledPresenter;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    QDEC => qdec::InterruptHandler<peripherals::QDEC>;
});

type SpeakerCell = Mutex<CriticalSectionRawMutex, RefCell<PwmSpeaker<'static>>>;
type Buzzer = SharedSpeaker<'static, CriticalSectionRawMutex, PwmSpeaker<'static>>;

static SPEAKER: StaticCell<SpeakerCell> = StaticCell::new();
static ENCODER_POSITION: SharedPosition = SharedPosition::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("rotary-timer starting");

    let pwm = SimplePwm::new_1ch(p.PWM0, p.P0_03);
    let mut buzzer: Buzzer =
        SharedSpeaker::new(SPEAKER.init(Mutex::new(RefCell::new(PwmSpeaker::new(pwm)))));

    let mut qdec_config = qdec::Config::default();
    qdec_config.debounce = true;
    let qdec = Qdec::new(p.QDEC, Irqs, p.P0_28, p.P0_29, qdec_config);
    unwrap!(spawner.spawn(encoder_task(qdec)));

    let mut button = KnobButton::new(Input::new(p.P0_11, Pull::Up));

    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);
    // No display, no timer: halt here rather than count down blind.
    let mut presenter = OledPresenter::new(unwrap!(ui::display::init(i2c)));

    let mut controller = Controller::new(TimerSettings::default());
    let mut encoder = &ENCODER_POSITION;
    let mut delay = Delay;

    info!("Peripherals up, entering control loop");
    let boot = controller.boot(&mut encoder);
    execute(boot, spawner, &mut presenter, &mut buzzer, &mut delay).await;

    loop {
        let now_ms = Instant::now().as_millis();
        let outcome = controller.poll(&mut button, &mut encoder, now_ms);
        if !outcome.is_empty() {
            execute(outcome, spawner, &mut presenter, &mut buzzer, &mut delay).await;
        }
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

/// Carry out what the timer asked for, in order: redraw, inline tone,
/// background melody.
async fn execute<P: DisplayPresenter>(
    outcome: Outcome,
    spawner: Spawner,
    presenter: &mut P,
    buzzer: &mut Buzzer,
    delay: &mut Delay,
) {
    if let Some(secs) = outcome.render {
        presenter.render(secs);
    }

    if let Some(tone) = outcome.tone {
        sequencer::play(buzzer, delay, tone.melody()).await;
    }

    if let Some(end) = outcome.end_melody {
        if spawner.spawn(end_melody_task(*buzzer, end.melody())).is_err() {
            warn!("End melody {:?} dropped: previous ones still playing", end);
        }
    }
}

#[embassy_executor::task]
async fn encoder_task(qdec: Qdec<'static, peripherals::QDEC>) -> ! {
    ui::buttons::encoder_task(qdec, &ENCODER_POSITION).await
}

/// Fire-and-forget end-of-countdown melody. Runs to completion; nothing
/// waits for it or cancels it.
///
/// At most two play at once. An expiry while both slots are busy gets no
/// melody; `execute` logs the dropped request.
#[embassy_executor::task(pool_size = 2)]
async fn end_melody_task(mut buzzer: Buzzer, melody: Melody) {
    info!("End melody: {} ms", melody.total_ms());
    sequencer::play(&mut buzzer, &mut Delay, melody).await;
    info!("End melody finished");
}
