//! User interface subsystem - OLED display + encoder knob.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, shows `MM:SS`
//! - **Knob**: rotary encoder on the QDEC peripheral with a pushbutton

pub mod buttons;
pub mod display;
