//! OS-level pointer injection
//!
//! Drives the system pointer for real clicks on the rendered board. This is
//! the production [`PointerInjector`]; the control loop itself only ever
//! sees the trait.

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

use crate::bot::capabilities::PointerInjector;
use crate::bot::error::InjectError;

/// Pointer injector backed by the operating system's input facilities.
pub struct SystemPointer {
    enigo: Enigo,
}

impl SystemPointer {
    pub fn new() -> Result<Self, InjectError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InjectError::Device(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl PointerInjector for SystemPointer {
    fn move_to(&mut self, x: f64, y: f64) -> Result<(), InjectError> {
        self.enigo
            .move_mouse(x.round() as i32, y.round() as i32, Coordinate::Abs)
            .map_err(|e| InjectError::Device(e.to_string()))
    }

    fn click(&mut self) -> Result<(), InjectError> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| InjectError::Device(e.to_string()))
    }
}
