use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddleKey {
    Up,
    Down,
}

/// One held key. Without key-release events from the terminal, a key counts
/// as released once its repeat events stop arriving.
#[derive(Debug)]
pub struct KeyHold {
    pub pressed: bool,
    pub last_update: Instant,
}

impl KeyHold {
    pub fn new(now: Instant) -> Self {
        Self {
            pressed: false,
            last_update: now,
        }
    }

    pub fn press(&mut self, now: Instant) {
        self.pressed = true;
        self.last_update = now;
    }

    pub fn release(&mut self, now: Instant) {
        self.pressed = false;
        self.last_update = now;
    }
}
