use crate::input::queue::InputEvent;

/// Keys the engine names. Codes are DOM `keyCode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Enter, Key::Space, Key::Left, Key::Right];

    pub fn code(self) -> u32 {
        match self {
            Key::Enter => 13,
            Key::Space => 32,
            Key::Left => 37,
            Key::Right => 39,
        }
    }

    pub fn from_code(code: u32) -> Option<Key> {
        Key::ALL.into_iter().find(|k| k.code() == code)
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Held keys plus press edges, rebuilt from queued key events.
///
/// `is_pressed` fires on the first fixed step after a key goes down and
/// ignores browser auto-repeat. `is_down` holds until the key is released.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardState {
    held: u32,
    pressed: u32,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a frame's worth of events. Unknown key codes are ignored.
    pub fn ingest<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            match *event {
                InputEvent::KeyDown { key_code } => {
                    if let Some(key) = Key::from_code(key_code) {
                        if self.held & key.bit() == 0 {
                            self.pressed |= key.bit();
                        }
                        self.held |= key.bit();
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    if let Some(key) = Key::from_code(key_code) {
                        self.held &= !key.bit();
                    }
                }
                InputEvent::Custom { .. } => {}
            }
        }
    }

    /// Went down since the last `end_step`.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed & key.bit() != 0
    }

    /// Currently held, or tapped within this step.
    pub fn is_down(&self, key: Key) -> bool {
        (self.held | self.pressed) & key.bit() != 0
    }

    /// Forget press edges after a fixed step has seen them.
    pub fn end_step(&mut self) {
        self.pressed = 0;
    }
}
