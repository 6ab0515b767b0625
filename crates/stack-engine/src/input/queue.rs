/// Input event types the engine understands.
/// Generic, with no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key went down (DOM `keyCode`). Auto-repeat sends more of these while held.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the UI layer (page buttons, menus).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events received from the host page since the last frame.
/// The page pushes, the runner drains once per rendered frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 39 });
        q.push(InputEvent::KeyUp { key_code: 39 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::KeyDown { key_code: 39 });
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event_keeps_payload() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 1, a: 2.0, b: 0.0, c: 0.0 });
        let first = q.iter().next().copied();
        match first {
            Some(InputEvent::Custom { kind, a, .. }) => {
                assert_eq!(kind, 1);
                assert_eq!(a, 2.0);
            }
            other => panic!("expected Custom event, got {:?}", other),
        }
    }
}
