use glam::Vec2;

/// Input event types the scene understands.
/// Pointer coordinates are NDC: x right, y up, both in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A button went down at (x, y). Starts a drag.
    PointerDown { x: f32, y: f32 },
    /// A button was released at (x, y). Ends a drag.
    PointerUp { x: f32, y: f32 },
    /// A click at the last known pointer position.
    Click,
    /// Wheel scroll in notches; positive zooms in.
    Wheel { delta: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them once per frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer state latched from one frame's worth of events.
///
/// The position persists across frames; the click flag, drag delta and
/// wheel total are per frame and reset on every [`PointerState::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Last known pointer position, `None` until the first pointer event.
    pub ndc: Option<Vec2>,
    /// A click arrived this frame.
    pub clicked: bool,
    /// Whether a button is held.
    pub dragging: bool,
    /// Pointer travel while dragging, this frame.
    pub drag_delta: Vec2,
    /// Wheel notches this frame.
    pub wheel: f32,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a frame's events into the state.
    pub fn apply(&mut self, events: &[InputEvent]) {
        self.clicked = false;
        self.drag_delta = Vec2::ZERO;
        self.wheel = 0.0;

        for event in events {
            match *event {
                InputEvent::PointerMove { x, y } => self.move_to(Vec2::new(x, y)),
                InputEvent::PointerDown { x, y } => {
                    self.ndc = Some(Vec2::new(x, y));
                    self.dragging = true;
                }
                InputEvent::PointerUp { x, y } => {
                    self.move_to(Vec2::new(x, y));
                    self.dragging = false;
                }
                InputEvent::Click => self.clicked = true,
                InputEvent::Wheel { delta } => self.wheel += delta,
            }
        }
    }

    fn move_to(&mut self, to: Vec2) {
        if self.dragging {
            if let Some(from) = self.ndc {
                self.drag_delta += to - from;
            }
        }
        self.ndc = Some(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 0.1, y: 0.2 });
        q.push(InputEvent::Click);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn latches_last_position_and_click() {
        let mut p = PointerState::new();
        assert_eq!(p.ndc, None);
        p.apply(&[
            InputEvent::PointerMove { x: 0.1, y: 0.2 },
            InputEvent::PointerMove { x: -0.5, y: 0.25 },
            InputEvent::Click,
        ]);
        assert_eq!(p.ndc, Some(Vec2::new(-0.5, 0.25)));
        assert!(p.clicked);
        assert!(!p.dragging);
        assert_eq!(p.drag_delta, Vec2::ZERO);

        // Position survives an empty frame; the click does not.
        p.apply(&[]);
        assert_eq!(p.ndc, Some(Vec2::new(-0.5, 0.25)));
        assert!(!p.clicked);
    }

    #[test]
    fn drag_accumulates_only_while_held() {
        let mut p = PointerState::new();
        p.apply(&[
            InputEvent::PointerMove { x: 0.0, y: 0.0 },
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: 0.25, y: 0.0 },
            InputEvent::PointerMove { x: 0.5, y: -0.25 },
        ]);
        assert!(p.dragging);
        assert_eq!(p.drag_delta, Vec2::new(0.5, -0.25));

        p.apply(&[InputEvent::PointerUp { x: 0.75, y: -0.25 }, InputEvent::PointerMove { x: 1.0, y: 0.0 }]);
        assert!(!p.dragging);
        assert_eq!(p.drag_delta, Vec2::new(0.25, 0.0));
    }

    #[test]
    fn wheel_sums_per_frame() {
        let mut p = PointerState::new();
        p.apply(&[InputEvent::Wheel { delta: 1.0 }, InputEvent::Wheel { delta: 2.0 }]);
        assert_eq!(p.wheel, 3.0);
        p.apply(&[]);
        assert_eq!(p.wheel, 0.0);
    }
}
