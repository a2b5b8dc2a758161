use crate::{ControlKey, KeyLayout, Movement};

/// Anything the camera can read movement from.
pub trait MovementSource {
    /// Whether input currently drives the camera (pointer locked).
    fn is_engaged(&self) -> bool;

    fn movement(&self) -> Movement;
}

/// Pressed-key state and pending mouse motion.
///
/// Fed raw events by the windowing layer; read once per frame by the engine.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    layout: KeyLayout,
    pressed: Movement,
    engaged: bool,
    mouse: (f64, f64),
}

impl Controls {
    pub fn new(layout: KeyLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    /// Returns the control the code maps to, if any.
    pub fn key_down(&mut self, code: &str) -> Option<ControlKey> {
        self.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> Option<ControlKey> {
        self.set_key(code, false)
    }

    fn set_key(&mut self, code: &str, held: bool) -> Option<ControlKey> {
        let key = self.layout.get(code)?;
        if self.pressed.is_held(key) != held {
            tracing::trace!(code, ?key, held, "control key");
        }
        self.pressed.set(key, held);
        Some(key)
    }

    pub fn set_engaged(&mut self, engaged: bool) {
        if self.engaged != engaged {
            tracing::debug!(engaged, "input engagement changed");
        }
        self.engaged = engaged;
        if !engaged {
            self.mouse = (0.0, 0.0);
        }
    }

    /// Accumulate raw pointer motion. Ignored while disengaged.
    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        if self.engaged {
            self.mouse.0 += dx;
            self.mouse.1 += dy;
        }
    }

    /// Drain accumulated pointer motion.
    pub fn take_mouse_delta(&mut self) -> (f64, f64) {
        std::mem::take(&mut self.mouse)
    }

    /// Release every held control, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pressed = Movement::default();
    }
}

impl MovementSource for Controls {
    fn is_engaged(&self) -> bool {
        self.engaged
    }

    fn movement(&self) -> Movement {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_keys_update_state() {
        let mut c = Controls::default();
        assert_eq!(c.key_down("KeyW"), Some(ControlKey::Forward));
        assert!(c.movement().forward);
        c.key_up("KeyW");
        assert!(c.movement().is_idle());
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut c = Controls::default();
        assert_eq!(c.key_down("F11"), None);
        assert!(c.movement().is_idle());
    }

    #[test]
    fn disengaging_keeps_pressed_keys() {
        let mut c = Controls::default();
        c.set_engaged(true);
        c.key_down("Space");
        c.set_engaged(false);
        assert!(!c.is_engaged());
        assert!(c.movement().up);
    }

    #[test]
    fn mouse_accumulates_only_while_engaged() {
        let mut c = Controls::default();
        c.mouse_motion(5.0, 5.0);
        assert_eq!(c.take_mouse_delta(), (0.0, 0.0));

        c.set_engaged(true);
        c.mouse_motion(3.0, -1.0);
        c.mouse_motion(2.0, 4.0);
        assert_eq!(c.take_mouse_delta(), (5.0, 3.0));
        assert_eq!(c.take_mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn custom_layout() {
        let mut c = Controls::new(KeyLayout::from_pairs([("ArrowUp", ControlKey::Forward)]));
        assert_eq!(c.key_down("KeyW"), None);
        c.key_down("ArrowUp");
        assert!(c.movement().forward);
    }
}
