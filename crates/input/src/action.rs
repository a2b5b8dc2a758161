use serde::{Deserialize, Serialize};

/// A semantic movement control. Key layouts map physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKey {
    Forward,
    Left,
    Right,
    Back,
    Up,
    Down,
}

impl ControlKey {
    pub const ALL: [ControlKey; 6] = [
        ControlKey::Forward,
        ControlKey::Left,
        ControlKey::Right,
        ControlKey::Back,
        ControlKey::Up,
        ControlKey::Down,
    ];
}

/// Which controls are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

impl Movement {
    /// Only `key` held.
    pub fn only(key: ControlKey) -> Self {
        let mut m = Self::default();
        m.set(key, true);
        m
    }

    pub fn set(&mut self, key: ControlKey, held: bool) {
        match key {
            ControlKey::Forward => self.forward = held,
            ControlKey::Back => self.back = held,
            ControlKey::Left => self.left = held,
            ControlKey::Right => self.right = held,
            ControlKey::Up => self.up = held,
            ControlKey::Down => self.down = held,
        }
    }

    pub fn is_held(&self, key: ControlKey) -> bool {
        match key {
            ControlKey::Forward => self.forward,
            ControlKey::Back => self.back,
            ControlKey::Left => self.left,
            ControlKey::Right => self.right,
            ControlKey::Up => self.up,
            ControlKey::Down => self.down,
        }
    }

    /// `(back - forward, right - left, up - down)`, each in `{-1, 0, 1}`.
    pub fn axes(&self) -> (f64, f64, f64) {
        (
            flag(self.back) - flag(self.forward),
            flag(self.right) - flag(self.left),
            flag(self.up) - flag(self.down),
        )
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        let mut m = Movement::only(ControlKey::Forward);
        m.set(ControlKey::Back, true);
        assert_eq!(m.axes(), (0.0, 0.0, 0.0));
        assert!(!m.is_idle());
    }

    #[test]
    fn axes_signs() {
        assert_eq!(Movement::only(ControlKey::Forward).axes(), (-1.0, 0.0, 0.0));
        assert_eq!(Movement::only(ControlKey::Right).axes(), (0.0, 1.0, 0.0));
        assert_eq!(Movement::only(ControlKey::Down).axes(), (0.0, 0.0, -1.0));
    }

    #[test]
    fn set_and_query_round_trip() {
        for key in ControlKey::ALL {
            let m = Movement::only(key);
            assert!(m.is_held(key));
            assert_eq!(ControlKey::ALL.iter().filter(|k| m.is_held(**k)).count(), 1);
        }
    }
}
