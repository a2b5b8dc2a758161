use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ControlKey;

/// Key code (`KeyW`, `Space`, ...) to control mapping.
///
/// Codes name physical key positions, so the same layout works on any
/// keyboard language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyLayout {
    bindings: BTreeMap<String, ControlKey>,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::azerty()
    }
}

impl KeyLayout {
    pub fn azerty() -> Self {
        Self::from_pairs([
            ("KeyW", ControlKey::Forward),
            ("KeyA", ControlKey::Left),
            ("KeyD", ControlKey::Right),
            ("KeyS", ControlKey::Back),
            ("Space", ControlKey::Up),
            ("KeyE", ControlKey::Down),
        ])
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, ControlKey)>) -> Self {
        Self {
            bindings: pairs
                .into_iter()
                .map(|(code, key)| (code.to_string(), key))
                .collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<ControlKey> {
        self.bindings.get(code).copied()
    }

    /// Rebind `code`, returning what it mapped to before.
    pub fn bind(&mut self, code: impl Into<String>, key: ControlKey) -> Option<ControlKey> {
        self.bindings.insert(code.into(), key)
    }

    /// Codes bound to `key`, in code order.
    pub fn codes_for(&self, key: ControlKey) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(move |(_, k)| **k == key)
            .map(|(code, _)| code.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_covers_every_control() {
        let layout = KeyLayout::default();
        assert_eq!(layout.get("KeyW"), Some(ControlKey::Forward));
        assert_eq!(layout.get("KeyE"), Some(ControlKey::Down));
        assert_eq!(layout.get("Space"), Some(ControlKey::Up));
        for key in ControlKey::ALL {
            assert_eq!(layout.codes_for(key).count(), 1, "{key:?}");
        }
        assert_eq!(layout.get("KeyQ"), None);
    }

    #[test]
    fn rebinding_replaces() {
        let mut layout = KeyLayout::azerty();
        assert_eq!(layout.bind("KeyW", ControlKey::Up), Some(ControlKey::Forward));
        assert_eq!(layout.bind("ArrowUp", ControlKey::Forward), None);
        assert_eq!(layout.codes_for(ControlKey::Forward).collect::<Vec<_>>(), ["ArrowUp"]);
    }

    #[test]
    fn deserializes_from_plain_map() {
        let yaml = "KeyZ: forward\nKeyQ: left\n";
        let layout: KeyLayout = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.get("KeyZ"), Some(ControlKey::Forward));
    }
}
