// src/keybinds/mod.rs
use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, KEYBINDS_KEY};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybind {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        // Modifier-only presses and media keys are never bindable
        _ => return None,
    };
    Some(name)
}

impl Keybind {
    pub fn new(key: &str, ctrl: bool, alt: bool, shift: bool) -> Self {
        Keybind { key: key.to_string(), ctrl, alt, shift }
    }

    /// Captures a key press as a keybind. Returns None for presses that
    /// cannot be bound on their own, such as a bare modifier.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        let key = key_name(event.code)?;
        Some(Keybind {
            key,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT)
                || event.code == KeyCode::BackTab,
        })
    }

    pub fn format(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.key.to_uppercase());
        parts.join(" + ")
    }

    /// Same key ignoring case, same modifiers exactly.
    pub fn same_as(&self, other: &Keybind) -> bool {
        self.key.to_lowercase() == other.key.to_lowercase()
            && self.ctrl == other.ctrl
            && self.alt == other.alt
            && self.shift == other.shift
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        Keybind::from_key_event(event)
            .map(|pressed| self.same_as(&pressed))
            .unwrap_or(false)
    }
}

/// Label name to keybind, persisted as one JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeybindMap {
    binds: BTreeMap<String, Keybind>,
}

impl KeybindMap {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let binds = match store.get(KEYBINDS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => BTreeMap::new(),
        };
        Ok(KeybindMap { binds })
    }

    fn persist(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(KEYBINDS_KEY, &serde_json::to_string(&self.binds)?)
    }

    pub fn get(&self, label: &str) -> Option<&Keybind> {
        self.binds.get(label)
    }

    pub fn set(&mut self, label: &str, keybind: Keybind, store: &mut dyn KeyValueStore) -> Result<()> {
        if let Some((owner, _)) = self
            .binds
            .iter()
            .find(|(owner, existing)| owner.as_str() != label && existing.same_as(&keybind))
        {
            return Err(Error::KeybindConflict { label: owner.clone() });
        }

        tracing::info!(label, keybind = %keybind.format(), "keybind set");
        self.binds.insert(label.to_string(), keybind);
        self.persist(store)
    }

    /// Returns whether a binding existed.
    pub fn clear(&mut self, label: &str, store: &mut dyn KeyValueStore) -> Result<bool> {
        if self.binds.remove(label).is_none() {
            return Ok(false);
        }
        tracing::info!(label, "keybind cleared");
        self.persist(store)?;
        Ok(true)
    }

    pub fn lookup(&self, event: &KeyEvent) -> Option<&str> {
        self.binds
            .iter()
            .find(|(_, kb)| kb.matches(event))
            .map(|(label, _)| label.as_str())
    }
}
