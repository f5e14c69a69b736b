// src/labels/mod.rs
use crate::error::{Error, Result};
use crate::keybinds::KeybindMap;
use crate::storage::{KeyValueStore, CUSTOM_LABELS_KEY};

pub const INTERVIEWER_LABEL: &str = "Interviewer";
pub const QUESTION_LABEL: &str = "Question";
pub const DEFAULT_LABELS: [&str; 2] = [INTERVIEWER_LABEL, QUESTION_LABEL];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    custom: Vec<String>,
    current: String,
}

impl Default for LabelSet {
    fn default() -> Self {
        LabelSet { custom: Vec::new(), current: INTERVIEWER_LABEL.to_string() }
    }
}

impl LabelSet {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let custom = match store.get(CUSTOM_LABELS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(LabelSet { custom, ..LabelSet::default() })
    }

    fn persist(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(CUSTOM_LABELS_KEY, &serde_json::to_string(&self.custom)?)
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Defaults first, then custom labels in creation order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        DEFAULT_LABELS.iter().copied().chain(self.custom.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        DEFAULT_LABELS.len() + self.custom.len()
    }

    pub fn is_default(name: &str) -> bool {
        DEFAULT_LABELS.contains(&name)
    }

    pub fn contains(&self, name: &str) -> bool {
        LabelSet::is_default(name) || self.custom.iter().any(|l| l == name)
    }

    /// Adds a trimmed custom label and returns the stored name.
    pub fn add_custom(&mut self, name: &str, store: &mut dyn KeyValueStore) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyLabel);
        }
        if self.contains(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }

        self.custom.push(name.to_string());
        self.persist(store)?;
        tracing::info!(label = name, "custom label created");
        Ok(name.to_string())
    }

    /// Removes a custom label together with its keybind. Falls back to the
    /// interviewer label when the removed one was current.
    pub fn remove_custom(
        &mut self,
        name: &str,
        store: &mut dyn KeyValueStore,
        keybinds: &mut KeybindMap,
    ) -> Result<bool> {
        let before = self.custom.len();
        self.custom.retain(|l| l != name);
        if self.custom.len() == before {
            return Ok(false);
        }

        self.persist(store)?;
        keybinds.clear(name, store)?;
        if self.current == name {
            self.current = INTERVIEWER_LABEL.to_string();
        }
        tracing::info!(label = name, "custom label removed");
        Ok(true)
    }

    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.contains(name) {
            return Err(Error::UnknownLabel(name.to_string()));
        }
        self.current = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinds::Keybind;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let labels = LabelSet::default();
        assert_eq!(labels.current(), INTERVIEWER_LABEL);
        assert_eq!(labels.all().collect::<Vec<_>>(), vec!["Interviewer", "Question"]);
    }

    #[test]
    fn test_add_custom_trims_and_persists() {
        let mut store = MemoryStore::new();
        let mut labels = LabelSet::default();
        assert_eq!(labels.add_custom("  Answer ", &mut store).unwrap(), "Answer");
        assert_eq!(store.get(CUSTOM_LABELS_KEY).unwrap().as_deref(), Some(r#"["Answer"]"#));

        let reloaded = LabelSet::load(&store).unwrap();
        assert_eq!(reloaded.custom(), &["Answer".to_string()]);
    }

    #[test]
    fn test_add_custom_rejects_empty_and_duplicates() {
        let mut store = MemoryStore::new();
        let mut labels = LabelSet::default();
        assert!(matches!(labels.add_custom("   ", &mut store), Err(Error::EmptyLabel)));
        assert!(matches!(
            labels.add_custom("Question", &mut store),
            Err(Error::DuplicateLabel(_))
        ));
        labels.add_custom("Note", &mut store).unwrap();
        assert!(matches!(labels.add_custom("Note", &mut store), Err(Error::DuplicateLabel(_))));
    }

    #[test]
    fn test_remove_custom_resets_current_and_keybind() {
        let mut store = MemoryStore::new();
        let mut keybinds = KeybindMap::default();
        let mut labels = LabelSet::default();
        labels.add_custom("Answer", &mut store).unwrap();
        labels.select("Answer").unwrap();
        keybinds.set("Answer", Keybind::new("a", false, true, false), &mut store).unwrap();

        assert!(labels.remove_custom("Answer", &mut store, &mut keybinds).unwrap());
        assert_eq!(labels.current(), INTERVIEWER_LABEL);
        assert_eq!(keybinds.get("Answer"), None);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_defaults_cannot_be_removed() {
        let mut store = MemoryStore::new();
        let mut keybinds = KeybindMap::default();
        let mut labels = LabelSet::default();
        assert!(!labels.remove_custom("Question", &mut store, &mut keybinds).unwrap());
        assert!(labels.contains("Question"));
    }

    #[test]
    fn test_select_unknown_label() {
        let mut labels = LabelSet::default();
        assert!(matches!(labels.select("Nope"), Err(Error::UnknownLabel(_))));
        labels.select(QUESTION_LABEL).unwrap();
        assert_eq!(labels.current(), QUESTION_LABEL);
    }
}
