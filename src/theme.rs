// src/theme.rs
use crate::error::Result;
use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Missing or unrecognised values fall back to light.
    pub fn load(store: &dyn KeyValueStore) -> Result<Theme> {
        Ok(store
            .get(THEME_KEY)?
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default())
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let mut store = MemoryStore::new();
        assert_eq!(Theme::load(&store).unwrap(), Theme::Light);
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(Theme::load(&store).unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let theme = Theme::Light.toggled();
        theme.save(&mut store).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(Theme::load(&store).unwrap(), Theme::Dark);
    }
}
