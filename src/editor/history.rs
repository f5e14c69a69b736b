// src/editor/history.rs

pub const DEFAULT_CAPACITY: usize = 500;

/// Linear undo/redo over full document snapshots. Saving after an undo
/// discards the redo tail.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        History { entries: Vec::new(), index: None, capacity: capacity.max(1) }
    }

    /// Returns false when the snapshot equals the current entry; the redo
    /// tail is kept in that case.
    pub fn save_state(&mut self, snapshot: String) -> bool {
        match self.index {
            Some(i) if self.entries[i] == snapshot => return false,
            Some(i) => self.entries.truncate(i + 1),
            None => self.entries.clear(),
        }

        self.entries.push(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.index = Some(self.entries.len() - 1);
        true
    }

    pub fn undo(&mut self) -> Option<&str> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                Some(self.entries[i - 1].as_str())
            }
            _ => None,
        }
    }

    pub fn redo(&mut self) -> Option<&str> {
        let next = self.index.map(|i| i + 1)?;
        if next < self.entries.len() {
            self.index = Some(next);
            Some(self.entries[next].as_str())
        } else {
            None
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(states: &[&str]) -> History {
        let mut history = History::default();
        for s in states {
            history.save_state(s.to_string());
        }
        history
    }

    #[test]
    fn test_initial_state_cannot_be_undone() {
        let mut history = history_of(&["initial"]);
        assert!(!history.can_undo());
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_undo_walks_back_to_initial() {
        let mut history = history_of(&["a", "b", "c"]);
        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_redo_after_undo() {
        let mut history = history_of(&["a", "b"]);
        history.undo();
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some("b"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_save_after_undo_truncates_redo_tail() {
        let mut history = history_of(&["a", "b", "c"]);
        history.undo();
        history.undo();
        history.save_state("d".to_string());
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some("a"));
    }

    #[test]
    fn test_duplicate_snapshot_is_skipped() {
        let mut history = history_of(&["a"]);
        assert!(!history.save_state("a".to_string()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_duplicate_snapshot_keeps_redo_tail() {
        let mut history = history_of(&["a", "b"]);
        history.undo();
        assert!(!history.save_state("a".to_string()));
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some("b"));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = History::new(2);
        for s in ["a", "b", "c"] {
            history.save_state(s.to_string());
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), None);
    }
}
