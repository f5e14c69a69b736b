// src/app/mod.rs
use crate::clipboard::Clipboard;
use crate::config::AppConfig;
use crate::editor::{EditorBuffer, History, Paginator, RowMeasure};
use crate::error::{Error, Result};
use crate::keybinds::{Keybind, KeybindMap};
use crate::labels::LabelSet;
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use chrono::{DateTime, Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const CLEAR_TITLE: &str = "Clear all content?";
pub const CLEAR_MESSAGE: &str = "This will delete all your notes. You can undo this action afterward.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Sidebar,
    LabelInput,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Editor => Focus::Sidebar,
            Focus::Sidebar => Focus::LabelInput,
            Focus::LabelInput => Focus::Editor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    ConfirmClear,
    KeybindCapture { label: String, pending: Option<Keybind> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

pub struct App {
    pub config: AppConfig,
    pub buffer: EditorBuffer,
    pub history: History,
    pub labels: LabelSet,
    pub keybinds: KeybindMap,
    pub theme: Theme,
    pub focus: Focus,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub label_input: String,
    pub sidebar_index: usize,
    pub should_quit: bool,
    paginator: Paginator,
    measure: RowMeasure,
    store: Box<dyn KeyValueStore>,
    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(
        config: AppConfig,
        store: Box<dyn KeyValueStore>,
        clipboard: Box<dyn Clipboard>,
    ) -> Result<Self> {
        let theme = Theme::load(store.as_ref())?;
        let labels = LabelSet::load(store.as_ref())?;
        let keybinds = KeybindMap::load(store.as_ref())?;

        let mut app = App {
            paginator: config.paginator(),
            measure: config.measure(),
            history: History::new(config.history_capacity),
            config,
            buffer: EditorBuffer::new(),
            labels,
            keybinds,
            theme,
            focus: Focus::Editor,
            modal: None,
            toast: None,
            label_input: String::new(),
            sidebar_index: 0,
            should_quit: false,
            store,
            clipboard,
        };
        app.save_state();
        tracing::info!(
            theme = app.theme.as_str(),
            custom_labels = app.labels.custom().len(),
            "notes app initialised"
        );
        Ok(app)
    }

    pub fn measure(&self) -> &RowMeasure {
        &self.measure
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "toast");
        let ttl = Duration::milliseconds(self.config.toast_duration_ms as i64);
        self.toast = Some(Toast { message, expires_at: Utc::now() + ttl });
    }

    pub fn expire_toast(&mut self, now: DateTime<Utc>) {
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
        }
    }

    fn save_state(&mut self) {
        match self.buffer.snapshot() {
            Ok(snapshot) => {
                self.history.save_state(snapshot);
                self.buffer.is_modified = false;
            }
            Err(err) => tracing::error!(?err, "failed to snapshot document"),
        }
    }

    /// Keys that left the document untouched record nothing.
    fn after_edit(&mut self) {
        if !self.buffer.is_modified {
            return;
        }
        if self.buffer.reflow(&self.paginator, &self.measure) {
            tracing::info!(pages = self.buffer.document.page_count(), "content moved to new page");
        }
        self.save_state();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let handled = match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    true
                }
                KeyCode::Char('z') => {
                    self.undo();
                    true
                }
                KeyCode::Char('y') => {
                    self.redo();
                    true
                }
                KeyCode::Char('l') => {
                    self.modal = Some(Modal::ConfirmClear);
                    true
                }
                KeyCode::Char('c') => {
                    self.copy_to_clipboard();
                    true
                }
                KeyCode::Char('t') => {
                    self.toggle_theme();
                    true
                }
                _ => false,
            };
            if handled {
                return;
            }
        }

        if key.code == KeyCode::Tab {
            self.focus = self.focus.next();
            return;
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::LabelInput => self.handle_label_input_key(key),
            Focus::Sidebar => {
                if !self.try_global_keybind(&key) {
                    self.handle_sidebar_key(key);
                }
            }
        }
    }

    /// Label keybinds only fire outside the editor and the label input.
    fn try_global_keybind(&mut self, key: &KeyEvent) -> bool {
        let Some(label) = self.keybinds.lookup(key).map(str::to_string) else {
            return false;
        };
        self.switch_to_label(&label)
    }

    /// Returns false when the label is unknown, e.g. a keybind left over
    /// for a label that no longer exists.
    pub fn switch_to_label(&mut self, label: &str) -> bool {
        if let Err(err) = self.labels.select(label) {
            tracing::warn!(?err, "keybind points at a missing label");
            return false;
        }
        if let Some(idx) = self.labels.all().position(|l| l == label) {
            self.sidebar_index = idx;
        }
        self.show_toast(format!("Switched to: {}", label));
        true
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Enter if shift => {
                self.buffer.insert_soft_break();
                self.after_edit();
            }
            KeyCode::Enter => {
                let label = self.labels.current().to_string();
                self.buffer.insert_label(&label);
                self.after_edit();
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.insert_char(c);
                self.after_edit();
            }
            KeyCode::Backspace => {
                self.buffer.delete_char();
                self.after_edit();
            }
            KeyCode::Left => self.buffer.move_left(),
            KeyCode::Right => self.buffer.move_right(),
            KeyCode::Up => self.buffer.move_up(),
            KeyCode::Down => self.buffer.move_down(),
            KeyCode::Home => self.buffer.move_home(),
            KeyCode::End => self.buffer.move_end(),
            KeyCode::Esc => self.focus = Focus::Sidebar,
            _ => {}
        }
    }

    fn handle_label_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.add_custom_label(),
            KeyCode::Backspace => {
                self.label_input.pop();
            }
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.label_input.push(c);
            }
            KeyCode::Esc => self.focus = Focus::Sidebar,
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        let count = self.labels.len();
        match key.code {
            KeyCode::Up => self.sidebar_index = self.sidebar_index.saturating_sub(1),
            KeyCode::Down => self.sidebar_index = (self.sidebar_index + 1).min(count - 1),
            KeyCode::Enter => {
                if let Some(label) = self.highlighted_label() {
                    if let Err(err) = self.labels.select(&label) {
                        tracing::warn!(?err, "failed to select label");
                    }
                }
            }
            KeyCode::Char('k') => {
                if let Some(label) = self.highlighted_label() {
                    self.open_keybind_modal(&label);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(label) = self.highlighted_label() {
                    self.remove_custom_label(&label);
                }
            }
            KeyCode::Char('e') => self.focus = Focus::Editor,
            _ => {}
        }
    }

    pub fn highlighted_label(&self) -> Option<String> {
        self.labels.all().nth(self.sidebar_index).map(str::to_string)
    }

    pub fn add_custom_label(&mut self) {
        let input = std::mem::take(&mut self.label_input);
        match self.labels.add_custom(&input, self.store.as_mut()) {
            Ok(name) => self.show_toast(format!("Label \"{}\" created", name)),
            Err(Error::EmptyLabel) => self.show_toast("Please enter a label name"),
            Err(Error::DuplicateLabel(_)) => {
                self.label_input = input;
                self.show_toast("This label already exists");
            }
            Err(err) => {
                tracing::error!(?err, "failed to save custom labels");
                self.label_input = input;
            }
        }
    }

    pub fn remove_custom_label(&mut self, label: &str) {
        match self
            .labels
            .remove_custom(label, self.store.as_mut(), &mut self.keybinds)
        {
            Ok(true) => {
                self.sidebar_index = self.sidebar_index.min(self.labels.len() - 1);
                self.show_toast(format!("Label \"{}\" removed", label));
            }
            Ok(false) => tracing::debug!(label, "not a custom label, nothing removed"),
            Err(err) => tracing::error!(?err, label, "failed to remove label"),
        }
    }

    pub fn open_keybind_modal(&mut self, label: &str) {
        self.modal = Some(Modal::KeybindCapture { label: label.to_string(), pending: None });
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.clone() else {
            return;
        };

        match modal {
            Modal::ConfirmClear => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => self.confirm_clear(),
                KeyCode::Esc | KeyCode::Char('n') => self.modal = None,
                _ => {}
            },
            Modal::KeybindCapture { label, pending } => match key.code {
                KeyCode::Esc => self.modal = None,
                KeyCode::Enter => {
                    if let Some(keybind) = pending {
                        self.save_keybind(&label, keybind);
                    }
                }
                KeyCode::Delete | KeyCode::Backspace => self.clear_keybind(&label),
                _ => {
                    if let Some(keybind) = Keybind::from_key_event(&key) {
                        self.modal = Some(Modal::KeybindCapture { label, pending: Some(keybind) });
                    }
                }
            },
        }
    }

    fn save_keybind(&mut self, label: &str, keybind: Keybind) {
        let formatted = keybind.format();
        match self.keybinds.set(label, keybind, self.store.as_mut()) {
            Ok(()) => {
                self.modal = None;
                self.show_toast(format!("Keybind set: {}", formatted));
            }
            Err(Error::KeybindConflict { label }) => {
                self.show_toast(format!("Keybind already used for: {}", label));
            }
            Err(err) => tracing::error!(?err, "failed to save keybinds"),
        }
    }

    fn clear_keybind(&mut self, label: &str) {
        match self.keybinds.clear(label, self.store.as_mut()) {
            Ok(true) => self.show_toast(format!("Keybind cleared for: {}", label)),
            Ok(false) => {}
            Err(err) => tracing::error!(?err, "failed to save keybinds"),
        }
        self.modal = None;
    }

    pub fn confirm_clear(&mut self) {
        self.buffer.clear();
        self.modal = None;
        self.save_state();
        tracing::info!("notes cleared");
        self.show_toast("Notes cleared. You can undo this action.");
    }

    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.undo().map(str::to_string) else {
            return;
        };
        match self.buffer.restore(&snapshot) {
            Ok(()) => self.show_toast("Undo successful"),
            Err(err) => tracing::error!(?err, "failed to restore snapshot"),
        }
    }

    pub fn redo(&mut self) {
        let Some(snapshot) = self.history.redo().map(str::to_string) else {
            return;
        };
        match self.buffer.restore(&snapshot) {
            Ok(()) => self.show_toast("Redo successful"),
            Err(err) => tracing::error!(?err, "failed to restore snapshot"),
        }
    }

    pub fn copy_to_clipboard(&mut self) {
        if self.buffer.document.is_blank() {
            self.show_toast("Nothing to copy");
            return;
        }
        let text = self.buffer.plain_text();
        match self.clipboard.write_text(&text) {
            Ok(()) => self.show_toast("Copied to clipboard"),
            Err(err) => {
                tracing::warn!(?err, "clipboard write failed");
                self.show_toast("Failed to copy");
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(err) = self.theme.save(self.store.as_mut()) {
            tracing::error!(?err, "failed to persist theme");
        }
    }
}
