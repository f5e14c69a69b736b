// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("label name is empty")]
    EmptyLabel,

    #[error("label \"{0}\" already exists")]
    DuplicateLabel(String),

    #[error("unknown label \"{0}\"")]
    UnknownLabel(String),

    #[error("keybind already used for: {label}")]
    KeybindConflict { label: String },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
