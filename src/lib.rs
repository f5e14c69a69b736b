// src/lib.rs
pub mod app;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod keybinds;
pub mod labels;
pub mod logging;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod utils;

pub use error::{Error, Result};
