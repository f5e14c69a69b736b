// src/config.rs
use crate::editor::history::DEFAULT_CAPACITY;
use crate::editor::pagination::{
    Paginator, RowMeasure, DEFAULT_BOTTOM_MARGIN, DEFAULT_MAX_PAGE_HEIGHT, DEFAULT_PAGE_PADDING,
};
use crate::error::Result;
use crate::storage::FileStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Inches.
    pub max_page_height: f32,
    pub bottom_margin: f32,
    pub page_padding: f32,
    pub page_columns: u16,
    pub rows_per_inch: f32,
    pub history_capacity: usize,
    pub toast_duration_ms: u64,
    pub storage_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            max_page_height: DEFAULT_MAX_PAGE_HEIGHT,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            page_padding: DEFAULT_PAGE_PADDING,
            page_columns: 64,
            rows_per_inch: 4.0,
            history_capacity: DEFAULT_CAPACITY,
            toast_duration_ms: 3000,
            storage_path: None,
        }
    }
}

impl AppConfig {
    pub fn app_dir(base: Option<PathBuf>) -> PathBuf {
        base.unwrap_or_else(|| PathBuf::from(".")).join("notepages")
    }

    pub fn default_path() -> PathBuf {
        AppConfig::app_dir(dirs::config_dir()).join("config.json")
    }

    pub fn log_path() -> PathBuf {
        AppConfig::app_dir(dirs::data_dir()).join("notepages.log")
    }

    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(FileStore::default_path)
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.max_page_height, self.bottom_margin, self.page_padding)
    }

    pub fn measure(&self) -> RowMeasure {
        RowMeasure::new(self.page_columns, self.rows_per_inch)
    }
}
