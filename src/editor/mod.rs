// src/editor/mod.rs
pub mod buffer;
pub mod cursor;
pub mod history;
pub mod pagination;

pub use buffer::{Block, Document, EditorBuffer, Page};
pub use cursor::Cursor;
pub use history::History;
pub use pagination::{Measure, PageSplit, Paginator, RowMeasure};
