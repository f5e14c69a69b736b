// src/editor/cursor.rs
use super::buffer::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub page: usize,
    pub block: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(page: usize, block: usize, col: usize) -> Self {
        Cursor { page, block, col }
    }

    pub fn move_to(&mut self, document: &Document, page: usize, block: usize, col: usize) {
        self.page = page.min(document.pages.len().saturating_sub(1));
        let blocks = &document.pages[self.page].blocks;
        self.block = block.min(blocks.len().saturating_sub(1));
        self.col = col.min(blocks.get(self.block).map(|b| b.char_len()).unwrap_or(0));
    }

    pub fn clamp(&mut self, document: &Document) {
        let (page, block, col) = (self.page, self.block, self.col);
        self.move_to(document, page, block, col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::buffer::{Block, Page};

    #[test]
    fn test_move_to_clamps() {
        let doc = Document {
            pages: vec![Page { blocks: vec![Block::Text("abc".to_string())] }],
        };
        let mut cursor = Cursor::default();
        cursor.move_to(&doc, 4, 7, 10);
        assert_eq!(cursor, Cursor::new(0, 0, 3));
    }

    #[test]
    fn test_clamp_on_empty_page() {
        let doc = Document::default();
        let mut cursor = Cursor::new(2, 3, 4);
        cursor.clamp(&doc);
        assert_eq!(cursor, Cursor::new(0, 0, 0));
    }
}
