// src/editor/buffer.rs
use super::cursor::Cursor;
use super::pagination::{Measure, Paginator};
use crate::error::Result;
use crate::labels::QUESTION_LABEL;
use crate::utils::formatter;
use serde::{Deserialize, Serialize};

pub const QUESTION_PREFIX: &str = "Q. ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    Text(String),
    Heading(String),
    Content(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Text(s) | Block::Heading(s) | Block::Content(s) => s,
        }
    }

    pub fn text_mut(&mut self) -> &mut String {
        match self {
            Block::Text(s) | Block::Heading(s) | Block::Content(s) => s,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    /// A block of the same kind holding `text`.
    pub fn with_text(&self, text: String) -> Block {
        match self {
            Block::Text(_) => Block::Text(text),
            Block::Heading(_) => Block::Heading(text),
            Block::Content(_) => Block::Content(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Default for Document {
    fn default() -> Self {
        Document { pages: vec![Page::default()] }
    }
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_blank(&self) -> bool {
        self.pages
            .iter()
            .all(|p| p.blocks.iter().all(|b| b.text().trim().is_empty()))
    }

    fn block_before(&self, page: usize, block: usize) -> Option<(usize, usize)> {
        if block > 0 {
            return Some((page, block - 1));
        }
        (0..page)
            .rev()
            .find(|&p| !self.pages[p].is_empty())
            .map(|p| (p, self.pages[p].blocks.len() - 1))
    }

    fn block_after(&self, page: usize, block: usize) -> Option<(usize, usize)> {
        if block + 1 < self.pages[page].blocks.len() {
            return Some((page, block + 1));
        }
        (page + 1..self.pages.len())
            .find(|&p| !self.pages[p].is_empty())
            .map(|p| (p, 0))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    document: Document,
    cursor: Cursor,
}

fn byte_index(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(i, _)| i).unwrap_or(s.len())
}

#[derive(Debug, Clone)]
pub struct EditorBuffer {
    pub document: Document,
    pub cursor: Cursor,
    /// Set by edits, cleared once the state is recorded in history.
    pub is_modified: bool,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        EditorBuffer::new()
    }
}

impl EditorBuffer {
    pub fn new() -> Self {
        EditorBuffer {
            document: Document::default(),
            cursor: Cursor::default(),
            is_modified: false,
        }
    }

    pub fn current_block(&self) -> Option<&Block> {
        self.document.pages[self.cursor.page].blocks.get(self.cursor.block)
    }

    fn ensure_block(&mut self) {
        let page = &mut self.document.pages[self.cursor.page];
        if page.is_empty() {
            page.blocks.push(Block::Text(String::new()));
            self.cursor.block = 0;
            self.cursor.col = 0;
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.ensure_block();
        let Cursor { page, block, col } = self.cursor;
        let text = self.document.pages[page].blocks[block].text_mut();
        let idx = byte_index(text, col);
        text.insert(idx, ch);
        self.cursor.col += 1;
        self.is_modified = true;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert_char(ch);
        }
    }

    pub fn insert_soft_break(&mut self) {
        self.insert_char('\n');
    }

    /// Inserts a labeled section at the cursor. "Question" is an inline prefix;
    /// every other label becomes a heading followed by an empty content block.
    pub fn insert_label(&mut self, label: &str) {
        if label == QUESTION_LABEL {
            self.insert_str(QUESTION_PREFIX);
            return;
        }

        let Cursor { page, block, col } = self.cursor;
        let blocks = &mut self.document.pages[page].blocks;

        if blocks.is_empty() {
            blocks.push(Block::Heading(label.to_string()));
            blocks.push(Block::Content(String::new()));
            self.cursor = Cursor::new(page, 1, 0);
            self.is_modified = true;
            return;
        }

        let current = blocks[block].clone();
        let idx = byte_index(current.text(), col);
        let (before, after) = current.text().split_at(idx);

        let mut replacement = Vec::with_capacity(4);
        if !before.is_empty() {
            replacement.push(current.with_text(before.to_string()));
        }
        replacement.push(Block::Heading(label.to_string()));
        let content_at = replacement.len();
        replacement.push(Block::Content(String::new()));
        if !after.is_empty() {
            replacement.push(current.with_text(after.to_string()));
        }

        blocks.splice(block..=block, replacement);
        self.cursor = Cursor::new(page, block + content_at, 0);
        self.is_modified = true;
    }

    pub fn delete_char(&mut self) {
        let Cursor { page, block, col } = self.cursor;

        if self.document.pages[page].is_empty() {
            if page > 0 {
                self.document.pages.remove(page);
                self.move_to_end_of_page(page - 1);
                self.is_modified = true;
            }
            return;
        }

        if col > 0 {
            let text = self.document.pages[page].blocks[block].text_mut();
            let idx = byte_index(text, col - 1);
            text.remove(idx);
            self.cursor.col -= 1;
            self.is_modified = true;
            return;
        }

        let Some((prev_page, prev_block)) = self.document.block_before(page, block) else {
            return;
        };

        // Merge into the previous block
        let removed = self.document.pages[page].blocks.remove(block);
        let target = &mut self.document.pages[prev_page].blocks[prev_block];
        let new_col = target.char_len();
        target.text_mut().push_str(removed.text());

        if page != prev_page && self.document.pages[page].is_empty() {
            self.document.pages.remove(page);
        }

        self.cursor = Cursor::new(prev_page, prev_block, new_col);
        self.is_modified = true;
    }

    fn move_to_end_of_page(&mut self, page: usize) {
        let blocks = &self.document.pages[page].blocks;
        let block = blocks.len().saturating_sub(1);
        let col = blocks.last().map(|b| b.char_len()).unwrap_or(0);
        self.cursor = Cursor::new(page, block, col);
    }

    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if let Some((p, b)) = self.document.block_before(self.cursor.page, self.cursor.block) {
            let col = self.document.pages[p].blocks[b].char_len();
            self.cursor = Cursor::new(p, b, col);
        }
    }

    pub fn move_right(&mut self) {
        let len = self.current_block().map(|b| b.char_len()).unwrap_or(0);
        if self.cursor.col < len {
            self.cursor.col += 1;
        } else if let Some((p, b)) = self.document.block_after(self.cursor.page, self.cursor.block) {
            self.cursor = Cursor::new(p, b, 0);
        }
    }

    pub fn move_up(&mut self) {
        if let Some((p, b)) = self.document.block_before(self.cursor.page, self.cursor.block) {
            let col = self.cursor.col;
            self.cursor.move_to(&self.document, p, b, col);
        }
    }

    pub fn move_down(&mut self) {
        if self.current_block().is_none() {
            return;
        }
        if let Some((p, b)) = self.document.block_after(self.cursor.page, self.cursor.block) {
            let col = self.cursor.col;
            self.cursor.move_to(&self.document, p, b, col);
        }
    }

    pub fn move_home(&mut self) {
        self.cursor.col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor.col = self.current_block().map(|b| b.char_len()).unwrap_or(0);
    }

    pub fn clear(&mut self) {
        self.document = Document::default();
        self.cursor = Cursor::default();
        self.is_modified = true;
    }

    /// Runs the overflow check and keeps the cursor on the block it was in.
    pub fn reflow(&mut self, paginator: &Paginator, measure: &dyn Measure) -> bool {
        let splits = paginator.check_and_move_overflow(&mut self.document, measure);
        for split in &splits {
            if self.cursor.page == split.from_page && self.cursor.block >= split.at_block {
                self.cursor.page += 1;
                self.cursor.block -= split.at_block;
            }
        }
        !splits.is_empty()
    }

    pub fn snapshot(&self) -> Result<String> {
        let snapshot = Snapshot { document: self.document.clone(), cursor: self.cursor };
        Ok(serde_json::to_string(&snapshot)?)
    }

    pub fn restore(&mut self, snapshot: &str) -> Result<()> {
        let Snapshot { document, mut cursor } = serde_json::from_str(snapshot)?;
        let document = if document.pages.is_empty() { Document::default() } else { document };
        cursor.clamp(&document);
        self.document = document;
        self.cursor = cursor;
        self.is_modified = false;
        Ok(())
    }

    pub fn plain_text(&self) -> String {
        formatter::document_to_text(&self.document)
    }
}
