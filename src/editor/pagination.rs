// src/editor/pagination.rs
use super::buffer::{Block, Document, Page};
use unicode_width::UnicodeWidthChar;

pub const DEFAULT_MAX_PAGE_HEIGHT: f32 = 9.0;
pub const DEFAULT_BOTTOM_MARGIN: f32 = 0.5;
pub const DEFAULT_PAGE_PADDING: f32 = 1.0;

/// Height of a rendered block, in inches.
pub trait Measure {
    fn block_height(&self, block: &Block) -> f32;
}

/// Measures blocks by the number of terminal rows they occupy when
/// hard-wrapped at `columns`.
#[derive(Debug, Clone, Copy)]
pub struct RowMeasure {
    pub columns: u16,
    pub rows_per_inch: f32,
}

impl RowMeasure {
    pub fn new(columns: u16, rows_per_inch: f32) -> Self {
        RowMeasure {
            columns: columns.max(1),
            rows_per_inch: if rows_per_inch > 0.0 { rows_per_inch } else { 1.0 },
        }
    }

    /// Wrapped rows of `text` as (first char index, row text) pairs.
    /// Every `\n`-separated line yields at least one row.
    pub fn wrap(&self, text: &str) -> Vec<(usize, String)> {
        let columns = self.columns.max(1) as usize;
        let mut rows = Vec::new();
        let mut start = 0;
        let mut current = String::new();
        let mut width = 0;

        for (idx, ch) in text.chars().enumerate() {
            if ch == '\n' {
                rows.push((start, std::mem::take(&mut current)));
                start = idx + 1;
                width = 0;
                continue;
            }
            let cw = ch.width().unwrap_or(0);
            if width + cw > columns && !current.is_empty() {
                rows.push((start, std::mem::take(&mut current)));
                start = idx;
                width = 0;
            }
            current.push(ch);
            width += cw;
        }
        rows.push((start, current));
        rows
    }

    pub fn rows(&self, block: &Block) -> usize {
        self.wrap(block.text()).len()
    }

    /// Row and display column of char index `col` inside `text`.
    pub fn locate(&self, text: &str, col: usize) -> (usize, usize) {
        let rows = self.wrap(text);
        let row = rows
            .iter()
            .rposition(|(start, _)| *start <= col)
            .unwrap_or(0);
        let (start, content) = &rows[row];
        let x = content
            .chars()
            .take(col.saturating_sub(*start))
            .map(|c| c.width().unwrap_or(0))
            .sum();
        (row, x)
    }
}

impl Measure for RowMeasure {
    fn block_height(&self, block: &Block) -> f32 {
        self.rows(block) as f32 / self.rows_per_inch
    }
}

/// Records that blocks `at_block..` of `from_page` moved to page `from_page + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSplit {
    pub from_page: usize,
    pub at_block: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    pub max_page_height: f32,
    pub bottom_margin: f32,
    pub page_padding: f32,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator {
            max_page_height: DEFAULT_MAX_PAGE_HEIGHT,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            page_padding: DEFAULT_PAGE_PADDING,
        }
    }
}

impl Paginator {
    pub fn new(max_page_height: f32, bottom_margin: f32, page_padding: f32) -> Self {
        Paginator { max_page_height, bottom_margin, page_padding }
    }

    pub fn page_height(&self, page: &Page, measure: &dyn Measure) -> f32 {
        self.page_padding
            + page.blocks.iter().map(|b| measure.block_height(b)).sum::<f32>()
    }

    pub fn overflows(&self, page: &Page, measure: &dyn Measure) -> bool {
        self.page_height(page, measure) > self.max_page_height
    }

    /// First block that no longer fits above the bottom margin.
    pub fn split_point(&self, page: &Page, measure: &dyn Measure) -> Option<usize> {
        let limit = self.max_page_height - self.bottom_margin;
        let mut current = 0.0;
        for (i, block) in page.blocks.iter().enumerate() {
            let height = measure.block_height(block);
            if current + height > limit {
                return Some(i);
            }
            current += height;
        }
        None
    }

    /// Moves the excess of an overflowing last page onto new pages.
    /// A block taller than a whole page stays where it is.
    pub fn check_and_move_overflow(
        &self,
        document: &mut Document,
        measure: &dyn Measure,
    ) -> Vec<PageSplit> {
        let mut splits = Vec::new();

        loop {
            let last = document.pages.len() - 1;
            let page = &document.pages[last];
            if !self.overflows(page, measure) {
                break;
            }

            match self.split_point(page, measure) {
                Some(at) if at > 0 && at < page.blocks.len() => {
                    let moved = document.pages[last].blocks.split_off(at);
                    tracing::debug!(page = last, at, moved = moved.len(), "page overflow, splitting");
                    document.pages.push(Page { blocks: moved });
                    splits.push(PageSplit { from_page: last, at_block: at });
                }
                _ => break,
            }
        }

        splits
    }
}
