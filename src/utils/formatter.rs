// src/utils/formatter.rs
use crate::editor::buffer::Document;
use unicode_width::UnicodeWidthChar;

/// Plain-text export: one line per block, a blank line between pages.
pub fn document_to_text(document: &Document) -> String {
    let mut text = String::new();
    for page in &document.pages {
        let body: Vec<&str> = page.blocks.iter().map(|b| b.text()).collect();
        text.push_str(&body.join("\n"));
        text.push_str("\n\n");
    }
    text.trim().to_string()
}

/// Cuts `s` to at most `width` display columns, marking the cut with '…'.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw + 1 > width {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::buffer::{Block, Page};

    #[test]
    fn test_document_to_text() {
        let doc = Document {
            pages: vec![
                Page {
                    blocks: vec![
                        Block::Heading("Interviewer".to_string()),
                        Block::Content("Hello".to_string()),
                    ],
                },
                Page { blocks: vec![Block::Text("Q. Why?".to_string())] },
            ],
        };
        assert_eq!(document_to_text(&doc), "Interviewer\nHello\n\nQ. Why?");
    }

    #[test]
    fn test_blank_document_exports_empty() {
        assert_eq!(document_to_text(&Document::default()), "");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Interviewer", 20), "Interviewer");
        assert_eq!(truncate_to_width("Interviewer", 6), "Inter…");
    }
}
