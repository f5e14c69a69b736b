// src/ui/mod.rs
use crate::app::{App, Focus, Modal, CLEAR_MESSAGE, CLEAR_TITLE};
use crate::editor::Block as NoteBlock;
use crate::theme::Theme;
use crate::utils::formatter::truncate_to_width;
use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

const SIDEBAR_WIDTH: u16 = 32;

#[derive(Debug, Clone, Copy)]
struct Palette {
    fg: Color,
    bg: Color,
    page_bg: Color,
    accent: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            fg: Color::Black,
            bg: Color::Gray,
            page_bg: Color::White,
            accent: Color::Blue,
            muted: Color::DarkGray,
        },
        Theme::Dark => Palette {
            fg: Color::White,
            bg: Color::Black,
            page_bg: Color::Rgb(30, 30, 36),
            accent: Color::Cyan,
            muted: Color::Gray,
        },
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let p = palette(app.theme);
    let area = frame.size();
    frame.render_widget(Block::default().style(Style::default().fg(p.fg).bg(p.bg)), area);

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(root[0]);

    draw_sidebar(frame, app, body[0], p);
    draw_page(frame, app, body[1], p);
    draw_status(frame, app, root[1], p);

    if let Some(toast) = &app.toast {
        draw_toast(frame, &toast.message, root[0], p);
    }
    if let Some(modal) = &app.modal {
        draw_modal(frame, modal, area, p);
    }
}

fn focus_border(app: &App, focus: Focus, p: Palette) -> Style {
    if app.focus == focus && app.modal.is_none() {
        Style::default().fg(p.accent)
    } else {
        Style::default().fg(p.muted)
    }
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect, p: Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3), Constraint::Length(7)])
        .split(area);

    let name_width = (SIDEBAR_WIDTH as usize).saturating_sub(16);
    let items: Vec<ListItem> = app
        .labels
        .all()
        .map(|label| {
            let marker = if label == app.labels.current() { "● " } else { "  " };
            let badge = app.keybinds.get(label).map(|kb| kb.format()).unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(p.accent)),
                Span::raw(truncate_to_width(label, name_width)),
                Span::raw(" "),
                Span::styled(badge, Style::default().fg(p.muted)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(app, Focus::Sidebar, p))
                .title(" Labels "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if app.focus == Focus::Sidebar {
        state.select(Some(app.sidebar_index));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let input = Paragraph::new(app.label_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(app, Focus::LabelInput, p))
            .title(" New label "),
    );
    frame.render_widget(input, chunks[1]);
    if app.focus == Focus::LabelInput && app.modal.is_none() {
        let x = chunks[1].x + 1 + app.label_input.width() as u16;
        frame.set_cursor(x.min(chunks[1].right().saturating_sub(2)), chunks[1].y + 1);
    }

    let help = vec![
        Line::from("Enter  insert label"),
        Line::from("Tab    switch focus"),
        Line::from("k/d    keybind / remove"),
        Line::from("^Z ^Y  undo / redo"),
        Line::from("^L ^C  clear / copy  ^T ^Q"),
    ];
    let help = Paragraph::new(help)
        .style(Style::default().fg(p.muted))
        .block(Block::default().borders(Borders::TOP).title(" Keys "));
    frame.render_widget(help, chunks[2]);
}

fn block_style(block: &NoteBlock, p: Palette) -> Style {
    match block {
        NoteBlock::Heading(_) => Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        NoteBlock::Content(_) | NoteBlock::Text(_) => Style::default().fg(p.fg),
    }
}

fn draw_page(frame: &mut Frame, app: &App, area: Rect, p: Palette) {
    let measure = app.measure();
    let cursor = app.buffer.cursor;
    let page = &app.buffer.document.pages[cursor.page];

    let page_rows = (app.config.max_page_height * app.config.rows_per_inch).ceil() as u16;
    let width = (app.config.page_columns + 2).min(area.width);
    let height = (page_rows + 2).min(area.height);
    let page_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height,
    };

    let mut lines = Vec::new();
    let mut cursor_row = 0;
    let mut cursor_x = 0;
    for (i, block) in page.blocks.iter().enumerate() {
        if i == cursor.block {
            let (row, x) = measure.locate(block.text(), cursor.col);
            cursor_row = lines.len() + row;
            cursor_x = x;
        }
        let style = block_style(block, p);
        for (_, row) in measure.wrap(block.text()) {
            lines.push(Line::from(Span::styled(row, style)));
        }
    }

    let inner_height = height.saturating_sub(2) as usize;
    let scroll = cursor_row.saturating_sub(inner_height.saturating_sub(1));

    let title = format!(" Page {} of {} ", cursor.page + 1, app.buffer.document.page_count());
    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(p.page_bg))
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(app, Focus::Editor, p))
                .title(title),
        );
    frame.render_widget(Clear, page_area);
    frame.render_widget(paragraph, page_area);

    if app.focus == Focus::Editor && app.modal.is_none() {
        let x = page_area.x + 1 + cursor_x as u16;
        let y = page_area.y + 1 + (cursor_row - scroll) as u16;
        frame.set_cursor(x.min(page_area.right().saturating_sub(1)), y);
    }
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect, p: Palette) {
    let sep = Span::styled(" │ ", Style::default().fg(p.muted));
    let undo = if app.history.can_undo() { "undo ready" } else { "nothing to undo" };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", app.labels.current()), Style::default().fg(p.bg).bg(p.accent)),
        sep.clone(),
        Span::raw(format!(
            "Page {}/{}",
            app.buffer.cursor.page + 1,
            app.buffer.document.page_count()
        )),
        sep.clone(),
        Span::raw(undo),
        sep,
        Span::raw(format!("{} theme", app.theme.as_str())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_toast(frame: &mut Frame, message: &str, area: Rect, p: Palette) {
    let width = (message.width() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.right().saturating_sub(width),
        y: area.bottom().saturating_sub(3),
        width,
        height: 3.min(area.height),
    };
    let toast = Paragraph::new(message).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.page_bg)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(toast, rect);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_modal(frame: &mut Frame, modal: &Modal, area: Rect, p: Palette) {
    let (title, lines) = match modal {
        Modal::ConfirmClear => (
            CLEAR_TITLE.to_string(),
            vec![
                Line::from(CLEAR_MESSAGE),
                Line::from(""),
                Line::from(Span::styled("[Enter] Clear   [Esc] Cancel", Style::default().fg(p.muted))),
            ],
        ),
        Modal::KeybindCapture { label, pending } => (
            format!("Setting keybind for: {}", label),
            vec![
                Line::from("Press a key combination"),
                Line::from(Span::styled(
                    pending.as_ref().map(|kb| kb.format()).unwrap_or_else(|| "-".to_string()),
                    Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[Enter] Save  [Del] Clear  [Esc] Cancel",
                    Style::default().fg(p.muted),
                )),
            ],
        ),
    };

    let rect = centered_rect(56, lines.len() as u16 + 2, area);
    let dialog = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .title(format!(" {} ", title))
            .style(Style::default().fg(p.fg).bg(p.page_bg)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(dialog, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::AppConfig;
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 45)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    fn app() -> App {
        App::new(
            AppConfig::default(),
            Box::new(MemoryStore::new()),
            Box::new(MemoryClipboard::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_renders_labels_and_page() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        for c in "hello".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let screen = render(&app);
        assert!(screen.contains("Labels"));
        assert!(screen.contains("Question"));
        assert!(screen.contains("Page 1 of 1"));
        assert!(screen.contains("hello"));
    }

    #[test]
    fn test_renders_clear_modal() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        let screen = render(&app);
        assert!(screen.contains(CLEAR_TITLE));
    }

    #[test]
    fn test_renders_toast() {
        let mut app = app();
        app.show_toast("Copied to clipboard");
        assert!(render(&app).contains("Copied to clipboard"));
    }
}
