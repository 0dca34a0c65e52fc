use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::io::bridge::StorageBridge;
use crate::util::unicode;

use super::app::{App, Mode, NoticeKind};

/// Main render function: header, task list, status row.
pub fn render<B: StorageBridge>(frame: &mut Frame, app: &mut App<B>) {
    let area = frame.area();
    let bg = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_status_row(frame, app, chunks[2]);
}

fn render_header<B: StorageBridge>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let bg = app.theme.background;
    let done = app.store.tasks().iter().filter(|t| t.completed).count();
    let total = app.store.tasks().len();

    let spans = vec![
        Span::styled(
            " tk ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {done}/{total} done "),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
        Span::styled(
            format!(" filter:{} ", app.store.filter().label()),
            Style::default().fg(app.theme.accent).bg(bg),
        ),
        Span::styled(
            format!(" sort:{} ", app.store.sort().label()),
            Style::default().fg(app.theme.accent).bg(bg),
        ),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_list<B: StorageBridge>(frame: &mut Frame, app: &mut App<B>, area: Rect) {
    let height = area.height as usize;
    if height == 0 {
        return;
    }

    // Keep the cursor row inside the viewport
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let editing = if app.mode == Mode::Edit {
        app.store.edit_draft().cloned()
    } else {
        None
    };
    let visible = app.store.visible();
    let width = area.width as usize;

    if visible.is_empty() {
        let message = if app.store.tasks().is_empty() {
            "no tasks yet — press a to add one"
        } else {
            "nothing matches this filter"
        };
        let line = Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ));
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(app.theme.background)),
            area,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (row, task) in visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        let selected = row == app.cursor;
        let row_bg = if selected {
            app.theme.selection_bg
        } else {
            app.theme.background
        };

        let checkbox = if task.completed { "[x] " } else { "[ ] " };
        let checkbox_style = if task.completed {
            Style::default().fg(app.theme.done).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let marker = if selected { "> " } else { "  " };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(checkbox, checkbox_style),
        ];

        match &editing {
            Some(draft) if selected && draft.id == task.id => {
                // In-place edit: draft text with a block cursor at the
                // insertion point
                let (before, after) = draft.text.split_at(app.edit_cursor.min(draft.text.len()));
                let edit_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
                spans.push(Span::styled(before.to_string(), edit_style));
                spans.push(Span::styled(
                    "\u{258C}",
                    Style::default().fg(app.theme.highlight).bg(row_bg),
                ));
                spans.push(Span::styled(after.to_string(), edit_style));
            }
            _ => {
                let mut text_style = Style::default().bg(row_bg);
                text_style = if task.completed {
                    text_style
                        .fg(app.theme.dim)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else if selected {
                    text_style.fg(app.theme.text_bright)
                } else {
                    text_style.fg(app.theme.text)
                };
                let budget = width.saturating_sub(6);
                spans.push(Span::styled(
                    unicode::truncate_to_width(&task.text, budget),
                    text_style,
                ));
            }
        }

        // Pad the row so the selection background spans the full width
        let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        if used < width {
            spans.push(Span::styled(
                " ".repeat(width - used),
                Style::default().bg(row_bg),
            ));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}

/// Render the status row (bottom of screen): notices win, then the mode's
/// own prompt or hints.
fn render_status_row<B: StorageBridge>(frame: &mut Frame, app: &App<B>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(notice) = &app.notice {
        let fg = match notice.kind {
            NoticeKind::Error => app.theme.error,
            NoticeKind::Info => app.theme.accent,
        };
        Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ))
    } else {
        match app.mode {
            Mode::Insert => {
                let (before, after) = app.input.split_at(app.input_cursor.min(app.input.len()));
                let mut spans = vec![
                    Span::styled(" add: ", Style::default().fg(app.theme.accent).bg(bg)),
                    Span::styled(
                        before.to_string(),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                    Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
                    Span::styled(
                        after.to_string(),
                        Style::default().fg(app.theme.text_bright).bg(bg),
                    ),
                ];
                pad_with_hint(&mut spans, "Enter add  Esc back", width, app, bg);
                Line::from(spans)
            }
            Mode::Edit => {
                let mut spans = vec![Span::styled(
                    " editing",
                    Style::default().fg(app.theme.accent).bg(bg),
                )];
                pad_with_hint(&mut spans, "Enter save", width, app, bg);
                Line::from(spans)
            }
            Mode::Navigate => {
                if app.show_key_hints {
                    Line::from(Span::styled(
                        " a add  e edit  space toggle  d delete  f filter  s sort  q quit",
                        Style::default().fg(app.theme.dim).bg(bg),
                    ))
                } else {
                    Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
                }
            }
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn pad_with_hint<B: StorageBridge>(
    spans: &mut Vec<Span<'_>>,
    hint: &'static str,
    width: usize,
    app: &App<B>,
    bg: ratatui::style::Color,
) {
    if !app.show_key_hints {
        return;
    }
    let content: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let hint_width = unicode::display_width(hint);
    if content + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
}
