use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::item::TodoItem;
use crate::store::SaveStatus;
use crate::util::unicode;

use super::app::{App, Mode, View};

/// Top-level render: title row, list, input row, status row.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [title_area, list_area, input_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    fill_background(frame, app, frame.area());
    render_title(frame, app, title_area);
    render_list(frame, app, list_area);
    render_input_row(frame, app, input_area);
    render_status_row(frame, app, status_area);
}

fn fill_background(frame: &mut Frame, app: &App, area: Rect) {
    let bg = Paragraph::new("").style(Style::default().bg(app.theme.background));
    frame.render_widget(bg, area);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        format!(" tick — {} open", app.store.list.len()),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if app.store.config().store.track_completed_separately {
        let (active_style, completed_style) = match app.view {
            View::Active => (
                Style::default().fg(app.theme.highlight).bg(bg),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
            View::Completed => (
                Style::default().fg(app.theme.dim).bg(bg),
                Style::default().fg(app.theme.highlight).bg(bg),
            ),
        };
        spans.push(Span::styled("   ", Style::default().bg(bg)));
        spans.push(Span::styled("Tasks", active_style));
        spans.push(Span::styled(" / ", Style::default().fg(app.theme.dim).bg(bg)));
        spans.push(Span::styled(
            format!("Completed ({})", app.store.list.completed.len()),
            completed_style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let len = app.visible_len();
    if len == 0 {
        let hint = match app.view {
            View::Active => " No tasks — press a to add one",
            View::Completed => " Nothing completed yet",
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let cursor = app.view_cursor().min(len - 1);
    let height = area.height as usize;

    // Keep the cursor row visible
    if cursor < app.scroll_offset {
        app.scroll_offset = cursor;
    } else if height > 0 && cursor >= app.scroll_offset + height {
        app.scroll_offset = cursor - height + 1;
    }
    let scroll = app.scroll_offset;

    let items: &[TodoItem] = match app.view {
        View::Active => &app.store.list.items,
        View::Completed => &app.store.list.completed,
    };
    let mut lines: Vec<Line> = Vec::new();
    for (i, item) in items.iter().enumerate().skip(scroll).take(height) {
        lines.push(render_item_line(app, item, i, i == cursor, area.width));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_item_line(app: &App, item: &TodoItem, index: usize, is_cursor: bool, width: u16) -> Line<'static> {
    let editing = app.view == View::Active && app.store.edit.editing_id() == Some(item.id);
    let selected = app.view == View::Active && app.store.selection.contains(item.id);

    let bg = if is_cursor && app.mode != Mode::Insert {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(
        format!(" {:>2}  ", index + 1),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let mark = if selected {
        "[*] "
    } else if item.done || app.view == View::Completed {
        "[x] "
    } else {
        "[ ] "
    };
    let mark_style = if selected {
        Style::default().fg(app.theme.highlight).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    spans.push(Span::styled(mark.to_string(), mark_style));

    if editing {
        // Render the scratch, not the committed text, with a cursor block
        let (scratch, cursor_at) = match &app.store.edit {
            crate::store::EditState::Editing {
                scratch, cursor, ..
            } => (scratch.clone(), *cursor),
            crate::store::EditState::Idle => (String::new(), 0),
        };
        let style = Style::default().fg(app.theme.text_bright).bg(bg);
        spans.push(Span::styled(scratch[..cursor_at].to_string(), style));
        spans.push(Span::styled(
            "\u{258C}".to_string(),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(scratch[cursor_at..].to_string(), style));
    } else {
        let max = (width as usize).saturating_sub(9);
        let text = unicode::truncate_to_width(&item.text, max);
        let style = if item.done || app.view == View::Completed {
            Style::default()
                .fg(app.theme.done)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if is_cursor {
            Style::default().fg(app.theme.text_bright).bg(bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        spans.push(Span::styled(text, style));
    }

    // Pad cursor line to full width
    if is_cursor {
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let w = width as usize;
        if content_width < w {
            spans.push(Span::styled(
                " ".repeat(w - content_width),
                Style::default().bg(bg),
            ));
        }
    }

    Line::from(spans)
}

fn render_input_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let line = if app.mode == Mode::Insert {
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(
                app.input[..app.input_cursor].to_string(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(
                app.input[app.input_cursor..].to_string(),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
        ])
    } else {
        Line::from(Span::styled(
            " ".repeat(area.width as usize),
            Style::default().bg(bg),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    // A failed write outranks everything else on the status row
    if let SaveStatus::Failed { key, .. } = app.store.save_status() {
        let line = Line::from(Span::styled(
            format!(" save failed for {} — snapshot kept in journal (tk journal)", key),
            Style::default().fg(app.theme.red).bg(bg).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if let Some(ref message) = app.status_message {
        let line = Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if !app.store.config().ui.show_key_hints {
        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(bg)),
            area,
        );
        return;
    }

    let hint = match app.mode {
        Mode::Navigate => {
            if app.view == View::Completed {
                " j/k move  D remove  Tab back  q quit".to_string()
            } else {
                " a add  space done  e edit  v select  D delete  Tab completed  q quit"
                    .to_string()
            }
        }
        Mode::Insert => " Enter add  Esc cancel".to_string(),
        Mode::Edit => " Enter save  Esc cancel".to_string(),
        Mode::Select => format!(
            " {} selected  space toggle  d delete  Esc cancel",
            app.store.selection.len()
        ),
    };
    let line = Line::from(Span::styled(
        hint,
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
