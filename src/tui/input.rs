use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::store::ToggleOutcome;

use super::app::{App, Mode, View};

/// Route a key press to the handler for the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    app.status_message = None;
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert => handle_insert(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Select => handle_select(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') => app.set_view_cursor(0),
        KeyCode::Char('G') => {
            let len = app.visible_len();
            app.set_view_cursor(len.saturating_sub(1));
        }
        KeyCode::Tab => switch_view(app),
        KeyCode::Char('a') | KeyCode::Char('i') => {
            if app.view == View::Active {
                app.input_clear();
                app.mode = Mode::Insert;
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => toggle_at_cursor(app),
        KeyCode::Char('e') => begin_edit_at_cursor(app),
        KeyCode::Char('v') => {
            if app.view == View::Active && !app.store.list.is_empty() {
                app.store.toggle_select(app.cursor);
                app.mode = Mode::Select;
            }
        }
        KeyCode::Char('D') => remove_at_cursor(app),
        _ => {}
    }
}

fn handle_insert(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let text = app.input.clone();
            if app.store.add(&text).is_some() {
                app.input_clear();
                app.cursor = app.store.list.len() - 1;
                app.mode = Mode::Navigate;
                report_save(app);
            } else {
                // blank input: the guard rejected it, nothing changed
                app.set_status("nothing to add");
            }
        }
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Left => app.input_left(),
        KeyCode::Right => app.input_right(),
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input.len(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_insert(c);
        }
        _ => {}
    }
}

fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.store.cancel_edit();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            app.store.commit_edit();
            app.mode = Mode::Navigate;
            report_save(app);
        }
        KeyCode::Backspace => app.store.edit.backspace(),
        KeyCode::Left => app.store.edit.cursor_left(),
        KeyCode::Right => app.store.edit.cursor_right(),
        KeyCode::Home => app.store.edit.cursor_home(),
        KeyCode::End => app.store.edit.cursor_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.store.edit.insert_char(c);
        }
        _ => {}
    }
}

fn handle_select(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.store.clear_selection();
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char(' ') | KeyCode::Char('v') => {
            app.store.toggle_select(app.cursor);
            if app.store.selection.is_empty() {
                app.mode = Mode::Navigate;
            }
        }
        KeyCode::Char('d') | KeyCode::Char('x') => {
            let removed = app.store.remove_selected();
            app.clamp_cursors();
            app.mode = Mode::Navigate;
            app.set_status(format!("removed {} item(s)", removed));
            report_save(app);
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Shared actions
// ---------------------------------------------------------------------------

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible_len();
    if len == 0 {
        return;
    }
    let cursor = app.view_cursor() as isize + delta;
    app.set_view_cursor(cursor.clamp(0, len as isize - 1) as usize);
}

fn switch_view(app: &mut App) {
    if !app.store.config().store.track_completed_separately {
        return;
    }
    app.view = match app.view {
        View::Active => View::Completed,
        View::Completed => View::Active,
    };
    app.scroll_offset = 0;
}

fn toggle_at_cursor(app: &mut App) {
    match app.view {
        View::Active => match app.store.toggle_done(app.cursor) {
            Ok(ToggleOutcome::MovedToCompleted) => {
                app.clamp_cursors();
                report_save(app);
            }
            Ok(ToggleOutcome::Toggled(_)) => report_save(app),
            // stale cursor on an empty/shrunk list: contained as a no-op
            Err(_) => {}
        },
        View::Completed => {}
    }
}

fn begin_edit_at_cursor(app: &mut App) {
    if app.view != View::Active {
        return;
    }
    if app.store.begin_edit(app.cursor).is_ok() {
        app.mode = Mode::Edit;
    }
}

fn remove_at_cursor(app: &mut App) {
    let result = match app.view {
        View::Active => app.store.remove_at(app.cursor).map(|i| i.text),
        View::Completed => app
            .store
            .remove_from_completed(app.completed_cursor)
            .map(|i| i.text),
    };
    if let Ok(text) = result {
        app.clamp_cursors();
        app.set_status(format!("removed: {}", text));
        report_save(app);
    }
}

/// Surface a failed write in the status row; the journal has the snapshot.
fn report_save(app: &mut App) {
    if let crate::store::SaveStatus::Failed { key, .. } = app.store.save_status() {
        let key = key.clone();
        app.set_status(format!("save failed for {} — see tk journal", key));
    }
}
