use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::bridge::StorageBridge;
use crate::store::StoreError;
use crate::util::unicode;

use super::app::{App, Mode, Notice};

/// Handle a key event in the current mode
pub fn handle_key<B: StorageBridge>(app: &mut App<B>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // Any key acknowledges a pending notice
    app.notice = None;

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert => handle_insert(app, key),
        Mode::Edit => handle_edit(app, key),
    }
}

fn handle_navigate<B: StorageBridge>(app: &mut App<B>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.store.visible().len().saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_current(app),
        KeyCode::Char('a') | KeyCode::Char('i') => app.mode = Mode::Insert,
        KeyCode::Char('e') | KeyCode::Enter => begin_edit_current(app),
        KeyCode::Char('d') => remove_current(app),
        KeyCode::Char('f') => {
            let filter = app.store.filter().cycle();
            app.store.set_filter(filter);
            app.clamp_cursor();
        }
        KeyCode::Char('s') => {
            let sort = app.store.sort().cycle();
            app.store.set_sort(sort);
            app.clamp_cursor();
        }
        _ => {}
    }
}

fn move_cursor<B: StorageBridge>(app: &mut App<B>, delta: isize) {
    let len = app.store.visible().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    let next = app.cursor as isize + delta;
    app.cursor = next.clamp(0, len as isize - 1) as usize;
}

fn toggle_current<B: StorageBridge>(app: &mut App<B>) {
    let Some(id) = app.cursor_task() else { return };
    let result = app.store.toggle_completion(id);
    report(app, result);
    // Under a narrowing filter the toggled task may leave the view
    app.clamp_cursor();
}

fn remove_current<B: StorageBridge>(app: &mut App<B>) {
    let Some(id) = app.cursor_task() else { return };
    let result = app.store.remove_task(id);
    report(app, result);
    app.clamp_cursor();
}

fn begin_edit_current<B: StorageBridge>(app: &mut App<B>) {
    let Some(id) = app.cursor_task() else { return };
    let Some(task) = app.store.find(id) else { return };
    let text = task.text.clone();
    app.edit_cursor = text.len();
    app.store.begin_edit(id, &text);
    app.mode = Mode::Edit;
}

fn handle_insert<B: StorageBridge>(app: &mut App<B>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => submit_new_task(app),
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.input, app.input_cursor) {
                app.input.replace_range(prev..app.input_cursor, "");
                app.input_cursor = prev;
            }
        }
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.input, app.input_cursor) {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.input, app.input_cursor) {
                app.input_cursor = next;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input.len(),
        KeyCode::Char(c) => {
            app.input.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn submit_new_task<B: StorageBridge>(app: &mut App<B>) {
    match app.store.add_task(&app.input) {
        Ok(_) => {
            app.input.clear();
            app.input_cursor = 0;
            // Put the cursor on the freshly added task (last under the
            // default order)
            app.cursor = app.store.visible().len().saturating_sub(1);
        }
        Err(e) => app.notice = Some(Notice::error(e.to_string())),
    }
}

fn handle_edit<B: StorageBridge>(app: &mut App<B>, key: KeyEvent) {
    let Some(draft) = app.store.edit_draft() else {
        // The edited task vanished under us (external reload)
        app.mode = Mode::Navigate;
        return;
    };
    let id = draft.id;
    let mut text = draft.text.clone();

    match key.code {
        KeyCode::Enter => {
            let result = app.store.commit_edit(id, &text);
            report(app, result);
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&text, app.edit_cursor) {
                text.replace_range(prev..app.edit_cursor, "");
                app.edit_cursor = prev;
                app.store.set_edit_draft(&text);
            }
        }
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&text, app.edit_cursor) {
                app.edit_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(&text, app.edit_cursor) {
                app.edit_cursor = next;
            }
        }
        KeyCode::Home => app.edit_cursor = 0,
        KeyCode::End => app.edit_cursor = text.len(),
        KeyCode::Char(c) => {
            text.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
            app.store.set_edit_draft(&text);
        }
        // There is no cancel: an edit ends by committing (Enter) or by
        // starting an edit on another task.
        _ => {}
    }
}

fn report<B: StorageBridge>(app: &mut App<B>, result: Result<(), StoreError>) {
    if let Err(e) = result {
        log::warn!("{e}");
        app.notice = Some(Notice::error(e.to_string()));
    }
}
