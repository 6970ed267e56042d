use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::{AppState, Dialog, DialogKind, Dispatcher, InputMode, Request};
use crate::ui;

/// What the loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Dispatch(Request),
    Quit,
}

impl From<Option<Request>> for Flow {
    fn from(request: Option<Request>) -> Self {
        request.map(Flow::Dispatch).unwrap_or(Flow::Continue)
    }
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: AppState,
    mut dispatcher: Dispatcher,
) -> Result<()> {
    if let Some(req) = app.request_list() {
        dispatcher.dispatch(req);
    }

    loop {
        while let Some(done) = dispatcher.try_next() {
            app.apply_completion(done);
        }

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(&mut app, key) {
                        Flow::Quit => break,
                        Flow::Dispatch(req) => dispatcher.dispatch(req),
                        Flow::Continue => {}
                    }
                }
            }
        }
    }
    Ok(())
}

/// Route one key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key.code);
            Flow::Continue
        }
        InputMode::Dialog => handle_dialog_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    let rpp = app.rows_per_page.max(1) as isize;
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::Refresh => return app.request_list().into(),
        KeyAction::StartSearch => {
            app.search_query.clear();
            app.input_mode = InputMode::Search;
            app.refresh_view();
        }
        KeyAction::NewUsuario => app.toggle_dialog(DialogKind::Insert),
        KeyAction::EditSelection => app.toggle_dialog(DialogKind::Edit),
        KeyAction::DeleteSelection => app.toggle_dialog(DialogKind::Delete),
        KeyAction::MoveUp => app.move_selection(-1),
        KeyAction::MoveDown => app.move_selection(1),
        KeyAction::PageUp => app.move_selection(-rpp),
        KeyAction::PageDown => app.move_selection(rpp),
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.search_query.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => app.search_query.push(c),
        _ => return,
    }
    app.refresh_view();
}

fn is_ctrl_chord(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn handle_dialog_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.dialog.clone() {
        Dialog::Closed => {
            // stale mode; fall back to the grid
            app.input_mode = InputMode::Normal;
            Flow::Continue
        }
        Dialog::Insert | Dialog::Edit(_) => match key.code {
            KeyCode::Esc => {
                app.close_dialog();
                Flow::Continue
            }
            KeyCode::Enter => app.submit().into(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                app.selection.focus = app.selection.focus.next();
                Flow::Continue
            }
            KeyCode::Backspace => {
                let field = app.selection.focus;
                let mut value = app.selection.value(field).to_string();
                value.pop();
                app.edit_field(field, value);
                Flow::Continue
            }
            // AltGr arrives as Ctrl+Alt on some terminals
            KeyCode::Char(c) if !is_ctrl_chord(key.modifiers) => {
                let field = app.selection.focus;
                let mut value = app.selection.value(field).to_string();
                value.push(c);
                app.edit_field(field, value);
                Flow::Continue
            }
            _ => Flow::Continue,
        },
        Dialog::Delete(_) => match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => app.submit().into(),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                app.close_dialog();
                Flow::Continue
            }
            _ => Flow::Continue,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Usuario, UsuarioDraft, UsuarioId};
    use crate::app::{Completion, DraftField};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(app, key(KeyCode::Char(c))), Flow::Continue);
        }
    }

    fn loaded() -> AppState {
        let mut app = AppState::new("memory://keys");
        app.request_list();
        app.apply_completion(Completion::Listed(Ok(vec![Usuario::new(1, "Ana", "Ruiz")])));
        app
    }

    #[test]
    fn insert_dialog_collects_both_fields() {
        let mut app = loaded();
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.dialog, Dialog::Insert);

        type_text(&mut app, "Luiz");
        handle_key(&mut app, key(KeyCode::Backspace));
        type_text(&mut app, "s");
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.selection.focus, DraftField::Apellidos);
        type_text(&mut app, "Diaz");

        let flow = handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(flow, Flow::Dispatch(Request::Create(UsuarioDraft::new("Luis", "Diaz"))));
    }

    #[test]
    fn altgr_characters_reach_the_form() {
        let mut app = loaded();
        handle_key(&mut app, key(KeyCode::Char('n')));
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('@'), altgr));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(app.selection.nombre, "@");
    }

    #[test]
    fn typing_q_in_a_form_does_not_quit() {
        let mut app = loaded();
        handle_key(&mut app, key(KeyCode::Char('n')));
        type_text(&mut app, "q");
        assert_eq!(app.selection.nombre, "q");
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.dialog, Dialog::Closed);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), Flow::Quit);
    }

    #[test]
    fn delete_confirmation_accepts_y_and_refuses_n() {
        let mut app = loaded();
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.dialog, Dialog::Delete(UsuarioId::Number(1)));
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.dialog, Dialog::Closed);

        handle_key(&mut app, key(KeyCode::Delete));
        let flow = handle_key(&mut app, key(KeyCode::Char('y')));
        assert_eq!(flow, Flow::Dispatch(Request::Delete { id: UsuarioId::Number(1) }));
        // a second confirmation while the first is pending sends nothing
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), Flow::Continue);
    }

    #[test]
    fn search_mode_filters_and_escape_restores() {
        let mut app = loaded();
        app.apply_completion(Completion::Created(Ok(Usuario::new(2, "Luis", "Diaz"))));
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);
        type_text(&mut app, "diaz");
        assert_eq!(app.usuarios.len(), 1);
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.usuarios.len(), 2);
    }

    #[test]
    fn refresh_dispatches_list_once() {
        let mut app = loaded();
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('r'))), Flow::Dispatch(Request::List));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('r'))), Flow::Continue);
    }
}
