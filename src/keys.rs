use crate::app::{App, InputMode};
use crate::state::messages::UiEvent;
use crate::state::spin_timer::SpinTimer;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    ui_events: &mpsc::Sender<UiEvent>,
) {
    let mut guard = app.lock().await;

    match (guard.input_mode(), key_event.code, key_event.modifiers) {
        // Quit. Plain `q` is text while a label is being edited.
        (_, Char('c'), KeyModifiers::CONTROL) => quit(),
        (mode, Char('q'), _) if mode != InputMode::EditSession => quit(),

        // Edit session: the input field
        (InputMode::EditSession, KeyCode::Enter, _) => guard.commit_edit(),
        (InputMode::EditSession, KeyCode::Esc, _) => guard.cancel_edit(),
        (InputMode::EditSession, KeyCode::Backspace, _) => guard.edit_backspace(),
        (InputMode::EditSession, Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
            guard.edit_input(c)
        }
        (InputMode::EditSession, _, _) => {}

        // Help overlay
        (InputMode::Help, KeyCode::Esc | Char('?'), _) => guard.toggle_help(),
        (InputMode::Help, _, _) => {}

        // Edit mode: sector cursor
        (InputMode::EditMode, Char('l') | Char('j') | KeyCode::Right | KeyCode::Down, _) => {
            guard.cursor_next()
        }
        (InputMode::EditMode, Char('h') | Char('k') | KeyCode::Left | KeyCode::Up, _) => {
            guard.cursor_prev()
        }
        (InputMode::EditMode, KeyCode::Enter, _) => guard.open_editor(),
        (InputMode::EditMode, Char('e') | KeyCode::Esc, _) => guard.toggle_edit_mode(),

        // Wheel
        (InputMode::Wheel, Char(' ') | KeyCode::Enter, _) => {
            if let Some(outcome) = guard.spin() {
                drop(guard);
                let timer = SpinTimer::new(ui_events.clone(), outcome.spin_id, outcome.duration);
                tokio::spawn(timer.run());
                return;
            }
        }
        (InputMode::Wheel, Char('e'), _) => guard.toggle_edit_mode(),

        // Global
        (_, Char('?'), _) => guard.toggle_help(),
        (_, Char('s'), _) => guard.export_svg(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn quit() {
    crate::cleanup_terminal();
    std::process::exit(0);
}
