use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    let request = match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        (_, Char('?'), _) => {
            guard.update_tab(MenuItem::Help);
            None
        }
        (MenuItem::Help, KeyCode::Esc, _) => {
            guard.exit_help();
            None
        }

        // Rows
        (MenuItem::Matches, Char('j') | KeyCode::Down, _) => {
            guard.cursor_down();
            None
        }
        (MenuItem::Matches, Char('k') | KeyCode::Up, _) => {
            guard.cursor_up();
            None
        }
        (MenuItem::Matches, KeyCode::Enter | Char(' '), _) => guard.activate_row(),

        // Pages
        (MenuItem::Matches, Char('h') | KeyCode::Left, _) => guard.prev_page(),
        (MenuItem::Matches, Char('l') | KeyCode::Right, _) => guard.next_page(),
        (MenuItem::Matches, Char('r'), _) => Some(guard.reload_page()),

        // Global
        (_, Char('f'), _) => {
            guard.toggle_full_screen();
            None
        }
        (_, Char('"'), _) => {
            guard.toggle_show_logs();
            None
        }

        _ => None,
    };

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
