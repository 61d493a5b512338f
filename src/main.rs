mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::info;
use plpredict_api::client::PredictorApi;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, PartialEq)]
enum CliAction {
    Run { api_url: Option<String> },
    Help,
    Version,
    Invalid(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_url = match parse_cli_args(std::env::args().skip(1)) {
        CliAction::Run { api_url } => api_url,
        CliAction::Help => {
            println!("{}", usage_text());
            return Ok(());
        }
        CliAction::Version => {
            println!("plpredict {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        CliAction::Invalid(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    better_panic::install();

    let settings = AppSettings::load(api_url);

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Error);
    log::set_max_level(log::LevelFilter::Error);

    let client = PredictorApi::new(settings.api_url.clone());
    info!("using prediction backend at {}", client.base_url());
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Trigger first page load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn parse_cli_args(mut args: impl Iterator<Item = String>) -> CliAction {
    let mut api_url = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return CliAction::Help,
            "-V" | "--version" => return CliAction::Version,
            "--api-url" => match args.next() {
                Some(url) => api_url = Some(url),
                None => return CliAction::Invalid("--api-url needs a value".to_string()),
            },
            other => {
                if let Some(url) = other.strip_prefix("--api-url=") {
                    api_url = Some(url.to_string());
                } else {
                    return CliAction::Invalid(format!("Unknown argument: {other}"));
                }
            }
        }
    }
    CliAction::Run { api_url }
}

fn usage_text() -> &'static str {
    "plpredict - Premier League match predictions in your terminal

Usage:
  plpredict [--api-url <URL>]
  plpredict --help
  plpredict --version

Environment:
  PLPREDICT_API_URL   Prediction backend base URL (default http://127.0.0.1:5050)
  PLPREDICT_LOG       Log level for the log pane: error, warn, info, debug, trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, &network_requests).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    match ui_event {
        UiEvent::AppStarted => {
            let request = app.lock().await.load_first_page();
            let _ = network_requests.send(request).await;
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
        }
        UiEvent::Resize => {}
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) {
    if let NetworkResponse::LoadingStateChanged { loading_state } = response {
        *loading = loading_state;
        return;
    }
    app.lock().await.on_network_response(response);
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        parse_cli_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_runs_with_configured_url() {
        assert_eq!(parse(&[]), CliAction::Run { api_url: None });
    }

    #[test]
    fn api_url_accepts_both_forms() {
        let expected = CliAction::Run { api_url: Some("http://h:1".into()) };
        assert_eq!(parse(&["--api-url", "http://h:1"]), expected);
        assert_eq!(parse(&["--api-url=http://h:1"]), expected);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["-h"]), CliAction::Help);
        assert_eq!(parse(&["--version"]), CliAction::Version);
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(matches!(parse(&["--api-url"]), CliAction::Invalid(_)));
        assert!(matches!(parse(&["--bogus"]), CliAction::Invalid(_)));
    }
}
