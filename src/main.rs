mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::{App, build_wheel};
use crate::state::app_settings::AppSettings;
use crate::state::messages::UiEvent;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};
use wheel_core::scene::{self, DEFAULT_RADIUS};
use wheel_core::export;

/// ~30 FPS while the wheel is turning.
const ANIMATION_TICK: Duration = Duration::from_millis(33);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args()? {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let app = Arc::new(Mutex::new(App::new()));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Animation tick thread
    let anim_tx = ui_event_tx.clone();
    let animation_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(ANIMATION_TICK);
        loop {
            interval.tick().await;
            if anim_tx.send(UiEvent::AnimationTick).await.is_err() {
                break;
            }
        }
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, ui_event_tx).await;

    input_handler.abort();
    animation_task.abort();

    Ok(())
}

/// Handles the non-interactive flags. Returns true when the process should
/// exit instead of starting the terminal UI.
fn handle_cli_args() -> anyhow::Result<bool> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Ok(false);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            Ok(true)
        }
        "-V" | "--version" => {
            println!("luckywheel {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        "--svg" => {
            let settings = AppSettings::load();
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| settings.svg_path.clone());
            let scene = scene::render(&build_wheel(&settings).snapshot(), DEFAULT_RADIUS)?;
            export::save(&scene, &path)?;
            println!("wrote {}", path.display());
            Ok(true)
        }
        "--json" => {
            let settings = AppSettings::load();
            let scene = scene::render(&build_wheel(&settings).snapshot(), DEFAULT_RADIUS)?;
            println!("{}", serde_json::to_string_pretty(&scene)?);
            Ok(true)
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "luckywheel - spin a prize wheel in the terminal

Usage:
  luckywheel
  luckywheel --svg [PATH]   Write the wheel as SVG and exit
  luckywheel --json         Print the wheel scene as JSON and exit
  luckywheel --help
  luckywheel --version

Environment:
  LUCKYWHEEL_LABELS     Comma-separated prize labels
  LUCKYWHEEL_COLORS     Comma-separated #RRGGBB sector colours
  LUCKYWHEEL_SPIN_MS    Spin duration in milliseconds (default 5000)
  LUCKYWHEEL_TURNS      Full turns before the random offset (default 5)
  LUCKYWHEEL_SVG_PATH   SVG export path (default luckywheel.svg)
  LUCKYWHEEL_LOG        Log level: error, warn, info, debug, trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    ui_event_tx: mpsc::Sender<UiEvent>,
) {
    while let Some(ui_event) = ui_events.recv().await {
        let should_redraw = handle_ui_event(ui_event, &app, &ui_event_tx).await;
        if should_redraw {
            let mut app_guard = app.lock().await;
            draw::draw(&mut terminal, &mut app_guard);
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    ui_events: &mpsc::Sender<UiEvent>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted | UiEvent::Resize => true,
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, ui_events).await;
            true
        }
        UiEvent::AnimationTick => {
            let guard = app.lock().await;
            // Idle ticks only matter when the log pane is open.
            guard.is_animating() || guard.state.show_logs
        }
        UiEvent::SpinSettled { spin_id } => {
            let mut guard = app.lock().await;
            guard.on_spin_settled(spin_id);
            true
        }
    }
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
    execute!(
        stdout,
        cursor::Hide,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All)
    )?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
