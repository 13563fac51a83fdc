//! Form Designer - build typed forms in the terminal
//!
//! A Ratatui-based TUI for composing forms from text, textarea, select,
//! checkbox and radio fields, filling them in, validating them, and
//! exchanging them as JSON documents.

mod app;
mod config;
mod platform;
mod state;
mod transfer;
mod ui;

use anyhow::Result;
use app::App;
use config::DesignerConfig;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transfer::{ClipboardTransfer, FileTransfer};

/// Log to a file, since stderr belongs to the terminal UI
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "form_designer=info".into());

    let log_file = DesignerConfig::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        File::options().create(true).append(true).open(path).ok()
    });

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init(),
    }
}

fn main() -> Result<()> {
    init_logging();

    let mut config = DesignerConfig::load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable config");
        DesignerConfig::default()
    });
    if let Some(path) = std::env::args().nth(1) {
        config.document_path = Some(path);
    }

    let document = FileTransfer::new(config.document_path());
    let has_document = document.exists();
    info!(path = %document.path().display(), has_document, "starting");

    let mut app = App::new(config, Box::new(document), Box::new(ClipboardTransfer));
    if has_document {
        if let Err(err) = app.load_document() {
            app.push_error(format!("{err:#}"));
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key)?;
                }
                Event::Paste(text) => app.handle_paste(&text),
                // Resize is picked up by the next draw
                _ => {}
            }
        }

        if app.should_quit() {
            info!("quitting");
            return Ok(());
        }
    }
}
