use nsi_explorer::app::App;
use nsi_explorer::cli::{AppConfig, Args, Command};
use nsi_explorer::commands::{run_export, run_list, run_preview};
use nsi_explorer::config::UserConfig;
use nsi_explorer::logging::{init_tracing, LogTarget};
use nsi_explorer::tui::render;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{env, io, path::PathBuf, time::Duration};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Convert to config
    let config: AppConfig = args.into();

    // The TUI owns the terminal, so it logs to a file
    let log_target = match (&config.command, LogTarget::default_file()) {
        (None, Some(path)) => LogTarget::File(path),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = init_tracing(&config.log_level, config.log_json, &log_target) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    // Load user configuration
    let user_config = UserConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load user config, using defaults");
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    match &config.command {
        Some(command) => {
            if let Err(e) = run_command(command, &config, &user_config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_app_with_config(&config, user_config),
    }
}

fn run_command(
    command: &Command,
    config: &AppConfig,
    user_config: &UserConfig,
) -> nsi_explorer::Result<()> {
    let mut stdout = io::stdout().lock();

    match command {
        Command::List { search, json } => {
            run_list(&config.directory, search.as_deref(), *json, &mut stdout)
        }
        Command::Export { output } => {
            let written = run_export(&config.directory, output.as_deref(), user_config)?;
            eprintln!("Exported to {}", written.display());
            Ok(())
        }
        Command::Preview { file, html } => run_preview(file, *html, user_config, &mut stdout),
    }
}

/// Runs the TUI application with configuration
pub fn run_app_with_config(config: &AppConfig, user_config: UserConfig) -> io::Result<()> {
    tracing::info!(root = %config.directory.display(), "Starting explorer");

    let export_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut app = App::new(config.directory.clone(), user_config, export_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("Explorer closed");
    result
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if !app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
