//! datatable - browse a JSON array of records in the terminal.

use std::io::{self, Stdout};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use datatable::app::App;
use datatable::cli::Cli;
use datatable::config::Config;
use datatable::data::{infer_columns, into_record_list, load_records};
use datatable::error::{AppError, Result};
use datatable::events::EventHandler;
use datatable::logging;
use datatable::table::DataTable;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_dir = match logging::init() {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let result = run(cli);
    info!("datatable shutting down");

    if let Err(e) = result {
        error!(error = %e, critical = e.is_critical(), "Fatal error");
        eprintln!("{}", e.report());
        if let Some(dir) = log_dir {
            eprintln!("Logs: {}", dir.display());
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    config.validate()?;

    let records = load_records(&cli.data)?;
    let columns = if cli.columns.is_empty() {
        infer_columns(&records)
    } else {
        cli.columns.clone()
    };
    if columns.is_empty() {
        warn!(path = %cli.data.display(), "No columns to show");
    }
    info!(rows = records.len(), columns = columns.len(), "Data loaded");

    let table = DataTable::new(into_record_list(records), columns, config.table.clone());
    let title = cli.data.display().to_string();
    let mut app = App::new(title, table, &config.settings);
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &events);
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event);
    }
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("enter alternate screen: {}", e)))?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| AppError::terminal(format!("disable raw mode: {}", e)))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| AppError::terminal(format!("leave alternate screen: {}", e)))?;
    terminal.show_cursor()?;
    Ok(())
}
