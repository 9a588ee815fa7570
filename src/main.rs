mod app;
mod collectors;
mod config;
mod error;
mod input;
mod models;
mod terminal;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use collectors::{df::DfSource, RecordSource};
use config::Config;
use input::TerminalInput;
use models::disk::SizeMode;
use std::io::{self, IsTerminal};
use terminal::TerminalGuard;
use tracing_subscriber::EnvFilter;

/// Width used when stdout is not a terminal.
const FALLBACK_COLUMNS: u16 = 80;

#[derive(Parser, Debug)]
#[command(name = "diskometer", about = "Proportional filesystem usage gauges", version)]
struct Cli {
    /// Live full-screen view: q quits, m toggles proportional / fill bars
    #[arg(short, long)]
    follow: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::default();
    if cli.follow {
        run_interactive(config)
    } else {
        run_report(config)
    }
}

fn run_report(config: Config) -> Result<()> {
    use ui::{compose::compose_report, report::write_lines};

    let mut source = DfSource::new(config.source.clone());
    let records = source.query().context("querying filesystem capacity")?;

    let stdout = io::stdout();
    let tty = stdout.is_terminal();
    let columns = if tty {
        crossterm::terminal::size().map(|(c, _)| c).unwrap_or(FALLBACK_COLUMNS)
    } else {
        FALLBACK_COLUMNS
    };

    let lines = compose_report(&records, columns, SizeMode::Proportional, &config.thresholds);
    write_lines(&mut stdout.lock(), &lines, tty)?;
    Ok(())
}

fn run_interactive(config: Config) -> Result<()> {
    let source = DfSource::new(config.source.clone());
    let mut app = App::new(config, source);

    let mut guard = TerminalGuard::new()?;
    guard.canvas.clear()?;
    let result = app.run(&mut guard.canvas, &mut TerminalInput);
    drop(guard);

    for m in &app.session.messages {
        println!("{}", m);
    }
    result
}
