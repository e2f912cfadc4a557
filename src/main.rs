use std::{
    io,
    process::ExitCode,
    time::Duration,
};

use clap::Parser;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zolldo::{
    app::{input::handle_event, ui::draw, App},
    commands,
    persistence::TaskStore,
    repository::TaskRepository,
    Cli, Cmd,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(commands::exit_code(&err))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "zolldo=debug" } else { "zolldo=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!(path = %cli.data_file.display(), "using task file");
    let repo = TaskRepository::new(TaskStore::new(cli.data_file));

    match cli.cmd {
        Cmd::Gui => launch_tui(repo)?,
        cmd => commands::run(&repo, cmd, &mut io::stdout().lock(), &mut io::stdin().lock())?,
    }

    Ok(())
}

fn launch_tui(repo: TaskRepository) -> Result<()> {
    let mut app = App::new(repo)?;

    // Terminal setup
    enable_raw_mode().context("failed to enable raw mode")?;
    // Ensure proper teardown even on panic
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            let ev = event::read()?;
            if let Event::Key(_) | Event::Resize(_, _) = ev {
                if !handle_event(&mut app, ev) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Restores the terminal on drop (even if we return early)
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}
