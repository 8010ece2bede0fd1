use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::tty::IsTty;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{error, info};
use wpm::{
    app::{input_width_for, App, Flow},
    config::{Config, ConfigStore, FileConfigStore},
    error::AppError,
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    terminal::TerminalGuard,
    ui::ui,
};

/// measure words per minute across a writing session
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Record your word count before and after a stretch of writing and get your words per minute. Laps can be chained without re-entering counts."
)]
pub struct Cli {
    /// config file to read (defaults to the platform config dir)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// maximum digits accepted in a wordcount
    #[clap(long)]
    char_limit: Option<usize>,

    /// spinner tick interval in milliseconds
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// hide the ascii banner
    #[clap(long)]
    no_banner: bool,

    /// write logs here instead of the state dir
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// save the effective settings to the config file and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    /// Layer command line overrides on top of file settings
    fn apply(&self, mut config: Config) -> Config {
        if let Some(limit) = self.char_limit {
            config.char_limit = limit;
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        if self.no_banner {
            config.show_banner = false;
        }
        config
    }

    fn store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let log_path = logging::init(cli.log_file.as_deref());
    let store = cli.store();
    let config = cli.apply(store.load());
    config.validate()?;
    info!(?log_path, config = ?config, "starting");

    if cli.write_config {
        store.save(&config)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, AppError::NotATty).exit();
    }

    let mut app = App::new(&config)?;

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    if let Ok(size) = terminal.size() {
        app.input_width = input_width_for(size.width);
    }

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::from_millis(config.tick_rate_ms),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);
    let restored = guard.restore();

    if let Err(e) = &result {
        error!(%e, "event loop failed");
    }
    info!("exiting");
    result?;
    restored?;
    Ok(())
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step().map_err(|_| AppError::InputClosed)?;
        match app.on_event(event) {
            Flow::Quit => break,
            Flow::Redraw => {
                terminal.draw(|f| ui(app, f))?;
            }
            Flow::Continue => {}
        }
    }

    Ok(())
}
