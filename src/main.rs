use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use termfolio::app::App;
use termfolio::config::Config;
use termfolio::mailer::SystemMailer;
use termfolio::prefs::{FilePreferences, PreferenceStore};
use termfolio::theme::{TerminalBackground, ThemeMode};

/// Idle poll timeout when no effect has a pending deadline
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "termfolio", version, about = "A portfolio page for the terminal")]
struct Args {
    /// Path to a page config (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with this theme and persist it as the preference
    #[arg(long, value_parser = parse_theme)]
    theme: Option<ThemeMode>,

    /// Log file path (logging also needs RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable the decorative animations
    #[arg(long)]
    reduced_motion: bool,
}

fn parse_theme(s: &str) -> Result<ThemeMode, String> {
    ThemeMode::parse(s).ok_or_else(|| format!("unknown theme '{}', expected dark or light", s))
}

/// Route tracing to a file; stdout belongs to the alternate screen.
/// Logging being unavailable is never fatal.
fn init_tracing(args: &Args) {
    let path = args.log_file.clone().or_else(|| {
        dirs::config_dir().map(|d| d.join("termfolio").join("termfolio.log"))
    });
    let Some(path) = path else { return };

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file));
    let _ = subscriber.try_init();
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        // Sleep until the next effect deadline (or the idle cap), whichever
        // comes first, unless input arrives earlier
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            let event = event::read()?;
            app.handle_event(&event, Instant::now());
        }
        app.advance(Instant::now());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let mut config = Config::load(args.config.as_deref());
    if args.reduced_motion {
        config.effects.reduced_motion = true;
    }

    let mut prefs = Box::new(FilePreferences::new());
    if let Some(mode) = args.theme {
        prefs.store_theme(mode);
    }

    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    let mut app = App::new(
        config,
        prefs,
        &TerminalBackground,
        Box::new(SystemMailer),
        size.width,
        size.height,
        Instant::now(),
    );

    let result = run(&mut terminal, &mut app);

    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
