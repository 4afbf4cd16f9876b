mod app;
mod format;
mod market;
mod news;
mod portfolio;
mod sentiment;
mod series;
mod theme;
mod tui;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use app::App;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, ValueEnum)]
enum ThemeChoice {
    /// Use the persisted preference (dark on first run)
    Saved,
    Dark,
    Light,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "CoinPulse: a terminal crypto market dashboard running on simulated data",
    after_help = "EXAMPLES:
    # Launch the dashboard
    cargo run --release

    # Force the light theme for this session
    cargo run --release -- --theme light

    # Slow the market simulation down to one tick per 30 seconds
    cargo run --release -- --market-tick-secs 30"
)]
struct Args {
    /// Theme for this session. `saved` reads the persisted preference.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Saved)]
    theme: ThemeChoice,

    /// Directory for persisted state (theme preference). Defaults to the
    /// platform config dir, falling back to the current directory.
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Seconds between simulated market updates
    #[arg(long, default_value_t = 5)]
    market_tick_secs: u64,

    /// Write logs to this file instead of stderr (stderr logging corrupts the
    /// alternate screen, so the default is to log nowhere while the TUI runs)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn pref_path(state_dir: Option<PathBuf>) -> PathBuf {
    let dir = state_dir.unwrap_or_else(|| {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .map(|base| base.join("coinpulse"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    dir.join("preferences.json")
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("coinpulse_tui=info"));
    match &args.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::sink)
                .init();
        }
    }

    let pref_path = pref_path(args.state_dir);
    let mode = match args.theme {
        ThemeChoice::Saved => theme::load_mode(&pref_path),
        ThemeChoice::Dark => theme::Mode::Dark,
        ThemeChoice::Light => theme::Mode::Light,
    };
    info!("Starting with {:?} theme, preferences at {}", mode, pref_path.display());

    let mut terminal = tui::init()?;
    let mut app = App::new(
        mode,
        pref_path,
        Duration::from_secs(args.market_tick_secs.max(1)),
    );
    let res = app.run(&mut terminal).await;

    tui::restore()?;

    if let Err(e) = res {
        error!("Error: {:?}", e);
    }

    Ok(())
}
