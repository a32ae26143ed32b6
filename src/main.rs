mod app;
mod collectors;
mod config;
mod error;
mod input;
mod models;
mod monitor;
mod rates;
mod shutdown;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::App;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use collectors::ProcReader;
use config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use monitor::Monitor;
use ratatui::{backend::CrosstermBackend, Terminal};
use shutdown::StopFlag;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diskmon", about = "Live disk I/O rates and filesystem capacity", version)]
struct Cli {
    /// Seconds between refreshes (0.5 to 86400)
    #[arg(short, long)]
    interval: Option<f64>,

    /// Print a plain text table instead of the full-screen view
    #[arg(long, conflicts_with = "json")]
    plain: bool,

    /// Print one JSON object per refresh
    #[arg(long)]
    json: bool,

    /// Stop after this many refreshes
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Include network filesystems (NFS, CIFS, sshfs, ...)
    #[arg(long)]
    network: bool,

    /// Color theme: default, nord, mono
    #[arg(short = 't', long)]
    theme: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Write logs to this file (the full-screen view discards them otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Interactive,
    Plain,
    Json,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Interactive => "interactive",
            Mode::Plain       => "plain",
            Mode::Json        => "json",
        }
    }
}

impl Cli {
    /// The full-screen view needs a terminal; without one, print plain text.
    fn mode(&self, stdout_is_tty: bool) -> Mode {
        if self.json { Mode::Json }
        else if self.plain || !stdout_is_tty { Mode::Plain }
        else { Mode::Interactive }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "diskmon", &mut io::stdout());
        return Ok(());
    }

    let stdout_is_tty = io::stdout().is_terminal();
    let mode = cli.mode(stdout_is_tty);
    init_logging(cli.verbose, cli.log_file.as_ref(), mode == Mode::Interactive)?;

    let cfg = match &cli.config_file {
        Some(path) => Config::load_from(path),
        None       => Config::load(),
    };
    if cli.config {
        return run_print_config(&cfg, cli.config_file.as_ref());
    }

    let interval_secs = match cli.interval {
        Some(secs) => config::clamp_interval(secs),
        None       => cfg.refresh_interval_secs(),
    };
    let include_network = cli.network || cfg.general.include_network_fs;
    let theme = cli.theme.clone().unwrap_or_else(|| cfg.display.theme.clone());

    info!(
        "diskmon {} starting: interval={}s network_fs={} mode={}",
        env!("CARGO_PKG_VERSION"),
        interval_secs,
        include_network,
        mode.name(),
    );

    let stop = StopFlag::new();
    stop.install_signal_handler();

    let mut reader = ProcReader::new(include_network, cfg.devices.clone());
    let mut monitor = Monitor::new(Duration::from_secs_f64(interval_secs)).with_max_cycles(cli.count);

    match mode {
        Mode::Json => {
            let mut sink = ui::json::JsonSink::new(io::stdout().lock());
            return monitor.run(&mut reader, &mut sink, &stop);
        }
        Mode::Plain => {
            let mut sink = ui::plain::PlainSink::new(io::stdout().lock(), stdout_is_tty);
            return monitor.run(&mut reader, &mut sink, &stop);
        }
        Mode::Interactive => {}
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run_interactive(&mut monitor, &mut reader, &stop, &theme);
    merge_restore(result, restore_terminal())
}

/// The loop's own error wins over a failed terminal restore, which is only
/// logged then.
fn merge_restore(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Ok(()), Err(e)) => Err(e.context("restoring the terminal")),
        (Err(e), Err(r)) => {
            warn!("could not restore the terminal: {:#}", r);
            Err(e)
        }
        (result, Ok(())) => result,
    }
}

fn init_logging(verbose: u8, log_file: Option<&PathBuf>, interactive: bool) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("diskmon={}", level)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // The alternate screen owns stdout and stderr alike.
        None if interactive => builder.with_writer(io::sink).init(),
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run_print_config(cfg: &Config, explicit: Option<&PathBuf>) -> Result<()> {
    let path = explicit
        .cloned()
        .or_else(Config::config_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    print!("{}", toml::to_string_pretty(cfg)?);
    println!();
    println!("# effective refresh interval: {}s (minimum {}s)", cfg.refresh_interval_secs(), config::MIN_INTERVAL_SECS);
    Ok(())
}

fn run_interactive(
    monitor: &mut Monitor,
    reader: &mut ProcReader,
    stop: &StopFlag,
    theme: &str,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let variant = ui::theme::ThemeVariant::from_name(theme);
    info!("interactive view, theme {}", variant.name());
    let mut app = App::new(term, variant);
    app.draw()?;
    monitor.run(reader, &mut app, stop)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
