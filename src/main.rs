use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use sun_position::geometry::Geometry;
use sun_position::scene::Scene;
use sun_position::terminal::Terminal;
use sun_position::{Config, Headless, RunOptions, SpaProvider, Tracker};

/// Shows where the sun is relative to your house, updated every second
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Seconds between updates
    #[arg(short, long, default_value = "1", value_parser = parse_interval)]
    interval: Duration,

    /// Only log positions to stdout, without drawing
    #[arg(long)]
    headless: bool,

    /// Stop after this many updates
    #[arg(long)]
    ticks: Option<u64>,

    /// Append log lines to this file while drawing
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_interval(value: &str) -> Result<Duration, String> {
    let secs: f64 = value.parse().map_err(|_| format!("`{value}` is not a number"))?;
    if secs.is_finite() && secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(format!("interval must be a positive number of seconds, got {value}"))
    }
}

/// Routes tracing output: stdout when headless, otherwise the log file or nowhere
fn init_logging(args: &Args) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, ansi) = if args.headless {
        (BoxMakeWriter::new(io::stdout), io::stdout().is_terminal())
    } else if let Some(path) = &args.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        (BoxMakeWriter::new(Mutex::new(file)), false)
    } else {
        // The display owns the terminal; the status row shows the latest line
        (BoxMakeWriter::new(io::sink), false)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .init();
    Ok(())
}

fn run_display(tracker: &mut Tracker<SpaProvider>, options: RunOptions) -> io::Result<()> {
    let mut term = Terminal::enter()?;
    tracker.run(&mut term, options)?;
    term.restore()
}

/// Logs to stdout until Ctrl+C or the tick limit
fn run_headless(tracker: &mut Tracker<SpaProvider>, options: RunOptions) -> io::Result<()> {
    let mut headless = Headless::on_interrupt().map_err(io::Error::other)?;
    tracker.run(&mut headless, options)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, location) = match Config::load(&args.config).and_then(|config| {
        let location = config.location()?;
        Ok((config, location))
    }) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Error reading configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&args) {
        eprintln!("Cannot open log file: {err}");
        return ExitCode::FAILURE;
    }
    info!(
        config = %args.config.display(),
        direction = config.house.direction,
        "configuration loaded"
    );

    let scene = Scene::new(Geometry::default(), config.orientation());
    let mut tracker = Tracker::new(SpaProvider, location, scene);
    let options = RunOptions {
        interval: args.interval,
        max_ticks: args.ticks,
    };

    let result = if args.headless {
        run_headless(&mut tracker, options)
    } else {
        run_display(&mut tracker, options)
    };

    match result {
        Ok(()) => {
            info!(ticks = tracker.ticks(), "stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "frontend failure");
            eprintln!("Frontend error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_must_be_positive() {
        assert_eq!(parse_interval("1").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_interval("0.5").unwrap(), Duration::from_millis(500));
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("-2").is_err());
        assert!(parse_interval("soon").is_err());
    }

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
