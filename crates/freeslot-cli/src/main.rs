//! `freeslot` CLI — find free meeting slots across calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots today, using the configured calendars and window
//! freeslot free
//!
//! # Tomorrow and the two days after, 60 minute minimum
//! freeslot free tomorrow+2 --duration 60
//!
//! # Next Thursday, custom window and timezone, as a table
//! freeslot free thursday --availability-start 09:00 --availability-end 17:00 \
//!     --timezone Europe/Paris --pretty
//!
//! # Explicit range against an exported free/busy file
//! freeslot free 2025-05-02..2025-05-09 --busy-file busy.json --calendar primary
//!
//! # Calendars available in the busy source
//! freeslot calendars --busy-file busy.json
//!
//! # Inspect or create the config file
//! freeslot config show
//! freeslot config init
//! ```

mod busy_file;
mod config;
mod daterange;
mod format;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use freeslot_engine::params::parse_timezone;
use freeslot_engine::{DstPolicy, Scheduler, SearchParameters};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::daterange::parse_date_range;

#[derive(Parser)]
#[command(
    name = "freeslot",
    version,
    about = "Find free meeting slots across calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging for troubleshooting
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (defaults to <config dir>/freeslot/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List free time slots in a date range
    Free(FreeArgs),
    /// List the calendar ids available in the busy source
    Calendars {
        /// Free/busy export to read calendars from (overrides BUSY_FILE)
        #[arg(long)]
        busy_file: Option<PathBuf>,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct FreeArgs {
    /// Date range: today, tomorrow, a weekday, or YYYY-MM-DD, optionally +N; or A..B
    date_range: Option<String>,
    /// Minimum slot length in minutes
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    duration: i64,
    /// Start of the daily availability window (HH:MM)
    #[arg(long)]
    availability_start: Option<String>,
    /// End of the daily availability window (HH:MM)
    #[arg(long)]
    availability_end: Option<String>,
    /// IANA timezone for the availability window
    #[arg(long)]
    timezone: Option<String>,
    /// Calendar to include (repeatable; overrides CALENDAR_IDS)
    #[arg(long = "calendar")]
    calendars: Vec<String>,
    /// Free/busy export to read busy times from (overrides BUSY_FILE)
    #[arg(long)]
    busy_file: Option<PathBuf>,
    /// What to do when a window boundary falls in a DST gap
    #[arg(long, value_enum, default_value_t = DstArg::ShiftForward)]
    dst_policy: DstArg,
    /// Print a formatted table
    #[arg(long, conflicts_with = "json")]
    pretty: bool,
    /// Print JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration, including environment overrides
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DstArg {
    ShiftForward,
    Skip,
    Reject,
}

impl From<DstArg> for DstPolicy {
    fn from(arg: DstArg) -> Self {
        match arg {
            DstArg::ShiftForward => DstPolicy::ShiftForward,
            DstArg::Skip => DstPolicy::Skip,
            DstArg::Reject => DstPolicy::Reject,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_path().context("Could not determine the user config directory")?,
    };

    match cli.command {
        Commands::Free(args) => {
            let config = Config::from_file_and_env(&config_path)?;
            run_free(args, config)?;
        }
        Commands::Calendars { busy_file: flag } => {
            let config = Config::from_file_and_env(&config_path)?;
            let path = busy_source(flag, config.busy_file)?;
            let provider = busy_file::load(&path)?;
            let mut ids: Vec<&str> = provider.calendar_ids().collect();
            ids.sort_unstable();
            for id in ids {
                println!("{id}");
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = Config::from_file_and_env(&config_path)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "Config file already exists: {} (use --force to overwrite)",
                        config_path.display()
                    );
                }
                Config::default().save(&config_path)?;
                println!("Wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn busy_source(flag: Option<PathBuf>, configured: Option<PathBuf>) -> Result<PathBuf> {
    match flag.or(configured) {
        Some(path) => Ok(path),
        None => bail!("No busy time source configured: pass --busy-file or set BUSY_FILE"),
    }
}

/// Replace config values with the ones given on the command line.
fn apply_flags(config: &mut Config, args: &mut FreeArgs) {
    if let Some(tz) = args.timezone.take() {
        config.time_zone = tz;
    }
    if let Some(start) = args.availability_start.take() {
        config.availability_start = start;
    }
    if let Some(end) = args.availability_end.take() {
        config.availability_end = end;
    }
    if !args.calendars.is_empty() {
        config.calendar_ids = std::mem::take(&mut args.calendars);
    }
}

fn run_free(mut args: FreeArgs, mut config: Config) -> Result<()> {
    apply_flags(&mut config, &mut args);
    config.validate()?;

    let tz = parse_timezone(&config.time_zone)?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    let (start, end) = parse_date_range(args.date_range.as_deref().unwrap_or("today"), today)?;
    let (availability_start, availability_end) = config.availability_window()?;

    let params = SearchParameters::new(
        start,
        end,
        availability_start,
        availability_end,
        args.duration,
        &config.time_zone,
    )?
    .with_dst_policy(args.dst_policy.into());

    let busy_path = busy_source(args.busy_file, config.busy_file)?;
    let provider = busy_file::load(&busy_path)?;
    let calendar_ids = config.calendar_ids;

    debug!(%start, %end, calendars = ?calendar_ids, "Searching for free slots");
    let scheduler = Scheduler::new(provider, params, calendar_ids)?;
    let report = scheduler.free_slots();

    for (date, error) in report.failures() {
        eprintln!("warning: skipped {date}: {error}");
    }
    if report.all_failed() {
        bail!("Could not search any day in {start}..{end}");
    }

    let slots = report.into_slots();
    let output = if args.json {
        format::json(&slots, tz)?
    } else if args.pretty {
        format::table(&slots, tz)
    } else {
        format::plain(&slots, tz)
    };
    print!("{output}");

    Ok(())
}
