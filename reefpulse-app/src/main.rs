use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod store;
mod workflow;

/// Reef aquarium water-chemistry tracking, diagnosis and dosing
#[derive(Parser, Debug)]
#[command(name = "reefpulse")]
#[command(author, version, about)]
struct Cli {
    /// Settings file (YAML). Missing file means defaults.
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show or change the tank profile
    Profile {
        /// Tank volume in gallons
        #[arg(long)]
        gallons: Option<f64>,
        /// Dominant coral type: sps, lps, mixed or softie
        #[arg(long)]
        coral: Option<String>,
    },

    /// Record a water test and print its diagnosis
    Test {
        /// Readings as key=value pairs, e.g. alkalinity=8.2 calcium=410
        #[arg(required = true, value_parser = parse_key_val)]
        readings: Vec<(String, String)>,
        /// Test date, defaults to now
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the latest test with per-parameter status
    Status,

    /// Plan supplement dosing to raise calcium, alkalinity or magnesium
    Dose {
        /// Parameter to raise
        parameter: String,
        /// Current reading
        current: String,
        /// Target value
        target: String,
        /// Dosing method number, as listed by the command (default 1)
        #[arg(long, default_value_t = 1)]
        method: usize,
        /// Display unit: tsp, tbsp, ml or g
        #[arg(long)]
        unit: Option<String>,
    },

    /// Browse or clear the test history
    #[command(subcommand)]
    History(HistoryCommand),

    /// Import test entries from a CSV file
    Import { file: PathBuf },

    /// Write a CSV import template
    Template { file: PathBuf },

    /// Export the test history as CSV
    Export { file: PathBuf },

    /// List coral presets and their range overrides
    Presets,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List recorded tests, newest first
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show one parameter over time
    Trend { parameter: String },
    /// Remove every recorded test
    Clear,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = config::Settings::load(&cli.config)?;
    let mut session = workflow::Session::open(settings);

    match cli.command {
        Commands::Profile { gallons, coral } => session.update_profile(gallons, coral.as_deref())?,
        Commands::Test { readings, date } => session.record_test(&readings, date.as_deref())?,
        Commands::Status => session.print_status(chrono::Utc::now()),
        Commands::Dose {
            parameter,
            current,
            target,
            method,
            unit,
        } => session.print_dosing_plan(&parameter, &current, &target, method, unit.as_deref())?,
        Commands::History(HistoryCommand::List { limit }) => session.print_history(limit),
        Commands::History(HistoryCommand::Trend { parameter }) => session.print_trend(&parameter)?,
        Commands::History(HistoryCommand::Clear) => session.clear_history(),
        Commands::Import { file } => session.import_csv(&file)?,
        Commands::Template { file } => workflow::write_template_file(&file)?,
        Commands::Export { file } => session.export_csv(&file)?,
        Commands::Presets => workflow::print_presets(),
    }

    Ok(())
}
