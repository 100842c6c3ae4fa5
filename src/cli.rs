use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::activity::ShadingMode;
use crate::git::SourceKind;

#[derive(Parser)]
#[command(name = "commitmap")]
#[command(about = "Calendar heatmap of commit activity across a folder of git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Folder whose child directories are git repositories")]
    pub root: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (default: ~/.githelperrc)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = SourceKind::Gix, help = "How commit dates are read")]
    pub source: SourceKind,

    #[arg(long, global = true, value_parser = parse_day, help = "Treat this date (YYYY-MM-DD) as today")]
    pub today: Option<NaiveDate>,

    #[arg(long, global = true, help = "Intensity bucket upper bounds, e.g. 0,5,10,15,20")]
    pub thresholds: Option<String>,

    #[arg(long, global = true, value_enum, help = "Fixed thresholds or shading relative to the busiest day")]
    pub shading: Option<ShadingMode>,

    #[arg(long, global = true, help = "Do not remember --root in the settings file")]
    pub no_save: bool,

    #[arg(long, global = true, help = "Hide progress indicators")]
    pub no_progress: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw the trailing-year commit calendar
    Map {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON, one line per day")]
        ndjson: bool,

        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    /// Per-repository commits on one date
    Day {
        #[arg(value_parser = parse_day, help = "Date as YYYY-MM-DD")]
        date: NaiveDate,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Per-repository commits for a calendar cell
    Cell {
        #[arg(long, help = "Weekday row, 0 = Sunday")]
        row: usize,

        #[arg(long, help = "Week column, 0 = oldest")]
        column: usize,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Which repositories were read and which were skipped
    Scan {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Inspect or change stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the settings file
    Show,
    /// Remember the repository folder
    SetRoot { path: PathBuf },
    /// Store bucket upper bounds, e.g. 0,5,10,15,20
    SetThresholds { list: String },
    /// Store the shading mode
    SetShading {
        #[arg(value_enum)]
        mode: ShadingMode,
    },
}

fn parse_day(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let interactive = matches!(self.command, Commands::Map { interactive: true, .. });
        crate::logging::init(self.common.verbose, interactive);

        match self.command {
            Commands::Map { json, ndjson, interactive } => {
                crate::activity::exec::exec_map(&self.common, json, ndjson, interactive)
            }
            Commands::Day { date, json } => crate::activity::exec::exec_day(&self.common, date, json),
            Commands::Cell { row, column, json } => {
                crate::activity::exec::exec_cell(&self.common, row, column, json)
            }
            Commands::Scan { json } => crate::activity::exec::exec_scan(&self.common, json),
            Commands::Config { action } => crate::config::exec(&self.common, action),
        }
    }
}
