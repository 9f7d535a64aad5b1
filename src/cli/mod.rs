pub mod init;
pub mod reconcile;
pub mod status;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{ReconError, Result};
use crate::models::DateWindow;

#[derive(Parser)]
#[command(
    name = "glrecon",
    version,
    about = "Reconcile general-ledger postings against cheque records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose where company stores live and where exports are written.
    Init {
        /// Root folder with one sub-folder per company (default: ~/Documents/glrecon)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Folder for <COMPANY>_gl_data.csv exports (default: current directory)
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
    /// Show the current settings.
    Status,
    /// Reconcile a company's ledger against its cheques and export the result.
    Reconcile {
        /// Company identifier; also the store folder name under the data dir
        company: String,
        /// Start date (inclusive): YYYY/MM/DD or YYYY-MM-DD
        #[arg(long = "from")]
        from_date: String,
        /// End date (inclusive): YYYY/MM/DD or YYYY-MM-DD
        #[arg(long = "to")]
        to_date: String,
        /// Store folder holding TRN/TRM/TRN_CHEQUE (or GW) CSV tables
        #[arg(long)]
        source: Option<String>,
        /// Output folder (overrides settings)
        #[arg(long)]
        output: Option<String>,
        /// Skip the monthly summary
        #[arg(long)]
        quiet: bool,
    },
}

pub fn parse_cli_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    ["%Y/%m/%d", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| ReconError::InvalidDate(format!("{raw} (expected YYYY/MM/DD)")))
}

pub fn parse_window(from: &str, to: &str) -> Result<DateWindow> {
    let start = parse_cli_date(from)?;
    let end = parse_cli_date(to)?;
    if start > end {
        return Err(ReconError::InvalidDate(format!(
            "--from {start} is after --to {end}"
        )));
    }
    Ok(DateWindow::new(start, end))
}
