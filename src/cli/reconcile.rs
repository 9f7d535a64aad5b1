use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::parse_window;
use crate::error::Result;
use crate::export::{export_path, write_table};
use crate::fmt::amount;
use crate::reconciler;
use crate::settings::load_settings;
use crate::source::CsvDirSource;
use crate::summary::{summarize, Summary};

pub fn run(
    company: &str,
    from_date: &str,
    to_date: &str,
    source: Option<String>,
    output: Option<String>,
    quiet: bool,
) -> Result<()> {
    let window = parse_window(from_date, to_date)?;
    let settings = load_settings();
    let store = source
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.company_dir(company));
    let output_dir = PathBuf::from(output.unwrap_or(settings.output_dir));

    let source = CsvDirSource::new(store);
    let table = reconciler::reconcile(company, &window, &source)?;
    let path = export_path(&output_dir, company);
    write_table(&table, &path)?;

    println!("Wrote {} rows to {}", table.len(), path.display());
    if quiet {
        return Ok(());
    }
    if table.is_empty() {
        println!("{}", "No rows in range.".yellow());
    } else {
        print_summary(&summarize(&table));
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    let mut table = Table::new();
    table.set_header(vec!["Month", "Rows", "Debit", "Credit", "Net"]);
    for m in &summary.months {
        table.add_row(vec![
            Cell::new(format!("{:04}-{:02}", m.year, m.month)),
            Cell::new(m.rows),
            Cell::new(amount(m.debit)),
            Cell::new(amount(m.credit)),
            Cell::new(amount(m.net)),
        ]);
    }
    let net = if summary.total_net >= 0.0 {
        amount(summary.total_net).green().bold()
    } else {
        amount(summary.total_net).red().bold()
    };
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(summary.rows),
        Cell::new(""),
        Cell::new(""),
        Cell::new(net),
    ]);
    println!("{table}");

    if summary.duplicate_ledger > 0 || summary.duplicate_cheque > 0 {
        println!(
            "{} duplicate ledger, {} duplicate cheque rows kept after correction",
            summary.duplicate_ledger, summary.duplicate_cheque
        );
    }
}
