mod cli;
mod coalesce;
mod error;
mod export;
mod fmt;
mod gw;
mod join;
mod loader;
mod models;
mod reconciler;
mod settings;
mod source;
mod summary;
mod table;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            data_dir,
            output_dir,
        } => cli::init::run(data_dir, output_dir),
        Commands::Status => cli::status::run(),
        Commands::Reconcile {
            company,
            from_date,
            to_date,
            source,
            output,
            quiet,
        } => cli::reconcile::run(&company, &from_date, &to_date, source, output, quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
