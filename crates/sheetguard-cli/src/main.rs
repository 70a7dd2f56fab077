//! Sheetguard CLI - validate sample sheets against schema templates.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            file,
            template,
            mapping,
            map,
        } => commands::validate::run(file, template, mapping, map, &cli.global),

        Commands::Batch { manifest, output } => {
            commands::batch::run(manifest, output, &cli.global)
        }

        Commands::Templates { id } => commands::templates::run(id, &cli.global),
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
