//! Perso CLI - Pending transaction review
//!
//! Usage:
//!   perso groups --file pending.csv       Ranked groups to review
//!   perso show --file pending.csv -g KEY  Members of one group
//!   perso normalize "CARTE 12/01 ..."     Inspect label normalization
//!   perso sort-options                    Available sort strategies

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Groups {
            file,
            sort,
            max_groups,
            exclude,
            delimiter,
            json,
        } => {
            let config = commands::open_config(cli.config.as_deref())?;
            let request = commands::GroupsRequest {
                file: &file,
                sort: sort.as_deref(),
                max_groups,
                exclude: &exclude,
                delimiter: delimiter.as_deref(),
                json,
            };
            commands::cmd_groups(&config, &request)
        }
        Commands::Show {
            file,
            group,
            exclude,
            delimiter,
            json,
        } => {
            let config = commands::open_config(cli.config.as_deref())?;
            commands::cmd_show(
                &config,
                &file,
                &group,
                &exclude,
                delimiter.as_deref(),
                json,
            )
        }
        Commands::Normalize { labels } => {
            let config = commands::open_config(cli.config.as_deref())?;
            commands::cmd_normalize(&config, &labels)
        }
        Commands::SortOptions => commands::cmd_sort_options(),
    }
}
