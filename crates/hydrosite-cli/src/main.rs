use clap::Parser;
use hydrosite_cli::cli::{Cli, Commands};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

mod commands;

use crate::commands::{optimal, profile};

fn main() {
    let cli = Cli::parse();

    // stdout carries the run summary
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {err}");
    }

    let result = match &cli.command {
        Commands::Optimal(args) => optimal::handle(args).map(|_| "Plant search"),
        Commands::Profile { inputs, out } => profile::handle(inputs, out).map(|_| "Profile export"),
    };

    match result {
        Ok(what) => info!("{what} successful!"),
        Err(e) => {
            error!("Command failed: {:?}", e);
            std::process::exit(1);
        }
    }
}
