//! WanderlustWings CLI - Inspect the generated flight catalog.
//!
//! # Usage
//!
//! ```bash
//! # List airports (served ones are marked)
//! ww-cli airports
//!
//! # Flights from Delhi to Mumbai, cheapest direct ones first
//! ww-cli flights --from DEL --to BOM --stops 0 --sort price
//!
//! # The same catalog every time, as JSON
//! ww-cli flights --seed 42 --json
//!
//! # Draw a seat map
//! ww-cli seats --seed 7
//! ```
//!
//! # Commands
//!
//! - `airports` - List airports in search-form order
//! - `flights` - Generate a catalog and filter it like the results page
//! - `seats` - Draw one random seat map

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::flights::FlightsArgs;

#[derive(Parser)]
#[command(name = "ww-cli")]
#[command(author, version, about = "WanderlustWings CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List airports
    Airports,
    /// Generate the flight catalog and list matching flights
    Flights(FlightsArgs),
    /// Draw a random seat map
    Seats {
        /// Seed for a reproducible map
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wanderlust_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Airports => commands::airports::list(),
        Commands::Flights(args) => commands::flights::list(&args)?,
        Commands::Seats { seed } => commands::seats::draw(seed),
    }
    Ok(())
}
