mod commands;
mod input;
mod output;
mod report;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::interest::InterestArgs;
use commands::simulate::SimulateArgs;

/// Fractional-reserve banking and interest calculator
#[derive(Parser)]
#[command(
    name = "frackin",
    version,
    about = "Fractional-reserve banking and interest calculator",
    long_about = "Simulates how an initial deposit is multiplied by repeated \
                  deposit/lend cycles under a reserve requirement, then accrues \
                  compound interest on the money lent out. All arithmetic uses \
                  decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the money multiplier and interest simulation
    Simulate(SimulateArgs),
    /// Compound interest on a single principal
    Interest(InterestArgs),
    /// List compounding frequencies and their periods per year
    Frequencies,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Interest(args) => commands::interest::run_interest(args),
        Commands::Frequencies => commands::frequencies::run_frequencies(),
        Commands::Version => {
            println!("frackin {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
