use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;

use reserve_core::multiplier::report::build_report;
use reserve_core::multiplier::{self, SimulationInput};
use reserve_core::CompoundingFrequency;

use crate::input;
use crate::report::html;

/// Arguments for the money multiplier simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Money first deposited into the system
    #[arg(long, allow_hyphen_values = true)]
    pub initial_deposit: Option<Decimal>,

    /// Fraction of each deposit held in reserve, in (0, 1]
    #[arg(long)]
    pub reserve_ratio: Option<Decimal>,

    /// Number of deposit/lend cycles
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Nominal annual interest rate on lent money (0.05 = 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub interest_rate: Option<Decimal>,

    /// Compounding frequency (annually, monthly, daily, hourly, minutely, secondly, tick)
    #[arg(long)]
    pub frequency: Option<CompoundingFrequency>,

    /// Years of interest accrual, may be fractional
    #[arg(long, allow_hyphen_values = true)]
    pub interest_periods: Option<Decimal>,

    /// Write a self-contained HTML report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Leave the per-iteration ledger out of the output
    #[arg(long)]
    pub summary_only: bool,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        from_flags(&args)
    };

    let result = multiplier::simulate(&sim_input)?;

    if let Some(ref path) = args.report {
        let report = build_report(&sim_input)?;
        html::write_report(path, &report, &result.warnings)?;
        log::info!("report written to {}", path.display());
    }

    let mut value = serde_json::to_value(result)?;
    if args.summary_only {
        if let Some(Value::Object(res)) = value.get_mut("result") {
            res.remove("rows");
        }
    }
    Ok(value)
}

/// Build the input from individual flags, defaulting whatever is absent.
fn from_flags(args: &SimulateArgs) -> SimulationInput {
    let defaults = SimulationInput::default();
    SimulationInput {
        initial_deposit: args.initial_deposit.unwrap_or(defaults.initial_deposit),
        reserve_ratio: args.reserve_ratio.unwrap_or(defaults.reserve_ratio),
        iterations: args.iterations.unwrap_or(defaults.iterations),
        interest_rate: args.interest_rate.unwrap_or(defaults.interest_rate),
        compounding_frequency: args.frequency.unwrap_or(defaults.compounding_frequency),
        interest_periods: args.interest_periods.unwrap_or(defaults.interest_periods),
    }
}
