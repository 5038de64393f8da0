use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use reserve_core::time_value::{self, InterestInput};
use reserve_core::CompoundingFrequency;

use crate::input;

/// Arguments for a standalone compound interest calculation
#[derive(Args)]
pub struct InterestArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal the interest accrues on
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate (0.05 = 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Accrual horizon in years
    #[arg(long, allow_hyphen_values = true)]
    pub years: Option<Decimal>,

    /// Compounding frequency
    #[arg(long, default_value = "monthly")]
    pub frequency: CompoundingFrequency,
}

pub fn run_interest(args: InterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let interest_input: InterestInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        from_flags(&args)?
    };

    let result = time_value::calculate_interest(&interest_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Build the input from individual flags; principal, rate and years have no
/// defaults.
fn from_flags(args: &InterestArgs) -> Result<InterestInput, Box<dyn std::error::Error>> {
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let annual_rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let years = args.years.ok_or("--years is required (or provide --input)")?;

    Ok(InterestInput {
        principal,
        annual_rate,
        years,
        compounding_frequency: args.frequency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bare_args() -> InterestArgs {
        InterestArgs {
            input: None,
            principal: None,
            rate: None,
            years: None,
            frequency: CompoundingFrequency::Monthly,
        }
    }

    #[test]
    fn test_missing_principal_is_reported() {
        let args = InterestArgs {
            rate: Some(dec!(0.05)),
            years: Some(dec!(10)),
            ..bare_args()
        };
        let err = from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("--principal"), "got {err}");
    }

    #[test]
    fn test_missing_rate_and_years_are_reported() {
        let err = from_flags(&InterestArgs {
            principal: Some(dec!(1000)),
            years: Some(dec!(1)),
            ..bare_args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--rate"), "got {err}");

        let err = from_flags(&InterestArgs {
            principal: Some(dec!(1000)),
            rate: Some(dec!(0.05)),
            ..bare_args()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--years"), "got {err}");
    }

    #[test]
    fn test_flags_build_input() {
        let args = InterestArgs {
            principal: Some(dec!(1000)),
            rate: Some(dec!(0.05)),
            years: Some(dec!(2.5)),
            frequency: CompoundingFrequency::Daily,
            ..bare_args()
        };
        let built = from_flags(&args).unwrap();
        assert_eq!(built.principal, dec!(1000));
        assert_eq!(built.annual_rate, dec!(0.05));
        assert_eq!(built.years, dec!(2.5));
        assert_eq!(built.compounding_frequency, CompoundingFrequency::Daily);
    }
}
