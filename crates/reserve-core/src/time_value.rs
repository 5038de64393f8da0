use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ReserveError;
use crate::frequency::CompoundingFrequency;
use crate::types::*;
use crate::ReserveResult;

/// Largest |x| for which ln(1 + x) is summed as a Taylor series.
const LN_1P_SERIES_LIMIT: Decimal = dec!(0.5);
const MAX_SERIES_TERMS: u32 = 256;
/// Must resolve second vs tick compounding, which differ by ~1e-10.
const EXP_TOLERANCE: Decimal = dec!(0.000000000000000000000001);

/// Input for a standalone compound interest calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestInput {
    /// Amount the interest accrues on
    pub principal: Money,
    /// Nominal annual rate (0.05 = 5%)
    pub annual_rate: Rate,
    /// Accrual horizon in years, may be fractional
    pub years: Years,
    #[serde(default)]
    pub compounding_frequency: CompoundingFrequency,
}

/// Output of a compound interest calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestOutput {
    /// F - P
    pub interest_only: Money,
    /// F = P * (1 + r/n)^(n*t)
    pub total_interest_and_principal: Money,
    /// (1 + r/n)^n - 1
    pub effective_annual_rate: Rate,
    pub periods_per_year: Decimal,
    /// n * t
    pub compounding_periods: Decimal,
}

/// Growth factor `(1 + r/n)^(n*t)` for a nominal annual rate.
///
/// Whole-number period counts are raised exactly by repeated squaring. Any
/// other count goes through `exp((n*t) * ln(1 + r/n))`, which needs a
/// positive base.
pub fn growth_factor(
    annual_rate: Rate,
    years: Years,
    frequency: CompoundingFrequency,
) -> ReserveResult<Decimal> {
    if annual_rate.is_zero() || years.is_zero() {
        return Ok(Decimal::ONE);
    }

    let n = frequency.periods_per_year();
    let periodic_rate = annual_rate / n;
    let periods = n.checked_mul(years).ok_or_else(|| ReserveError::Overflow {
        context: format!("compounding periods ({n} x {years})"),
    })?;
    let base = Decimal::ONE
        .checked_add(periodic_rate)
        .ok_or_else(|| ReserveError::Overflow {
            context: format!("growth base 1 + {periodic_rate}"),
        })?;

    if periods.fract().is_zero() {
        if let Some(whole) = periods.to_i64().filter(|p| p.unsigned_abs() <= u32::MAX as u64) {
            return base.checked_powi(whole).ok_or_else(|| ReserveError::Overflow {
                context: format!("growth factor {base}^{whole}"),
            });
        }
    }

    if base <= Decimal::ZERO {
        return Err(ReserveError::FinancialImpossibility(format!(
            "periodic rate {periodic_rate} gives a non-positive base, \
             which cannot be raised to {periods} periods"
        )));
    }

    let log_growth = ln_1p(periodic_rate)?
        .checked_mul(periods)
        .ok_or_else(|| ReserveError::Overflow {
            context: format!("log growth over {periods} periods"),
        })?;
    log_growth.checked_exp_with_tolerance(EXP_TOLERANCE).ok_or_else(|| ReserveError::Overflow {
        context: format!("exp({log_growth})"),
    })
}

/// Future value of a single principal under periodic compounding.
pub fn future_value(
    principal: Money,
    annual_rate: Rate,
    years: Years,
    frequency: CompoundingFrequency,
) -> ReserveResult<Money> {
    let factor = growth_factor(annual_rate, years, frequency)?;
    principal
        .checked_mul(factor)
        .ok_or_else(|| ReserveError::Overflow {
            context: format!("future value of {principal}"),
        })
}

/// Interest earned on `principal`, excluding the principal itself.
pub fn compound_interest(
    principal: Money,
    annual_rate: Rate,
    years: Years,
    frequency: CompoundingFrequency,
) -> ReserveResult<Money> {
    let future = future_value(principal, annual_rate, years, frequency)?;
    interest_earned(future, principal)
}

/// `future - principal`, mapped to `Overflow` when the difference leaves
/// the representable range.
pub(crate) fn interest_earned(future: Money, principal: Money) -> ReserveResult<Money> {
    future
        .checked_sub(principal)
        .ok_or_else(|| ReserveError::Overflow {
            context: format!("interest {future} - {principal}"),
        })
}

/// Effective annual rate implied by a nominal rate and compounding frequency.
pub fn effective_annual_rate(
    annual_rate: Rate,
    frequency: CompoundingFrequency,
) -> ReserveResult<Rate> {
    growth_factor(annual_rate, Decimal::ONE, frequency)?
        .checked_sub(Decimal::ONE)
        .ok_or_else(|| ReserveError::Overflow {
            context: format!("effective rate at {annual_rate}"),
        })
}

/// Compound interest wrapped in the standard output envelope.
pub fn calculate_interest(
    input: &InterestInput,
) -> ReserveResult<ComputationOutput<InterestOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.principal.is_sign_negative() {
        warnings.push("Principal is negative; interest will be negative".into());
    }
    if input.annual_rate.is_sign_negative() {
        warnings.push("Annual rate is negative; principal decays".into());
    }
    if input.years.is_sign_negative() {
        warnings.push("Negative horizon discounts rather than accrues".into());
    }

    let frequency = input.compounding_frequency;
    let future = future_value(input.principal, input.annual_rate, input.years, frequency)?;
    let periods_per_year = frequency.periods_per_year();
    let compounding_periods =
        periods_per_year
            .checked_mul(input.years)
            .ok_or_else(|| ReserveError::Overflow {
                context: format!("compounding periods ({periods_per_year} x {})", input.years),
            })?;

    let output = InterestOutput {
        interest_only: interest_earned(future, input.principal)?,
        total_interest_and_principal: future,
        effective_annual_rate: effective_annual_rate(input.annual_rate, frequency)?,
        periods_per_year,
        compounding_periods,
    };
    debug!(
        "compound interest on {} at {} over {}y ({}): {}",
        input.principal, input.annual_rate, input.years, frequency, output.interest_only
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Periodic compounding: F = P(1 + r/n)^(nt)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "years": input.years.to_string(),
            "compounding_frequency": frequency.name(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// ln(1 + x), summed directly for small x so tiny periodic rates keep
/// their significant digits.
fn ln_1p(x: Decimal) -> ReserveResult<Decimal> {
    if x.abs() >= LN_1P_SERIES_LIMIT {
        return Decimal::ONE
            .checked_add(x)
            .and_then(|base| base.checked_ln())
            .ok_or_else(|| ReserveError::FinancialImpossibility(format!("ln(1 + {x}) is undefined")));
    }

    let mut sum = Decimal::ZERO;
    let mut power = x;
    for k in 1..=MAX_SERIES_TERMS {
        if power.is_zero() {
            break;
        }
        let term = power / Decimal::from(k);
        if k % 2 == 1 {
            sum += term;
        } else {
            sum -= term;
        }
        power *= x;
    }
    Ok(sum)
}
