//! Fractional-reserve money multiplier.
//!
//! An initial deposit is run through repeated deposit/lend cycles. Each
//! cycle the bank withholds `reserve_ratio` of the deposit and the remainder
//! is lent out, re-deposited, and becomes the next cycle's deposit. The
//! lendable amount of the final cycle is never disbursed: it is reported as
//! the bank's next loan.
//!
//! Interest on the lent principal is accrued with periodic compounding, both
//! progressively per cycle and once on the final lent total.

use log::{debug, trace};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ReserveError;
use crate::frequency::CompoundingFrequency;
use crate::time_value::{growth_factor, interest_earned};
use crate::types::*;
use crate::ReserveResult;

/// Upper bound on deposit/lend cycles. Past a few hundred cycles every
/// amount is already below the smallest representable `Decimal`.
pub const MAX_ITERATIONS: u32 = 1_000_000;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for a money multiplier simulation.
///
/// Missing fields deserialize to the same defaults as [`SimulationInput::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationInput {
    /// Money first deposited into the system.
    pub initial_deposit: Money,
    /// Fraction of each deposit held back, in (0, 1].
    pub reserve_ratio: Rate,
    /// Deposit/lend cycles to run, in 1..=[`MAX_ITERATIONS`].
    pub iterations: u32,
    /// Nominal annual interest rate charged on lent money.
    pub interest_rate: Rate,
    pub compounding_frequency: CompoundingFrequency,
    /// Years of interest accrual, may be fractional.
    pub interest_periods: Years,
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            initial_deposit: dec!(1000),
            reserve_ratio: dec!(0.1),
            iterations: 10,
            interest_rate: dec!(0.05),
            compounding_frequency: CompoundingFrequency::Monthly,
            interest_periods: dec!(10),
        }
    }
}

/// One deposit/lend cycle of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRow {
    /// 1-based cycle number.
    pub iteration: u32,
    /// Deposit entering this cycle.
    pub amount_deposited: Money,
    /// Reserve withheld from this cycle's deposit.
    pub reserve_withheld: Money,
    /// Deposit minus reserve; becomes the next cycle's deposit.
    pub amount_available_to_lend: Money,
    /// Balances customers believe they hold.
    pub customer_total: Money,
    pub reserve_total: Money,
    /// Everything the bank may lend, including money already lent.
    pub lendable_total: Money,
    /// Money actually lent before this cycle's disbursement.
    pub lent_total: Money,
    /// Interest owed on `lent_total` over the accrual horizon.
    pub unrepayable_interest: Money,
}

/// Final totals of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub customer_total: Money,
    pub reserve_total: Money,
    pub lendable_total: Money,
    pub lent_total: Money,
    /// Lendable capacity not yet disbursed.
    pub next_loan: Money,
    /// Interest owed on the final lent total.
    pub interest_only: Money,
    pub total_interest_and_principal: Money,
}

/// Full simulation output: summary, ledger rows, and multipliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub summary: SimulationResult,
    pub rows: Vec<IterationRow>,
    /// Theoretical limit of deposit expansion, 1 / reserve_ratio.
    pub money_multiplier: Multiple,
    /// customer_total / initial_deposit; absent for a zero deposit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_multiplier: Option<Multiple>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the money multiplier and accrue interest on the lent principal.
pub fn simulate(input: &SimulationInput) -> ReserveResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let warnings = validate_input(input)?;

    let (summary, rows) = build_ledger(input)?;

    let money_multiplier = Decimal::ONE / input.reserve_ratio;
    let effective_multiplier = if input.initial_deposit.is_zero() {
        None
    } else {
        Some(summary.customer_total / input.initial_deposit)
    };

    let output = SimulationOutput {
        summary,
        rows,
        money_multiplier,
        effective_multiplier,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fractional-reserve money multiplier with periodic compounding on lent principal",
        &serde_json::json!({
            "initial_deposit": input.initial_deposit.to_string(),
            "reserve_ratio": input.reserve_ratio.to_string(),
            "iterations": input.iterations,
            "interest_rate": input.interest_rate.to_string(),
            "compounding_frequency": input.compounding_frequency.name(),
            "interest_periods": input.interest_periods.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Validate the input and return the summary and ledger rows without the
/// output envelope.
pub fn run_ledger(input: &SimulationInput) -> ReserveResult<(SimulationResult, Vec<IterationRow>)> {
    validate_input(input)?;
    build_ledger(input)
}

// ---------------------------------------------------------------------------
// Internal: validation
// ---------------------------------------------------------------------------

fn validate_input(input: &SimulationInput) -> ReserveResult<Vec<String>> {
    if input.reserve_ratio <= Decimal::ZERO {
        return Err(ReserveError::InvalidParameter {
            field: "reserve_ratio".into(),
            reason: "Reserve ratio must be greater than zero".into(),
        });
    }
    if input.reserve_ratio > Decimal::ONE {
        return Err(ReserveError::InvalidParameter {
            field: "reserve_ratio".into(),
            reason: "Reserve ratio cannot exceed 1".into(),
        });
    }
    if input.iterations == 0 {
        return Err(ReserveError::InvalidParameter {
            field: "iterations".into(),
            reason: "At least one iteration is required".into(),
        });
    }
    if input.iterations > MAX_ITERATIONS {
        return Err(ReserveError::InvalidParameter {
            field: "iterations".into(),
            reason: format!("At most {MAX_ITERATIONS} iterations are supported"),
        });
    }
    // Every running total is bounded by |deposit| / ratio.
    if input.initial_deposit.checked_div(input.reserve_ratio).is_none() {
        return Err(ReserveError::Overflow {
            context: format!(
                "deposit {} at reserve ratio {}",
                input.initial_deposit, input.reserve_ratio
            ),
        });
    }

    let mut warnings: Vec<String> = Vec::new();
    if input.initial_deposit <= Decimal::ZERO {
        warnings.push("Initial deposit is not positive; totals will not grow".into());
    }
    if input.reserve_ratio == Decimal::ONE {
        warnings.push("Reserve ratio of 1 withholds every deposit; no money is created".into());
    }
    if input.interest_rate.is_sign_negative() {
        warnings.push("Interest rate is negative".into());
    }
    if input.interest_periods.is_sign_negative() {
        warnings.push("Interest periods are negative; interest is discounted".into());
    }

    debug!(
        "validated simulation: deposit={} ratio={} iterations={} ({} warnings)",
        input.initial_deposit,
        input.reserve_ratio,
        input.iterations,
        warnings.len()
    );
    Ok(warnings)
}

// ---------------------------------------------------------------------------
// Internal: ledger
// ---------------------------------------------------------------------------

fn build_ledger(input: &SimulationInput) -> ReserveResult<(SimulationResult, Vec<IterationRow>)> {
    // One growth factor serves every row since rate, horizon and frequency
    // are fixed for the whole simulation.
    let factor = growth_factor(
        input.interest_rate,
        input.interest_periods,
        input.compounding_frequency,
    )?;

    let mut amount_to_lend = input.initial_deposit;
    let mut customer_total = Decimal::ZERO;
    let mut reserve_total = Decimal::ZERO;
    let mut lendable_total = Decimal::ZERO;
    let mut lent_total = Decimal::ZERO;

    let mut rows = Vec::new();

    for i in 1..=input.iterations {
        customer_total += amount_to_lend;
        let reserve_withheld = amount_to_lend * input.reserve_ratio;
        let available = amount_to_lend - reserve_withheld;
        reserve_total += reserve_withheld;
        lendable_total += available;

        rows.push(IterationRow {
            iteration: i,
            amount_deposited: amount_to_lend,
            reserve_withheld,
            amount_available_to_lend: available,
            customer_total,
            reserve_total,
            lendable_total,
            lent_total,
            unrepayable_interest: accrue(lent_total, factor)?,
        });
        trace!("iteration {i}: deposited={amount_to_lend} reserved={reserve_withheld}");

        // The last cycle's lendable money stays with the bank.
        if i < input.iterations {
            lent_total += available;
        }

        amount_to_lend = available;
    }

    let interest_only = accrue(lent_total, factor)?;
    let summary = SimulationResult {
        customer_total,
        reserve_total,
        lendable_total,
        lent_total,
        next_loan: lendable_total - lent_total,
        interest_only,
        total_interest_and_principal: interest_only + lent_total,
    };

    debug!(
        "simulation finished after {} iterations: customer_total={} lent_total={}",
        input.iterations, summary.customer_total, summary.lent_total
    );
    Ok((summary, rows))
}

/// Interest on `principal` for a precomputed growth factor.
fn accrue(principal: Money, factor: Decimal) -> ReserveResult<Money> {
    principal
        .checked_mul(factor)
        .ok_or_else(|| ReserveError::Overflow {
            context: format!("interest on {principal}"),
        })
        .and_then(|future| interest_earned(future, principal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::compound_interest;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn input(deposit: Decimal, ratio: Decimal, iterations: u32) -> SimulationInput {
        SimulationInput {
            initial_deposit: deposit,
            reserve_ratio: ratio,
            iterations,
            ..SimulationInput::default()
        }
    }

    #[test]
    fn test_first_iteration_row() {
        let (_, rows) = run_ledger(&input(dec!(1000), dec!(0.1), 3)).unwrap();
        assert_eq!(
            rows[0],
            IterationRow {
                iteration: 1,
                amount_deposited: dec!(1000),
                reserve_withheld: dec!(100),
                amount_available_to_lend: dec!(900),
                customer_total: dec!(1000),
                reserve_total: dec!(100),
                lendable_total: dec!(900),
                lent_total: Decimal::ZERO,
                unrepayable_interest: Decimal::ZERO,
            }
        );
        assert_eq!(rows[1].amount_deposited, dec!(900));
        assert_eq!(rows[1].lent_total, dec!(900));
    }

    #[test]
    fn test_single_iteration_lends_nothing() {
        let (summary, rows) = run_ledger(&input(dec!(500), dec!(0.2), 1)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(summary.lent_total, Decimal::ZERO);
        assert_eq!(summary.next_loan, dec!(400));
        assert_eq!(summary.interest_only, Decimal::ZERO);
        assert_eq!(summary.total_interest_and_principal, Decimal::ZERO);
    }

    #[test]
    fn test_final_interest_matches_compound_interest() {
        let inp = SimulationInput::default();
        let (summary, _) = run_ledger(&inp).unwrap();
        let expected = compound_interest(
            summary.lent_total,
            inp.interest_rate,
            inp.interest_periods,
            inp.compounding_frequency,
        )
        .unwrap();
        assert_eq!(summary.interest_only, expected);
        assert_eq!(
            summary.total_interest_and_principal,
            summary.interest_only + summary.lent_total
        );
    }

    #[test]
    fn test_row_interest_uses_running_lent_total() {
        let (summary, rows) = run_ledger(&SimulationInput::default()).unwrap();
        for pair in rows.windows(2) {
            assert!(pair[1].unrepayable_interest > pair[0].unrepayable_interest);
        }
        // The last row has not yet disbursed its own lendable amount, so it
        // already carries the final lent total.
        let last = rows.last().unwrap();
        assert_eq!(last.lent_total, summary.lent_total);
        assert_eq!(last.unrepayable_interest, summary.interest_only);
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let err = run_ledger(&input(dec!(1000), Decimal::ZERO, 10)).unwrap_err();
        match err {
            ReserveError::InvalidParameter { field, .. } => assert_eq!(field, "reserve_ratio"),
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_ratio_above_one_rejected() {
        assert!(simulate(&input(dec!(1000), dec!(1.01), 10)).is_err());
        assert!(simulate(&input(dec!(1000), dec!(-0.1), 10)).is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = simulate(&input(dec!(1000), dec!(0.1), 0)).unwrap_err();
        match err {
            ReserveError::InvalidParameter { field, .. } => assert_eq!(field, "iterations"),
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_iterations_above_cap_rejected() {
        for iterations in [MAX_ITERATIONS + 1, u32::MAX] {
            let err = simulate(&input(dec!(1000), dec!(0.1), iterations)).unwrap_err();
            match err {
                ReserveError::InvalidParameter { field, .. } => assert_eq!(field, "iterations"),
                other => panic!("Expected InvalidParameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_huge_interest_rate_overflows() {
        let inp = SimulationInput {
            interest_rate: Decimal::MAX,
            compounding_frequency: CompoundingFrequency::Annually,
            ..SimulationInput::default()
        };
        let err = simulate(&inp).unwrap_err();
        assert!(matches!(err, ReserveError::Overflow { .. }), "got {err:?}");
    }

    #[test]
    fn test_accrue_overflow_is_an_error() {
        // -1.5P - P leaves the Decimal range
        let err = accrue(dec!(35000000000000000000000000000), dec!(-1.5)).unwrap_err();
        assert!(matches!(err, ReserveError::Overflow { .. }));
    }

    #[test]
    fn test_oversized_deposit_rejected() {
        let err = simulate(&input(Decimal::MAX, dec!(0.1), 5)).unwrap_err();
        assert!(matches!(err, ReserveError::Overflow { .. }));
    }

    #[test]
    fn test_negative_deposit_warns() {
        let out = simulate(&input(dec!(-100), dec!(0.5), 2)).unwrap();
        assert_eq!(out.result.summary.customer_total, dec!(-150));
        assert!(out.warnings.iter().any(|w| w.contains("deposit")));
    }

    #[test]
    fn test_multipliers() {
        let out = simulate(&input(dec!(1000), dec!(0.25), 4)).unwrap();
        assert_eq!(out.result.money_multiplier, dec!(4));
        // 1000 + 750 + 562.5 + 421.875 = 2734.375
        assert_eq!(out.result.summary.customer_total, dec!(2734.375));
        assert_eq!(out.result.effective_multiplier, Some(dec!(2.734375)));
    }

    #[test]
    fn test_zero_deposit_has_no_effective_multiplier() {
        let out = simulate(&input(Decimal::ZERO, dec!(0.1), 3)).unwrap();
        assert_eq!(out.result.effective_multiplier, None);
        assert_eq!(out.result.summary.customer_total, Decimal::ZERO);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let parsed: SimulationInput =
            serde_json::from_str(r#"{"initial_deposit": "2500", "compounding_frequency": "daily"}"#)
                .unwrap();
        assert_eq!(parsed.initial_deposit, dec!(2500));
        assert_eq!(parsed.compounding_frequency, CompoundingFrequency::Daily);
        assert_eq!(parsed.iterations, 10);
        assert_eq!(parsed.reserve_ratio, dec!(0.1));
    }
}
