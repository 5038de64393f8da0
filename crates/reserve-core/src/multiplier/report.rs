//! Presentation-ready ledger.
//!
//! Formats the simulation ledger as two-decimal strings, one record per
//! iteration, for report writers that should not have to know about
//! `Decimal` rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::engine::{run_ledger, IterationRow, SimulationInput, SimulationResult};
use crate::ReserveResult;

/// One formatted ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub iteration: u32,
    pub amount_deposited: String,
    pub amount_reserved: String,
    pub amount_available_to_lend: String,
    pub customer_total: String,
    pub reserve_total: String,
    pub lendable_total: String,
    pub lent_total: String,
    pub unrepayable_interest: String,
}

/// Formatted summary figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub customer_total: String,
    pub reserve_total: String,
    pub lendable_total: String,
    pub lent_total: String,
    pub next_loan: String,
    pub interest_only: String,
    pub total_interest_and_principal: String,
}

/// Everything a report writer needs: the inputs it was run with, the
/// summary, and the ordered rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub input: SimulationInput,
    pub summary: ReportSummary,
    pub rows: Vec<ReportRow>,
}

/// Round to cents, midpoints away from zero, always two fractional digits.
pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn report_rows(rows: &[IterationRow]) -> Vec<ReportRow> {
    rows.iter()
        .map(|row| ReportRow {
            iteration: row.iteration,
            amount_deposited: format_money(row.amount_deposited),
            amount_reserved: format_money(row.reserve_withheld),
            amount_available_to_lend: format_money(row.amount_available_to_lend),
            customer_total: format_money(row.customer_total),
            reserve_total: format_money(row.reserve_total),
            lendable_total: format_money(row.lendable_total),
            lent_total: format_money(row.lent_total),
            unrepayable_interest: format_money(row.unrepayable_interest),
        })
        .collect()
}

pub fn report_summary(summary: &SimulationResult) -> ReportSummary {
    ReportSummary {
        customer_total: format_money(summary.customer_total),
        reserve_total: format_money(summary.reserve_total),
        lendable_total: format_money(summary.lendable_total),
        lent_total: format_money(summary.lent_total),
        next_loan: format_money(summary.next_loan),
        interest_only: format_money(summary.interest_only),
        total_interest_and_principal: format_money(summary.total_interest_and_principal),
    }
}

/// Run the simulation and format the result for a report.
pub fn build_report(input: &SimulationInput) -> ReserveResult<Report> {
    let (summary, rows) = run_ledger(input)?;
    Ok(Report {
        input: input.clone(),
        summary: report_summary(&summary),
        rows: report_rows(&rows),
    })
}
