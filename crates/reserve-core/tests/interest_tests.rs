use reserve_core::time_value::{self, InterestInput};
use reserve_core::CompoundingFrequency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Compound interest reference values
// ===========================================================================

#[test]
fn test_monthly_reference_value() {
    let interest = time_value::compound_interest(
        dec!(1000),
        dec!(0.05),
        dec!(10),
        CompoundingFrequency::Monthly,
    )
    .unwrap();
    // F = 1000 * (1 + 0.05/12)^120 = 1647.0095
    assert!(
        (interest - dec!(647.01)).abs() < dec!(0.01),
        "Expected ~647.01, got {}",
        interest
    );
}

#[test]
fn test_daily_compounding_uses_leap_year_average() {
    // 1 year daily at 36.525%: (1 + 0.001)^365.25
    let fv = time_value::future_value(
        dec!(1),
        dec!(0.36525),
        dec!(1),
        CompoundingFrequency::Daily,
    )
    .unwrap();
    assert!((fv - dec!(1.440611)).abs() < dec!(0.000001), "got {fv}");
}

#[test]
fn test_zero_rate_any_frequency() {
    for frequency in CompoundingFrequency::ALL {
        for years in [dec!(0.5), dec!(1), dec!(30)] {
            let interest =
                time_value::compound_interest(dec!(123456.78), Decimal::ZERO, years, frequency)
                    .unwrap();
            assert_eq!(interest, Decimal::ZERO);
        }
    }
}

#[test]
fn test_interest_envelope_from_json() {
    let input: InterestInput = serde_json::from_str(
        r#"{"principal": "1000", "annual_rate": "0.05", "years": "10"}"#,
    )
    .unwrap();
    // Frequency omitted: monthly
    assert_eq!(input.compounding_frequency, CompoundingFrequency::Monthly);

    let out = time_value::calculate_interest(&input).unwrap();
    assert!((out.result.interest_only - dec!(647.01)).abs() < dec!(0.01));
    assert_eq!(out.result.periods_per_year, dec!(12));
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}

#[test]
fn test_effective_rate_rises_with_frequency() {
    let annual = time_value::effective_annual_rate(dec!(0.08), CompoundingFrequency::Annually)
        .unwrap();
    let daily =
        time_value::effective_annual_rate(dec!(0.08), CompoundingFrequency::Daily).unwrap();
    assert_eq!(annual, dec!(0.08));
    assert!(daily > annual);
    // Continuous ceiling e^0.08 - 1 = 0.083287
    assert!(daily < dec!(0.083288));
}
