use emi_advisor_core::emi::{self, EmiInput};
use emi_advisor_core::EmiAdvisorError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Known values
// ===========================================================================

#[test]
fn test_emi_sbi_five_year_loan() {
    // r = 8.4 / 1200 = 0.007, n = 60
    // 500_000 * 0.007 * 1.007^60 / (1.007^60 - 1) = 10234.1844...
    let result = emi::compute_emi(dec!(500_000), dec!(8.4), dec!(5)).unwrap();
    assert_eq!(result, dec!(10234.18));
}

#[test]
fn test_emi_zero_rate() {
    let result = emi::compute_emi(dec!(120_000), Decimal::ZERO, dec!(1)).unwrap();
    assert_eq!(result, dec!(10000.0));
}

#[test]
fn test_emi_zero_rate_does_not_inflate_total() {
    // 100 / 3 = 33.333.. -> 33.33; total payments fall 1 paisa short of
    // principal, which is the rounding floor, not interest.
    let result = emi::compute_emi(dec!(100), Decimal::ZERO, dec!(0.25)).unwrap();
    assert_eq!(result, dec!(33.33));
}

#[test]
fn test_emi_rounds_midpoint_up() {
    // 1.005 per month over one year at zero interest -> 12.06 / 12 = 1.005
    let result = emi::compute_emi(dec!(12.06), Decimal::ZERO, dec!(1)).unwrap();
    assert_eq!(result, dec!(1.01));
}

// ===========================================================================
// Properties over a grid of valid inputs
// ===========================================================================

#[test]
fn test_emi_positive_and_covers_principal() {
    let principals = [dec!(1_000), dec!(75_000), dec!(500_000), dec!(12_500_000)];
    let rates = [dec!(0), dec!(0.5), dec!(8.4), dec!(9.1), dec!(18), dec!(36)];
    let tenures = [dec!(0.5), dec!(1), dec!(2.5), dec!(5), dec!(20), dec!(30)];

    for &p in &principals {
        for &rate in &rates {
            for &years in &tenures {
                let emi = emi::compute_emi(p, rate, years).unwrap();
                assert!(emi > Decimal::ZERO, "emi({p}, {rate}, {years}) = {emi}");

                // Allow half a paisa per payment of rounding slack.
                let months = years * dec!(12);
                let slack = dec!(0.005) * months;
                assert!(
                    emi * months + slack >= p,
                    "emi({p}, {rate}, {years}) = {emi} does not cover principal"
                );
            }
        }
    }
}

#[test]
fn test_emi_increases_with_rate() {
    let low = emi::compute_emi(dec!(1_000_000), dec!(8.4), dec!(10)).unwrap();
    let high = emi::compute_emi(dec!(1_000_000), dec!(9.1), dec!(10)).unwrap();
    assert!(high > low);
}

#[test]
fn test_emi_decreases_with_tenure() {
    let short = emi::compute_emi(dec!(1_000_000), dec!(8.8), dec!(5)).unwrap();
    let long = emi::compute_emi(dec!(1_000_000), dec!(8.8), dec!(15)).unwrap();
    assert!(long < short);
}

// ===========================================================================
// Invalid arguments
// ===========================================================================

fn assert_invalid(result: Result<Decimal, EmiAdvisorError>, expected_field: &str) {
    match result {
        Err(EmiAdvisorError::InvalidArgument { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected InvalidArgument on {expected_field}, got {other:?}"),
    }
}

#[test]
fn test_emi_invalid_principal() {
    assert_invalid(emi::compute_emi(dec!(0), dec!(8), dec!(5)), "principal");
    assert_invalid(emi::compute_emi(dec!(-1), dec!(8), dec!(5)), "principal");
}

#[test]
fn test_emi_invalid_tenure() {
    assert_invalid(emi::compute_emi(dec!(1_000), dec!(8), dec!(0)), "tenure_years");
}

#[test]
fn test_emi_invalid_rate() {
    assert_invalid(emi::compute_emi(dec!(1_000), dec!(-1), dec!(5)), "annual_rate_percent");
}

#[test]
fn test_calculate_emi_envelope() {
    let input = EmiInput {
        principal: dec!(1_000_000),
        annual_rate_percent: dec!(9.0),
        tenure_years: dec!(10),
    };
    let out = emi::calculate_emi(&input).unwrap();
    assert_eq!(out.result.months, dec!(120));
    assert_eq!(out.result.total_payment, out.result.emi * dec!(120));
    assert_eq!(
        out.result.total_interest,
        out.result.total_payment - dec!(1_000_000)
    );
    assert_eq!(out.metadata.precision, "rust_decimal_128bit");
}
