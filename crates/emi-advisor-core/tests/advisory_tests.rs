use emi_advisor_core::advisory::{self, AdviceInput, Advisory};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_advice_order_for_comfortable_borrower() {
    // surplus = 30_000 > emi; 30_000 - 10_000 = 20_000 > 5_000; 9.5 > 9
    let advice = advisory::advise_strategies(dec!(50_000), dec!(20_000), dec!(10_000), dec!(9.5));
    assert_eq!(
        advice,
        vec![
            Advisory::Affordable,
            Advisory::PrepaymentRecommended,
            Advisory::HighInterest,
        ]
    );
}

#[test]
fn test_advice_for_household_in_deficit() {
    let advice = advisory::advise_strategies(dec!(10_000), dec!(20_000), dec!(5_000), dec!(8));
    let exceeds = advice.iter().position(|a| *a == Advisory::ExceedsSurplus);
    let deficit = advice.iter().position(|a| *a == Advisory::ExpensesExceedIncome);
    assert!(exceeds.is_some() && deficit.is_some());
    assert!(exceeds < deficit);
}

#[test]
fn test_affordability_message_always_first() {
    let cases = [
        (dec!(0), dec!(0), dec!(1), dec!(0)),
        (dec!(100_000), dec!(1_000), dec!(2_000), dec!(12)),
        (dec!(-5_000), dec!(3_000), dec!(2_000), dec!(9.01)),
    ];
    for (income, expenses, emi, rate) in cases {
        let advice = advisory::advise_strategies(income, expenses, emi, rate);
        assert!(matches!(
            advice[0],
            Advisory::Affordable | Advisory::ExceedsSurplus
        ));
        assert!(advice.len() <= 4);
    }
}

#[test]
fn test_all_four_cannot_fire_together() {
    // Affordable and ExpensesExceedIncome are mutually exclusive for emi >= 0.
    let advice = advisory::advise_strategies(dec!(1_000), dec!(2_000), dec!(0), dec!(15));
    assert_eq!(
        advice,
        vec![
            Advisory::ExceedsSurplus,
            Advisory::ExpensesExceedIncome,
            Advisory::HighInterest,
        ]
    );
}

#[test]
fn test_advise_renders_messages_in_order() {
    let input = AdviceInput {
        monthly_income: dec!(50_000),
        monthly_expenses: dec!(20_000),
        emi: dec!(10_000),
        annual_rate_percent: dec!(9.5),
    };
    let strategies = advisory::advise(&input);
    let messages: Vec<&str> = strategies.iter().map(|s| s.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "You can easily afford EMI payments. Stick to the standard plan.",
            "You can prepay loans to reduce total interest paid.",
            "High-interest loan! Try to refinance after 2 years if rates drop.",
        ]
    );
}

#[test]
fn test_advisory_codes_serialize_snake_case() {
    let json = serde_json::to_string(&Advisory::ExpensesExceedIncome).unwrap();
    assert_eq!(json, "\"expenses_exceed_income\"");
}

#[test]
fn test_strategies_serialize_warning_flag() {
    let input = AdviceInput {
        monthly_income: dec!(10_000),
        monthly_expenses: dec!(20_000),
        emi: dec!(5_000),
        annual_rate_percent: dec!(8),
    };
    let json = serde_json::to_value(advisory::advise(&input)).unwrap();
    let flags: Vec<bool> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["warning"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![true, true]);

    let affordable = serde_json::to_value(advisory::Strategy::from(Advisory::Affordable)).unwrap();
    assert_eq!(affordable["warning"], serde_json::Value::Bool(false));
}
