//! Behavioural properties of the ratio engine

use approx::assert_relative_eq;
use finmetrics_data::{FieldValue, FinancialRecord, fields};
use finmetrics_engine::{MarketPrice, Metric, MetricValue, RatioEngine, compute, get_rule};
use rstest::rstest;

fn price(value: f64) -> MarketPrice {
    MarketPrice::new(value).unwrap()
}

/// A record where every field is present and non-zero.
fn complete_record() -> Vec<(&'static str, f64)> {
    vec![
        (fields::EPS, 10.0),
        (fields::BOOK_VALUE_PER_SHARE, 25.0),
        (fields::REVENUE_PER_SHARE, 40.0),
        (fields::EPS_GROWTH_RATE, 8.0),
        (fields::REVENUE, 1000.0),
        (fields::COGS, 600.0),
        (fields::OPERATING_INCOME, 150.0),
        (fields::NET_INCOME, 100.0),
        (fields::CURRENT_ASSETS, 500.0),
        (fields::CURRENT_LIABILITIES, 250.0),
        (fields::TOTAL_DEBT, 300.0),
        (fields::TOTAL_EQUITY, 600.0),
        (fields::AVERAGE_SHAREHOLDERS_EQUITY, 800.0),
        (fields::AVERAGE_TOTAL_ASSETS, 2000.0),
    ]
}

fn with_field(field: &str, value: f64) -> FinancialRecord {
    complete_record()
        .into_iter()
        .map(|(k, v)| if k == field { (k, value) } else { (k, v) })
        .collect()
}

#[test]
fn test_present_denominators_give_values_and_no_diagnostics() {
    let record: FinancialRecord = complete_record().into_iter().collect();

    let result = RatioEngine::new().compute(&record, price(50.0));

    assert!(result.diagnostics.is_empty());
    for (metric, value) in result.metrics.metrics() {
        let v = value.value();
        assert!(v.is_some_and(f64::is_finite), "{metric} should be available");
    }
}

#[rstest]
#[case(Metric::PeRatio, fields::EPS, "P/E: EPS is zero or missing")]
#[case(
    Metric::PbRatio,
    fields::BOOK_VALUE_PER_SHARE,
    "P/B: Book Value Per Share is zero or missing"
)]
#[case(
    Metric::PsRatio,
    fields::REVENUE_PER_SHARE,
    "P/S: Revenue Per Share is zero or missing"
)]
#[case(
    Metric::PegRatio,
    fields::EPS_GROWTH_RATE,
    "PEG: Growth rate is zero or missing"
)]
#[case(
    Metric::CurrentRatio,
    fields::CURRENT_LIABILITIES,
    "Current Ratio: Liabilities zero"
)]
#[case(Metric::DebtToEquity, fields::TOTAL_EQUITY, "Debt/Equity: Equity zero")]
#[case(
    Metric::ReturnOnEquity,
    fields::AVERAGE_SHAREHOLDERS_EQUITY,
    "ROE: Equity zero"
)]
#[case(Metric::ReturnOnAssets, fields::AVERAGE_TOTAL_ASSETS, "ROA: Assets zero")]
fn test_zero_denominator_gives_exactly_one_diagnostic(
    #[case] metric: Metric,
    #[case] denominator: &str,
    #[case] note: &str,
) {
    let record = with_field(denominator, 0.0);

    let result = RatioEngine::new().compute(&record, price(50.0));

    assert_eq!(result.metrics.get(metric), MetricValue::UNAVAILABLE);
    assert_eq!(result.diagnostics, vec![note.to_string()]);
}

#[test]
fn test_zero_eps_makes_peg_unavailable_without_extra_noise() {
    let record = with_field(fields::EPS, 0.0);

    let result = RatioEngine::new().compute(&record, price(50.0));

    assert!(!result.metrics.get(Metric::PeRatio).is_available());
    assert!(!result.metrics.get(Metric::PegRatio).is_available());
    assert_eq!(
        result.diagnostics,
        vec!["P/E: EPS is zero or missing".to_string()]
    );
}

#[test]
fn test_zero_revenue_hits_all_three_margins() {
    let record = with_field(fields::REVENUE, 0.0);

    let result = RatioEngine::new().compute(&record, price(50.0));

    assert_eq!(
        result.diagnostics,
        vec![
            "Gross Margin: Revenue zero".to_string(),
            "Operating Margin: Revenue zero".to_string(),
            "Net Margin: Revenue zero".to_string(),
        ]
    );
}

#[test]
fn test_idempotent() {
    let record = FinancialRecord::from_pairs([
        (fields::REVENUE, FieldValue::Number(1000.0)),
        (fields::COGS, FieldValue::Text("abc".to_string())),
        (fields::EPS, FieldValue::Number(0.0)),
        (fields::TOTAL_DEBT, FieldValue::Empty),
    ]);

    let first = compute(&record, price(20.0));
    let second = compute(&record, price(20.0));

    assert_eq!(first, second);
}

#[rstest]
#[case(Some(8.0))]
#[case(Some(0.0))]
#[case(None)]
fn test_peg_unavailable_whenever_eps_missing(#[case] growth: Option<f64>) {
    let mut pairs: Vec<(&str, FieldValue)> = vec![(fields::REVENUE, 1000.0.into())];
    if let Some(g) = growth {
        pairs.push((fields::EPS_GROWTH_RATE, g.into()));
    }
    let record = FinancialRecord::from_pairs(pairs);

    let (metrics, _) = compute(&record, price(50.0));

    assert!(!metrics.get(Metric::PegRatio).is_available());
}

#[test]
fn test_market_price_present_for_empty_record() {
    let (metrics, _) = compute(&FinancialRecord::default(), price(12.5));

    let first = metrics.iter().next().unwrap();
    assert_eq!(first, ("Market Price", MetricValue::new(12.5)));
    assert_eq!(metrics.market_price(), 12.5);
}

#[test]
fn test_reference_example() {
    let record = FinancialRecord::from_pairs([
        (fields::REVENUE, 1000.0),
        (fields::COGS, 600.0),
        (fields::EPS, 10.0),
    ]);

    let (metrics, diagnostics) = compute(&record, price(50.0));

    assert_relative_eq!(metrics.get(Metric::PeRatio).value().unwrap(), 5.0);
    assert_relative_eq!(
        metrics.get(Metric::GrossProfitMargin).value().unwrap(),
        40.0
    );
    assert!(!metrics.get(Metric::PbRatio).is_available());

    let pb: Vec<&String> = diagnostics.iter().filter(|d| d.starts_with("P/B:")).collect();
    assert_eq!(pb, vec!["P/B: Could not parse 'Book Value Per Share'"]);
}

#[test]
fn test_zero_price_is_a_valid_numerator() {
    let record = FinancialRecord::from_pairs([(fields::EPS, 10.0)]);

    let (metrics, diagnostics) = compute(&record, price(0.0));

    assert_eq!(metrics.get(Metric::PeRatio).value(), Some(0.0));
    assert!(!diagnostics.iter().any(|d| d.starts_with("P/E:")));
}

#[test]
fn test_empty_record() {
    let (metrics, diagnostics) = compute(&FinancialRecord::default(), price(12.5));

    assert_eq!(metrics.len(), Metric::COUNT + 1);
    assert_eq!(metrics.available_count(), 0);
    assert_eq!(metrics.market_price(), 12.5);

    // One entry per attempted field extraction, in catalog order
    let expected: Vec<String> = Metric::ALL
        .iter()
        .flat_map(|m| {
            let rule = get_rule(*m);
            rule.fields
                .iter()
                .map(move |f| format!("{}: Could not parse '{}'", rule.label, f))
        })
        .collect();
    assert_eq!(diagnostics, expected);
    assert_eq!(diagnostics.len(), 18);
    assert_eq!(diagnostics[0], "P/E: Could not parse 'EPS'");
    assert_eq!(diagnostics[17], "ROA: Could not parse 'Average Total Assets'");
}

#[test]
fn test_non_numeric_field_only_affects_its_metrics() {
    let mut pairs: Vec<(&str, FieldValue)> = complete_record()
        .into_iter()
        .map(|(k, v)| (k, FieldValue::Number(v)))
        .collect();
    pairs.retain(|(k, _)| *k != fields::NET_INCOME);
    pairs.push((fields::NET_INCOME, FieldValue::Text("restated".to_string())));
    let record = FinancialRecord::from_pairs(pairs);

    let (metrics, diagnostics) = compute(&record, price(50.0));

    assert_eq!(
        metrics.unavailable().collect::<Vec<_>>(),
        vec![
            Metric::NetProfitMargin,
            Metric::ReturnOnEquity,
            Metric::ReturnOnAssets
        ]
    );
    assert_eq!(
        diagnostics,
        vec![
            "Net Margin: Could not parse 'Net Income'".to_string(),
            "ROE: Could not parse 'Net Income'".to_string(),
            "ROA: Could not parse 'Net Income'".to_string(),
        ]
    );
}

#[test]
fn test_text_numbers_are_coerced() {
    let record = FinancialRecord::from_pairs([
        (fields::CURRENT_ASSETS, "300"),
        (fields::CURRENT_LIABILITIES, " 150 "),
    ]);

    let (metrics, _) = compute(&record, price(1.0));

    assert_relative_eq!(metrics.get(Metric::CurrentRatio).value().unwrap(), 2.0);
}
