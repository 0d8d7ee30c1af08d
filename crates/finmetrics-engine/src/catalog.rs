//! Metric Catalog
//!
//! One rule per metric, in evaluation order. A rule names the record fields
//! it reads, the metrics it builds on, and a compute function that only runs
//! once every input is known. Adding a metric means adding a rule here and a
//! variant to [`Metric`].

use crate::diagnostics::Diagnostics;
use crate::extract::extract;
use crate::metric::{Metric, MetricSet, MetricValue};
use crate::safe_div::safe_divide;
use finmetrics_data::{FinancialRecord, fields};

/// Inputs handed to a rule's compute function. Every field value is present.
#[derive(Debug)]
pub(crate) struct RuleInputs<'a> {
    values: &'a [f64],
    price: f64,
    computed: &'a MetricSet,
}

impl RuleInputs<'_> {
    /// Value of the `n`th required field.
    fn field(&self, n: usize) -> Option<f64> {
        self.values.get(n).copied()
    }

    fn metric(&self, metric: Metric) -> Option<f64> {
        self.computed.get(metric).value()
    }
}

type ComputeFn = fn(&RuleInputs<'_>, &mut Diagnostics) -> Option<f64>;

/// Definition of one catalog metric.
#[derive(Debug)]
pub struct MetricRule {
    /// Metric produced
    pub metric: Metric,
    /// Prefix used in diagnostics (`"P/E"`, `"Gross Margin"`)
    pub label: &'static str,
    /// Record fields read, in extraction order
    pub fields: &'static [&'static str],
    /// Earlier metrics this one builds on
    pub depends_on: &'static [Metric],
    /// Human-readable formula
    pub formula: &'static str,
    compute: ComputeFn,
}

impl MetricRule {
    /// Evaluate the rule against `record`.
    ///
    /// Every required field is extracted, so each missing one is reported.
    /// If any is missing, or a dependency is unavailable, the metric is
    /// unavailable with no further diagnostic.
    pub(crate) fn evaluate(
        &self,
        record: &FinancialRecord,
        price: f64,
        computed: &MetricSet,
        diagnostics: &mut Diagnostics,
    ) -> MetricValue {
        let extracted: Vec<Option<f64>> = self
            .fields
            .iter()
            .map(|field| extract(record, field, self.label, diagnostics))
            .collect();
        let Some(values) = extracted.into_iter().collect::<Option<Vec<f64>>>() else {
            return MetricValue::UNAVAILABLE;
        };

        if self
            .depends_on
            .iter()
            .any(|dep| !computed.get(*dep).is_available())
        {
            return MetricValue::UNAVAILABLE;
        }

        let inputs = RuleInputs {
            values: &values,
            price,
            computed,
        };
        let Some(raw) = (self.compute)(&inputs, diagnostics) else {
            return MetricValue::UNAVAILABLE;
        };

        let scaled = if self.metric.is_percentage() {
            raw * 100.0
        } else {
            raw
        };
        if !scaled.is_finite() {
            diagnostics.push(format!(
                "{}: Division failed: scaled result is not finite",
                self.label
            ));
        }
        MetricValue::new(scaled)
    }
}

fn pe_ratio(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        Some(inputs.price),
        inputs.field(0),
        "P/E: EPS is zero or missing",
        diagnostics,
    )
}

fn pb_ratio(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        Some(inputs.price),
        inputs.field(0),
        "P/B: Book Value Per Share is zero or missing",
        diagnostics,
    )
}

fn ps_ratio(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        Some(inputs.price),
        inputs.field(0),
        "P/S: Revenue Per Share is zero or missing",
        diagnostics,
    )
}

// No sign guard: a negative growth rate yields a negative PEG.
fn peg_ratio(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        inputs.metric(Metric::PeRatio),
        inputs.field(0),
        "PEG: Growth rate is zero or missing",
        diagnostics,
    )
}

fn gross_margin(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    let revenue = inputs.field(0)?;
    let cogs = inputs.field(1)?;
    safe_divide(
        Some(revenue - cogs),
        Some(revenue),
        "Gross Margin: Revenue zero",
        diagnostics,
    )
}

fn operating_margin(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        inputs.field(0),
        inputs.field(1),
        "Operating Margin: Revenue zero",
        diagnostics,
    )
}

fn net_margin(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        inputs.field(0),
        inputs.field(1),
        "Net Margin: Revenue zero",
        diagnostics,
    )
}

fn current_ratio(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        inputs.field(0),
        inputs.field(1),
        "Current Ratio: Liabilities zero",
        diagnostics,
    )
}

fn debt_to_equity(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(
        inputs.field(0),
        inputs.field(1),
        "Debt/Equity: Equity zero",
        diagnostics,
    )
}

fn return_on_equity(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(inputs.field(0), inputs.field(1), "ROE: Equity zero", diagnostics)
}

fn return_on_assets(inputs: &RuleInputs<'_>, diagnostics: &mut Diagnostics) -> Option<f64> {
    safe_divide(inputs.field(0), inputs.field(1), "ROA: Assets zero", diagnostics)
}

static RULES: [MetricRule; Metric::COUNT] = [
    // Valuation
    MetricRule {
        metric: Metric::PeRatio,
        label: "P/E",
        fields: &[fields::EPS],
        depends_on: &[],
        formula: "Market Price / EPS",
        compute: pe_ratio,
    },
    MetricRule {
        metric: Metric::PbRatio,
        label: "P/B",
        fields: &[fields::BOOK_VALUE_PER_SHARE],
        depends_on: &[],
        formula: "Market Price / Book Value Per Share",
        compute: pb_ratio,
    },
    MetricRule {
        metric: Metric::PsRatio,
        label: "P/S",
        fields: &[fields::REVENUE_PER_SHARE],
        depends_on: &[],
        formula: "Market Price / Revenue Per Share",
        compute: ps_ratio,
    },
    MetricRule {
        metric: Metric::PegRatio,
        label: "PEG",
        fields: &[fields::EPS_GROWTH_RATE],
        depends_on: &[Metric::PeRatio],
        formula: "P/E Ratio / EPS Growth Rate (%)",
        compute: peg_ratio,
    },
    // Profitability
    MetricRule {
        metric: Metric::GrossProfitMargin,
        label: "Gross Margin",
        fields: &[fields::REVENUE, fields::COGS],
        depends_on: &[],
        formula: "(Revenue - COGS) / Revenue x 100",
        compute: gross_margin,
    },
    MetricRule {
        metric: Metric::OperatingMargin,
        label: "Operating Margin",
        fields: &[fields::OPERATING_INCOME, fields::REVENUE],
        depends_on: &[],
        formula: "Operating Income / Revenue x 100",
        compute: operating_margin,
    },
    MetricRule {
        metric: Metric::NetProfitMargin,
        label: "Net Margin",
        fields: &[fields::NET_INCOME, fields::REVENUE],
        depends_on: &[],
        formula: "Net Income / Revenue x 100",
        compute: net_margin,
    },
    // Liquidity
    MetricRule {
        metric: Metric::CurrentRatio,
        label: "Current Ratio",
        fields: &[fields::CURRENT_ASSETS, fields::CURRENT_LIABILITIES],
        depends_on: &[],
        formula: "Current Assets / Current Liabilities",
        compute: current_ratio,
    },
    // Leverage
    MetricRule {
        metric: Metric::DebtToEquity,
        label: "Debt/Equity",
        fields: &[fields::TOTAL_DEBT, fields::TOTAL_EQUITY],
        depends_on: &[],
        formula: "Total Debt / Total Equity",
        compute: debt_to_equity,
    },
    // Returns
    MetricRule {
        metric: Metric::ReturnOnEquity,
        label: "ROE",
        fields: &[fields::NET_INCOME, fields::AVERAGE_SHAREHOLDERS_EQUITY],
        depends_on: &[],
        formula: "Net Income / Average Shareholders Equity x 100",
        compute: return_on_equity,
    },
    MetricRule {
        metric: Metric::ReturnOnAssets,
        label: "ROA",
        fields: &[fields::NET_INCOME, fields::AVERAGE_TOTAL_ASSETS],
        depends_on: &[],
        formula: "Net Income / Average Total Assets x 100",
        compute: return_on_assets,
    },
];

/// All rules in evaluation order.
pub fn rules() -> &'static [MetricRule] {
    &RULES
}

/// Rule for a given metric.
pub fn get_rule(metric: Metric) -> &'static MetricRule {
    &RULES[metric.index()]
}
