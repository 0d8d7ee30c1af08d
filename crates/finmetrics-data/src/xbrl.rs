//! XBRL concept names mapped onto the record vocabulary.
//!
//! Filers use different US-GAAP tags for the same line item, and the same
//! filer may switch tags between periods. Indian listed companies file under
//! the SEBI `in-capmkt` taxonomy with yet another set of names. The mapper
//! folds the common variations onto the field names the ratio engine reads.

use crate::fields;
use std::collections::HashMap;

/// Maps XBRL concept names to record field names.
#[derive(Debug, Clone)]
pub struct XbrlTagMapper {
    /// Field name to the list of XBRL tags that carry it, in preference order
    tags: HashMap<&'static str, Vec<&'static str>>,
}

impl XbrlTagMapper {
    /// Create a mapper with the standard US-GAAP and `in-capmkt` mappings.
    pub fn new() -> Self {
        let mut tags: HashMap<&'static str, Vec<&'static str>> = HashMap::new();

        // Per share
        tags.insert(
            fields::EPS,
            vec![
                "EarningsPerShareDiluted",
                "EarningsPerShareBasic",
                "DilutedEarningsLossPerShareFromContinuingAndDiscontinuedOperations",
                "BasicEarningsLossPerShareFromContinuingAndDiscontinuedOperations",
            ],
        );
        tags.insert(
            fields::SHARES_OUTSTANDING,
            vec![
                "WeightedAverageNumberOfDilutedSharesOutstanding",
                "WeightedAverageNumberOfSharesOutstandingBasic",
                "WeightedAverageNumberOfEquitySharesOutstanding",
            ],
        );

        // Income statement
        tags.insert(
            fields::REVENUE,
            vec![
                "Revenues",
                "RevenueFromContractWithCustomerExcludingAssessedTax",
                "SalesRevenueNet",
                "RevenueFromContractWithCustomerIncludingAssessedTax",
                "RevenueFromOperations",
            ],
        );
        tags.insert(
            fields::COGS,
            vec![
                "CostOfRevenue",
                "CostOfGoodsAndServicesSold",
                "CostOfGoodsSold",
            ],
        );
        tags.insert(fields::OPERATING_INCOME, vec!["OperatingIncomeLoss"]);
        tags.insert(
            fields::NET_INCOME,
            vec![
                "NetIncomeLoss",
                "ProfitLoss",
                "NetIncomeLossAvailableToCommonStockholdersBasic",
                "ProfitLossForPeriod",
            ],
        );

        // Balance sheet
        tags.insert(fields::CURRENT_ASSETS, vec!["AssetsCurrent"]);
        tags.insert(fields::CURRENT_LIABILITIES, vec!["LiabilitiesCurrent"]);
        tags.insert(
            fields::TOTAL_DEBT,
            vec![
                "LongTermDebt",
                "LongTermDebtNoncurrent",
                "LongTermDebtAndCapitalLeaseObligations",
                "DebtInstrumentCarryingAmount",
            ],
        );
        tags.insert(
            fields::TOTAL_EQUITY,
            vec![
                "StockholdersEquity",
                "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest",
                "Equity",
            ],
        );
        tags.insert(fields::TOTAL_LIABILITIES, vec!["Liabilities"]);

        Self { tags }
    }

    /// Possible XBRL tags for a record field.
    pub fn get_tags(&self, field: &str) -> Option<&[&'static str]> {
        self.tags.get(field).map(Vec::as_slice)
    }

    /// Resolves an element name to a record field.
    ///
    /// Accepts names with or without a taxonomy prefix (`us-gaap:Revenues`).
    /// Vocabulary names map to themselves.
    pub fn canonical(&self, name: &str) -> Option<&'static str> {
        if let Some(field) = fields::known(name) {
            return Some(field);
        }
        let local = local_name(name);
        self.tags
            .iter()
            .find(|(_, tags)| tags.contains(&local))
            .map(|(field, _)| *field)
    }

    /// Preference rank of `name` among the tags for its field, lower is
    /// better. Vocabulary names rank ahead of every XBRL tag.
    pub fn rank(&self, name: &str) -> usize {
        if fields::known(name).is_some() {
            return 0;
        }
        let local = local_name(name);
        self.canonical(name)
            .and_then(|field| self.get_tags(field))
            .and_then(|tags| tags.iter().position(|t| *t == local))
            .map_or(usize::MAX, |pos| pos + 1)
    }
}

/// Strips a taxonomy prefix: `in-capmkt:Equity` becomes `Equity`.
pub(crate) fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl Default for XbrlTagMapper {
    fn default() -> Self {
        Self::new()
    }
}
