//! Cashback totals per category for one calendar month.

use chrono::Datelike;
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::error::ReportError;
use crate::model::{Transaction, round5};

/// Category -> accumulated cashback for one (year, month).
///
/// Entries keep first-seen category order so the serialized report is
/// byte-stable across runs on the same input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashbackReport {
    entries: Vec<(String, f64)>,
}

impl CashbackReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), *v))
    }

    /// Sum across all categories.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    fn accumulate(&mut self, category: &str, cashback: f64) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, v)) => *v += cashback,
            None => self.entries.push((category.to_string(), cashback)),
        }
    }
}

impl Serialize for CashbackReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, value) in &self.entries {
            map.serialize_entry(category, value)?;
        }
        map.end()
    }
}

/// Total cashback per category over the spends of one (year, month).
///
/// Explicit non-negative cashback counts as-is; otherwise the 1%
/// fallback applies, rounded to 5 decimals. Unlike the card rollup this
/// report has no excluded categories: transfers and cash accumulate too.
pub fn cashback_by_category(
    records: &[Transaction],
    year: i32,
    month: u32,
) -> Result<CashbackReport, ReportError> {
    if !(1..=12).contains(&month) {
        return Err(ReportError::MonthOutOfRange(month));
    }

    let mut report = CashbackReport::default();
    for record in records {
        if record.operation_date.year() != year
            || record.operation_date.month() != month
            || !record.is_spend()
        {
            continue;
        }
        let cashback = match record.explicit_cashback() {
            Some(value) => value,
            None => round5(record.amount * -0.01),
        };
        report.accumulate(&record.category, cashback);
    }
    Ok(report)
}
