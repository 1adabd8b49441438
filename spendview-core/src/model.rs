//! Transaction record model: the normalized shape every report runs on.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Transaction timestamps in the bank export: `21.03.2020 14:55:21`.
pub const OPERATION_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
/// Reference dates for the spending report: `2020.03.21`.
pub const REFERENCE_DATE_FORMAT: &str = "%Y.%m.%d";
/// Home-page input dates and top-transaction output dates: `21.03.2020`.
pub const INPUT_DATE_FORMAT: &str = "%d.%m.%Y";

/// One financial event from the bank export.
///
/// Negative `amount` is a spend, positive is income or a refund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub operation_date: NaiveDateTime,
    pub amount: f64,
    pub category: String,
    /// Cashback as reported by the bank. Absent or negative values mean
    /// "not provided" and trigger the 1% fallback rule downstream.
    pub cashback: Option<f64>,
    /// Masked card number ("*7197"). `None` means the spend cannot be
    /// attributed to a card.
    pub card_number: Option<String>,
    pub description: String,
}

impl Transaction {
    /// Returns true if this is a spend (negative amount)
    pub fn is_spend(&self) -> bool {
        self.amount < 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Cashback usable as-is: present and non-negative. Anything else
    /// falls back to the 1%-of-spend approximation.
    pub fn explicit_cashback(&self) -> Option<f64> {
        self.cashback.filter(|v| *v >= 0.0)
    }

    /// Card key for per-card aggregation, or `None` when the record is
    /// unattributable (no card, blank, or a literal "nan" from the export).
    pub fn card_key(&self) -> Option<&str> {
        self.card_number.as_deref().and_then(normalize_card)
    }
}

/// Filters out blank and "nan" card values, returning the trimmed key.
pub fn normalize_card(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse a transaction timestamp (`DD.MM.YYYY HH:MM:SS`).
pub fn parse_operation_date(value: &str) -> Result<NaiveDateTime, ReportError> {
    NaiveDateTime::parse_from_str(value.trim(), OPERATION_DATE_FORMAT).map_err(|_| {
        ReportError::BadDate {
            value: value.to_string(),
            format: OPERATION_DATE_FORMAT,
        }
    })
}

/// Parse a home-page input date (`DD.MM.YYYY`).
pub fn parse_input_date(value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).map_err(|_| ReportError::BadDate {
        value: value.to_string(),
        format: INPUT_DATE_FORMAT,
    })
}

/// Parse a spending-report reference date (`YYYY.MM.DD`).
pub fn parse_reference_date(value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value.trim(), REFERENCE_DATE_FORMAT).map_err(|_| {
        ReportError::BadDate {
            value: value.to_string(),
            format: REFERENCE_DATE_FORMAT,
        }
    })
}

/// Round to 2 decimals (card summaries).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 5 decimals (cashback analyzer fallback).
pub fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}
