//! Home-page report composer.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::cards::{CardSummary, aggregate_by_card};
use crate::error::ReportError;
use crate::filter::filter_by_date;
use crate::greeting::DayPart;
use crate::model::Transaction;
use crate::top::{TOP_TRANSACTION_COUNT, TopTransaction, top_n};

/// Exchange rate for one currency code. `rate: None` means the fetch
/// for that code failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRate {
    pub currency: String,
    pub rate: Option<f64>,
}

/// Latest price for one stock symbol. `price: None` means the fetch
/// for that symbol failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: Option<f64>,
}

/// The home-page payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub greeting: String,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub exchange_rates: Vec<ExchangeRate>,
    pub stocks: Vec<StockPrice>,
}

/// Assemble the home page: greeting from `local_time`, card totals and
/// top 5 transactions over the month-to-reference window, and the
/// already-fetched market quotes passed through untouched.
pub fn build_home_page(
    records: &[Transaction],
    reference_date: NaiveDate,
    local_time: NaiveTime,
    exchange_rates: Vec<ExchangeRate>,
    stocks: Vec<StockPrice>,
) -> Result<HomePage, ReportError> {
    let filtered = filter_by_date(records, reference_date)?;

    Ok(HomePage {
        greeting: DayPart::from_hour(local_time.hour()).greeting().to_string(),
        cards: aggregate_by_card(&filtered),
        top_transactions: top_n(&filtered, TOP_TRANSACTION_COUNT),
        exchange_rates,
        stocks,
    })
}
