//! Top-N transactions ranked by absolute amount.

use serde::Serialize;

use crate::model::{INPUT_DATE_FORMAT, Transaction};

/// How many transactions the home page shows.
pub const TOP_TRANSACTION_COUNT: usize = 5;

/// Projection of a transaction for the top list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTransaction {
    /// `DD.MM.YYYY`
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Return the `n` largest transactions by absolute amount.
///
/// The sort is stable, so records with equal absolute amounts keep
/// their original relative order.
pub fn top_n(records: &[Transaction], n: usize) -> Vec<TopTransaction> {
    let mut ranked: Vec<&Transaction> = records.iter().collect();
    ranked.sort_by(|a, b| b.abs_amount().total_cmp(&a.abs_amount()));

    ranked
        .into_iter()
        .take(n)
        .map(|r| TopTransaction {
            date: r.operation_date.format(INPUT_DATE_FORMAT).to_string(),
            amount: r.amount,
            category: r.category.clone(),
            description: r.description.clone(),
        })
        .collect()
}
