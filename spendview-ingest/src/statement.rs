//! Parse bank statement CSV exports into typed transactions.
//!
//! Expected header row (column order free, resolved by name):
//! Date,Card,Amount,Cashback,Category,Description
//!
//! `Date` carries a full timestamp: `21.03.2020 14:55:21`.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use log::warn;

use spendview_core::model::{Transaction, normalize_card, parse_operation_date};

const DATE_COLUMN: &str = "Date";
const CARD_COLUMN: &str = "Card";
const AMOUNT_COLUMN: &str = "Amount";
const CASHBACK_COLUMN: &str = "Cashback";
const CATEGORY_COLUMN: &str = "Category";
const DESCRIPTION_COLUMN: &str = "Description";

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    amount: usize,
    category: Option<usize>,
    cashback: Option<usize>,
    card: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let Some(date) = find(DATE_COLUMN) else {
            bail!("statement has no '{DATE_COLUMN}' column");
        };
        let Some(amount) = find(AMOUNT_COLUMN) else {
            bail!("statement has no '{AMOUNT_COLUMN}' column");
        };

        Ok(Self {
            date,
            amount,
            category: find(CATEGORY_COLUMN),
            cashback: find(CASHBACK_COLUMN),
            card: find(CARD_COLUMN),
            description: find(DESCRIPTION_COLUMN),
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<Transaction> {
        let date_raw = record.get(self.date).unwrap_or("").trim();
        let operation_date =
            parse_operation_date(date_raw).with_context(|| format!("bad date '{date_raw}'"))?;

        let amount_raw = record.get(self.amount).unwrap_or("").trim();
        let amount: f64 = amount_raw
            .parse()
            .with_context(|| format!("bad amount '{amount_raw}'"))?;

        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        // Present but unparseable cashback means "not provided", the same
        // as an empty cell; the 1% fallback kicks in downstream.
        let cashback = self
            .cashback
            .and_then(|i| record.get(i))
            .and_then(|v| v.trim().parse::<f64>().ok());

        let card_number = self
            .card
            .and_then(|i| record.get(i))
            .and_then(normalize_card)
            .map(str::to_string);

        Ok(Transaction {
            operation_date,
            amount,
            category: field(self.category),
            cashback,
            card_number,
            description: field(self.description),
        })
    }
}

/// Read a statement from any reader. Rows that fail to parse are
/// dropped with a warning; only a missing header or an unreadable
/// source is an error.
pub fn read_statement<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().context("reading statement header")?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2; // 1-based, after the header
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("dropping malformed statement line {line}: {e}");
                continue;
            }
        };
        match columns.parse_row(&record) {
            Ok(tx) => transactions.push(tx),
            Err(e) => warn!("dropping statement line {line}: {e:#}"),
        }
    }
    Ok(transactions)
}

/// Parse a statement CSV file, returning all valid transactions.
pub fn load_statement_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_statement(file).with_context(|| format!("parsing {}", path.display()))
}
