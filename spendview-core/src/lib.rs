//! spendview-core: pure aggregation and reporting over bank transactions.

pub mod cards;
pub mod cashback;
pub mod error;
pub mod filter;
pub mod greeting;
pub mod model;
pub mod report;
pub mod spending;
pub mod top;

pub use cards::{CardSummary, aggregate_by_card};
pub use cashback::{CashbackReport, cashback_by_category};
pub use error::ReportError;
pub use filter::filter_by_date;
pub use greeting::DayPart;
pub use model::{
    INPUT_DATE_FORMAT, OPERATION_DATE_FORMAT, REFERENCE_DATE_FORMAT, Transaction,
    parse_input_date, parse_operation_date, parse_reference_date,
};
pub use report::{ExchangeRate, HomePage, StockPrice, build_home_page};
pub use spending::{MonthlySpend, spend_by_category};
pub use top::{TOP_TRANSACTION_COUNT, TopTransaction, top_n};
