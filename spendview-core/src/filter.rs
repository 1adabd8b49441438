//! Date filter: the home-page view of a month up to a reference day.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::ReportError;
use crate::model::Transaction;

/// Select records from the first day of `reference_date`'s month through
/// the end of the reference day.
///
/// The window is inclusive on both ends: `start` is the month's first
/// day at midnight and `end` is midnight of the following day, so a
/// record stamped anywhere on the reference day (or exactly at either
/// boundary) is kept. Relative order of the input is preserved.
pub fn filter_by_date(
    records: &[Transaction],
    reference_date: NaiveDate,
) -> Result<Vec<Transaction>, ReportError> {
    let start = reference_date
        .with_day(1)
        .ok_or(ReportError::WindowOverflow)?
        .and_time(NaiveTime::MIN);
    let end = reference_date
        .succ_opt()
        .ok_or(ReportError::WindowOverflow)?
        .and_time(NaiveTime::MIN);

    Ok(records
        .iter()
        .filter(|r| start <= r.operation_date && r.operation_date <= end)
        .cloned()
        .collect())
}
