//! Category spend grouped by month over a trailing three-month window.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::ReportError;
use crate::model::Transaction;

/// Signed spend total for one calendar month, keyed by the month's last day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    pub month_end: NaiveDate,
    pub total: f64,
}

/// Spend in `category` over the trailing window ending at
/// `reference_date` (now, when not supplied), grouped by calendar month.
///
/// The window start is `reference - (day_of_month - 1) days - 90 days`:
/// a fixed 90-day offset from the reference month's first day, not
/// calendar-month arithmetic. Amounts are summed signed, so refunds in
/// the category net against spends. Months without matching records are
/// omitted; output is ascending by month end.
pub fn spend_by_category(
    records: &[Transaction],
    category: &str,
    reference_date: Option<NaiveDateTime>,
) -> Result<Vec<MonthlySpend>, ReportError> {
    let reference = reference_date.unwrap_or_else(|| Local::now().naive_local());
    let start = reference
        .checked_sub_signed(Duration::days(i64::from(reference.day()) - 1))
        .and_then(|d| d.checked_sub_signed(Duration::days(90)))
        .ok_or(ReportError::WindowOverflow)?;

    let mut months: Vec<MonthlySpend> = Vec::new();
    for record in records {
        if record.category != category
            || record.operation_date < start
            || record.operation_date > reference
        {
            continue;
        }
        let month_end = month_end(record.operation_date.date())?;
        match months.iter_mut().find(|m| m.month_end == month_end) {
            Some(m) => m.total += record.amount,
            None => months.push(MonthlySpend {
                month_end,
                total: record.amount,
            }),
        }
    }

    months.sort_by_key(|m| m.month_end);
    Ok(months)
}

/// Last day of the month `date` falls in.
fn month_end(date: NaiveDate) -> Result<NaiveDate, ReportError> {
    let next_month_first = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next_month_first
        .and_then(|d| d.pred_opt())
        .ok_or(ReportError::WindowOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_operation_date, parse_reference_date};
    use chrono::NaiveTime;

    fn tx(date: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            operation_date: parse_operation_date(date).unwrap(),
            amount,
            category: category.to_string(),
            cashback: None,
            card_number: None,
            description: String::new(),
        }
    }

    fn reference(date: &str) -> Option<NaiveDateTime> {
        Some(parse_reference_date(date).unwrap().and_time(NaiveTime::MIN))
    }

    #[test]
    fn test_groups_by_month_end_ascending() {
        let records = vec![
            tx("10.05.2020 10:00:00", -300.0, "Books"),
            tx("05.03.2020 10:00:00", -100.0, "Books"),
            tx("15.04.2020 10:00:00", -200.0, "Books"),
            tx("20.04.2020 10:00:00", -50.0, "Books"),
        ];
        let report = spend_by_category(&records, "Books", reference("2020.05.20")).unwrap();
        assert_eq!(
            report,
            vec![
                MonthlySpend {
                    month_end: NaiveDate::from_ymd_opt(2020, 3, 31).unwrap(),
                    total: -100.0,
                },
                MonthlySpend {
                    month_end: NaiveDate::from_ymd_opt(2020, 4, 30).unwrap(),
                    total: -250.0,
                },
                MonthlySpend {
                    month_end: NaiveDate::from_ymd_opt(2020, 5, 31).unwrap(),
                    total: -300.0,
                },
            ]
        );
    }

    #[test]
    fn test_window_is_ninety_days_from_month_start() {
        // Reference 2020-05-20: start = 2020-05-01 - 90 days = 2020-02-01.
        let records = vec![
            tx("01.02.2020 00:00:00", -10.0, "Books"),
            tx("31.01.2020 23:59:59", -20.0, "Books"),
        ];
        let report = spend_by_category(&records, "Books", reference("2020.05.20")).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].total, -10.0);
    }

    #[test]
    fn test_records_after_reference_excluded() {
        let records = vec![tx("21.05.2020 10:00:00", -10.0, "Books")];
        let report = spend_by_category(&records, "Books", reference("2020.05.20")).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_category_match_is_exact() {
        let records = vec![
            tx("10.05.2020 10:00:00", -10.0, "Books"),
            tx("10.05.2020 10:00:00", -20.0, "books"),
            tx("10.05.2020 10:00:00", -30.0, "Bookstore"),
        ];
        let report = spend_by_category(&records, "Books", reference("2020.05.20")).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].total, -10.0);
    }

    #[test]
    fn test_sums_signed_amounts() {
        // A refund in the category nets against spends.
        let records = vec![
            tx("10.05.2020 10:00:00", -100.0, "Books"),
            tx("12.05.2020 10:00:00", 40.0, "Books"),
        ];
        let report = spend_by_category(&records, "Books", reference("2020.05.20")).unwrap();
        assert_eq!(report[0].total, -60.0);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let records = vec![tx("10.05.2020 10:00:00", -10.0, "Food")];
        let report = spend_by_category(&records, "Books", reference("2020.05.20")).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_month_end_of_december() {
        let date = NaiveDate::from_ymd_opt(2020, 12, 15).unwrap();
        assert_eq!(
            month_end(date).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_month_end_of_leap_february() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 10).unwrap();
        assert_eq!(
            month_end(date).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );
    }
}
