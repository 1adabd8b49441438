//! Per-card spend and cashback rollup.

use serde::Serialize;

use crate::model::{Transaction, round2};

/// Categories that never earn cashback, whatever the export says.
pub const NO_CASHBACK_CATEGORIES: [&str; 2] = ["Transfers", "Cash"];

/// Spend and cashback totals for one card, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

/// Roll spends up per card.
///
/// Records without an attributable card (missing, blank, "nan") are
/// skipped. Only spends (`amount < 0`) accumulate: absolute amount into
/// `total_spent`, and cashback either as reported (when present and
/// non-negative) or as the 1% fallback. Transfers and cash withdrawals
/// never earn cashback. Cards appear in first-seen order.
pub fn aggregate_by_card(records: &[Transaction]) -> Vec<CardSummary> {
    let mut cards: Vec<CardSummary> = Vec::new();

    for record in records {
        let Some(card) = record.card_key() else {
            continue;
        };

        let idx = match cards.iter().position(|c| c.last_digits == card) {
            Some(i) => i,
            None => {
                cards.push(CardSummary {
                    last_digits: card.to_string(),
                    total_spent: 0.0,
                    cashback: 0.0,
                });
                cards.len() - 1
            }
        };

        if !record.is_spend() {
            continue;
        }

        cards[idx].total_spent += record.abs_amount();

        if !NO_CASHBACK_CATEGORIES.contains(&record.category.as_str()) {
            let cashback = record
                .explicit_cashback()
                .unwrap_or(record.amount * -0.01);
            cards[idx].cashback += cashback;
        }
    }

    for card in &mut cards {
        card.total_spent = round2(card.total_spent);
        card.cashback = round2(card.cashback);
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_operation_date;

    fn tx(card: Option<&str>, amount: f64, category: &str, cashback: Option<f64>) -> Transaction {
        Transaction {
            operation_date: parse_operation_date("15.05.2020 10:00:00").unwrap(),
            amount,
            category: category.to_string(),
            cashback,
            card_number: card.map(str::to_string),
            description: String::new(),
        }
    }

    #[test]
    fn test_unattributable_cards_never_appear() {
        let records = vec![
            tx(None, -100.0, "Food", None),
            tx(Some(""), -100.0, "Food", None),
            tx(Some("  "), -100.0, "Food", None),
            tx(Some("nan"), -100.0, "Food", None),
            tx(Some("NaN"), -100.0, "Food", None),
        ];
        assert!(aggregate_by_card(&records).is_empty());
    }

    #[test]
    fn test_excluded_categories_spend_without_cashback() {
        let records = vec![
            tx(Some("*7197"), -500.0, "Transfers", Some(50.0)),
            tx(Some("*7197"), -200.0, "Food", Some(5.0)),
        ];
        let cards = aggregate_by_card(&records);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].total_spent, 700.0);
        assert_eq!(cards[0].cashback, 5.0);
    }

    #[test]
    fn test_cash_category_also_excluded() {
        let records = vec![tx(Some("*1000"), -300.0, "Cash", None)];
        let cards = aggregate_by_card(&records);
        assert_eq!(cards[0].total_spent, 300.0);
        assert_eq!(cards[0].cashback, 0.0);
    }

    #[test]
    fn test_fallback_cashback_is_one_percent() {
        let records = vec![tx(Some("*7197"), -1000.0, "Food", None)];
        let cards = aggregate_by_card(&records);
        assert_eq!(cards[0].cashback, 10.0);
    }

    #[test]
    fn test_negative_cashback_triggers_fallback() {
        let records = vec![tx(Some("*7197"), -1000.0, "Food", Some(-3.0))];
        let cards = aggregate_by_card(&records);
        assert_eq!(cards[0].cashback, 10.0);
    }

    #[test]
    fn test_income_contributes_nothing_but_card_appears() {
        let records = vec![tx(Some("*7197"), 2500.0, "Salary", None)];
        let cards = aggregate_by_card(&records);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].total_spent, 0.0);
        assert_eq!(cards[0].cashback, 0.0);
    }

    #[test]
    fn test_totals_are_non_negative_and_rounded() {
        let records = vec![
            tx(Some("*7197"), -33.333, "Food", None),
            tx(Some("*7197"), -66.667, "Food", None),
        ];
        let cards = aggregate_by_card(&records);
        assert_eq!(cards[0].total_spent, 100.0);
        // 0.33333 + 0.66667 = 1.0 of fallback cashback
        assert_eq!(cards[0].cashback, 1.0);
        assert!(cards[0].total_spent >= 0.0);
        assert!(cards[0].cashback >= 0.0);
    }

    #[test]
    fn test_cards_keep_first_seen_order() {
        let records = vec![
            tx(Some("*2222"), -10.0, "Food", None),
            tx(Some("*1111"), -10.0, "Food", None),
            tx(Some("*2222"), -10.0, "Food", None),
        ];
        let cards = aggregate_by_card(&records);
        let order: Vec<&str> = cards.iter().map(|c| c.last_digits.as_str()).collect();
        assert_eq!(order, vec!["*2222", "*1111"]);
    }
}
