//! Aggregation engine
//!
//! Group-by-sum views over a filtered record set. Only records whose amount
//! parsed contribute to totals; a group whose records all lack an amount is
//! still reported, with a zero total.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CommitmentRecord, Money};

/// Default size of the beneficiary and organ rankings
pub const DEFAULT_TOP_N: usize = 10;

/// One group of a group-by-sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    /// Group value (beneficiary, organ, category)
    pub key: String,
    /// Sum of parsed amounts
    pub total: Money,
    /// Records contributing to `total`
    pub count: usize,
}

/// A category with its share of the category total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Percentage of the sum over all categories; 0 when that sum is zero
    pub share: f64,
}

/// Summed value for one issue date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub total: Money,
}

/// Sum of amounts per exact issue date, ascending by date
///
/// Records without an issue date are skipped.
pub fn time_series(records: &[CommitmentRecord]) -> Vec<TimePoint> {
    let mut by_date: BTreeMap<NaiveDate, Money> = BTreeMap::new();

    for record in records {
        if let Some(date) = record.issue_date {
            *by_date.entry(date).or_default() += record.amount.unwrap_or_default();
        }
    }

    by_date
        .into_iter()
        .map(|(date, total)| TimePoint { date, total })
        .collect()
}

/// Sum of amounts per key, groups in order of first appearance
pub fn group_totals<F>(records: &[CommitmentRecord], key: F) -> Vec<AggregateRow>
where
    F: Fn(&CommitmentRecord) -> &str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *index.entry(k).or_insert_with(|| {
            rows.push(AggregateRow {
                key: k.to_string(),
                total: Money::zero(),
                count: 0,
            });
            rows.len() - 1
        });

        if let Some(amount) = record.amount {
            rows[slot].total += amount;
            rows[slot].count += 1;
        }
    }

    rows
}

/// The `n` groups with the largest totals, descending
///
/// Ties keep their order of first appearance (the sort is stable).
pub fn rank_top_n<F>(records: &[CommitmentRecord], key: F, n: usize) -> Vec<AggregateRow>
where
    F: Fn(&CommitmentRecord) -> &str,
{
    let mut rows = group_totals(records, key);
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows.truncate(n);
    rows
}

/// Top beneficiaries ("Favorecido") by committed value
pub fn top_beneficiaries(records: &[CommitmentRecord], n: usize) -> Vec<AggregateRow> {
    rank_top_n(records, |r| r.beneficiary.as_str(), n)
}

/// Top government organs ("Órgão") by committed value
pub fn top_organs(records: &[CommitmentRecord], n: usize) -> Vec<AggregateRow> {
    rank_top_n(records, |r| r.organ.as_str(), n)
}

/// Every category with its total and share, in order of first appearance
pub fn category_distribution(records: &[CommitmentRecord]) -> Vec<CategoryShare> {
    let rows = group_totals(records, |r| r.expense_category.as_str());
    let overall: Money = rows.iter().map(|r| r.total).sum();

    rows.into_iter()
        .map(|row| CategoryShare {
            share: share_of(row.total, overall),
            category: row.key,
            total: row.total,
            count: row.count,
        })
        .collect()
}

/// Sum of every parsed amount in `records`
pub fn grand_total(records: &[CommitmentRecord]) -> Money {
    records.iter().filter_map(|r| r.amount).sum()
}

fn share_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.amount()
        .checked_div(whole.amount())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .unwrap_or_else(|| part.to_f64() / whole.to_f64() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(beneficiary: &str, category: &str, day: Option<u32>, reais: Option<i64>) -> CommitmentRecord {
        CommitmentRecord::new(
            format!("{beneficiary}-{category}"),
            day.map(|d| date(2024, 1, d)),
            category,
            beneficiary,
            "Org",
            reais.map(Money::from_reais),
        )
    }

    #[test]
    fn test_time_series_sorted_and_summed() {
        let records = vec![
            rec("A", "X", Some(3), Some(5)),
            rec("B", "X", Some(1), Some(2)),
            rec("C", "X", Some(3), Some(7)),
            rec("D", "X", None, Some(100)),
            rec("E", "X", Some(2), None),
        ];

        let series = time_series(&records);
        assert_eq!(
            series,
            vec![
                TimePoint { date: date(2024, 1, 1), total: Money::from_reais(2) },
                TimePoint { date: date(2024, 1, 2), total: Money::zero() },
                TimePoint { date: date(2024, 1, 3), total: Money::from_reais(12) },
            ]
        );
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let records = vec![
            rec("Tie1", "X", Some(1), Some(50)),
            rec("Big", "X", Some(1), Some(90)),
            rec("Tie2", "X", Some(1), Some(50)),
            rec("Small", "X", Some(1), Some(1)),
            rec("Big", "X", Some(2), Some(10)),
        ];

        let top = top_beneficiaries(&records, DEFAULT_TOP_N);
        let keys: Vec<_> = top.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Big", "Tie1", "Tie2", "Small"]);
        assert_eq!(top[0].total, Money::from_reais(100));
        assert_eq!(top[0].count, 2);
    }

    #[test]
    fn test_ranking_truncates() {
        let records: Vec<_> = (0..15)
            .map(|i| rec(&format!("B{i}"), "X", Some(1), Some(i)))
            .collect();

        let top = top_beneficiaries(&records, DEFAULT_TOP_N);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].key, "B14");
        assert_eq!(top[9].key, "B5");
    }

    #[test]
    fn test_null_amount_groups_report_zero() {
        let records = vec![rec("Ghost", "X", Some(1), None), rec("Real", "X", Some(1), Some(3))];

        let top = top_beneficiaries(&records, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].key, "Ghost");
        assert_eq!(top[1].total, Money::zero());
        assert_eq!(top[1].count, 0);
    }

    #[test]
    fn test_category_distribution_preserves_mass() {
        let records = vec![
            rec("A", "Correntes", Some(1), Some(30)),
            rec("B", "Capital", Some(1), Some(10)),
            rec("C", "Correntes", Some(2), None),
            rec("D", "Capital", Some(2), Some(60)),
        ];

        let dist = category_distribution(&records);
        let sum: Money = dist.iter().map(|c| c.total).sum();
        assert_eq!(sum, grand_total(&records));
        assert_eq!(sum, Money::from_reais(100));

        assert_eq!(dist[0].category, "Correntes");
        assert!((dist[0].share - 30.0).abs() < 1e-9);
        assert!((dist[1].share - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_degrades_gracefully() {
        assert!(time_series(&[]).is_empty());
        assert!(top_organs(&[], 10).is_empty());
        assert!(category_distribution(&[]).is_empty());
        assert_eq!(grand_total(&[]), Money::zero());
    }

    #[test]
    fn test_zero_overall_share() {
        let records = vec![rec("A", "X", Some(1), Some(5)), rec("B", "Y", Some(1), Some(-5))];
        let dist = category_distribution(&records);
        assert!(dist.iter().all(|c| c.share == 0.0));
    }

    #[test]
    fn test_extreme_amounts_do_not_panic() {
        let max = Money::new(Decimal::MAX);
        let records = vec![
            CommitmentRecord::new("1", Some(date(2024, 1, 1)), "A", "F", "O", Some(max)),
            CommitmentRecord::new("2", Some(date(2024, 1, 1)), "A", "F", "O", Some(max)),
            CommitmentRecord::new("3", Some(date(2024, 1, 1)), "B", "G", "O", Some(-max)),
        ];

        assert_eq!(grand_total(&records), Money::zero());
        assert_eq!(time_series(&records)[0].total, Money::zero());
        assert_eq!(top_beneficiaries(&records, 10)[0].total, max);

        let shares = category_distribution(&records);
        assert!(shares.iter().all(|c| c.share.is_finite()));
    }

    #[test]
    fn test_share_falls_back_to_float_on_overflow() {
        let share = share_of(Money::new(Decimal::MAX), Money::from_cents(1));
        assert!(share > 1e30);
    }
}
