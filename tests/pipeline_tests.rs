//! End-to-end tests of load, filter, aggregate, format and export

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use empenho_report::config::ColumnSchema;
use empenho_report::display::{format_currency, format_with_magnitude};
use empenho_report::export::export_id_values;
use empenho_report::models::{DateRange, FilterCriteria, Money};
use empenho_report::reports::{render, EmpenhoReport, ReportOptions};
use empenho_report::services::{filter, RecordLoader};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/empenhos.csv")
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn money(s: &str) -> Money {
    Money::parse(s).unwrap()
}

fn full_report() -> EmpenhoReport {
    let records = RecordLoader::default().load_path(&fixture()).unwrap();
    render(&records, &FilterCriteria::full(&records), ReportOptions::default())
}

#[test]
fn fixture_loads_every_row() {
    let records = RecordLoader::default().load_path(&fixture()).unwrap();

    assert_eq!(records.len(), 14);
    assert_eq!(records[3].amount, Some(money("1234.56")));
    assert_eq!(records[5].amount, None);
    assert_eq!(records[12].issue_date, None);
}

#[test]
fn full_criteria_drops_only_undated_rows() {
    let report = full_report();

    assert_eq!(report.total_loaded, 14);
    assert_eq!(report.records.len(), 13);
    assert!(report.record_ids().all(|id| id != "NE013"));
    assert_eq!(report.null_amounts, 1);
}

#[test]
fn totals_agree_across_views() {
    let report = full_report();
    let expected = money("3255735.06");

    assert_eq!(report.grand_total, expected);

    let series: Money = report.time_series.iter().map(|p| p.total).sum();
    assert_eq!(series, expected);

    let categories: Money = report.category_distribution.iter().map(|c| c.total).sum();
    assert_eq!(categories, expected);

    let shares: f64 = report.category_distribution.iter().map(|c| c.share).sum();
    assert!((shares - 100.0).abs() < 1e-9);
}

#[test]
fn time_series_is_ascending_with_zero_for_valueless_dates() {
    let report = full_report();
    let dates: Vec<NaiveDate> = report.time_series.iter().map(|p| p.date).collect();

    let mut sorted = dates.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(dates, sorted);

    let jan2 = report.time_series.iter().find(|p| p.date == date(1, 2)).unwrap();
    assert_eq!(jan2.total, money("1750000.50"));

    // NE005 carries a value on the same day as the valueless NE006
    let feb10 = report.time_series.iter().find(|p| p.date == date(2, 10)).unwrap();
    assert_eq!(feb10.total, money("800000"));
}

#[test]
fn beneficiary_ranking_is_truncated_and_descending() {
    let report = full_report();
    let keys: Vec<&str> = report
        .top_beneficiaries
        .iter()
        .map(|r| r.key.as_str())
        .collect();

    assert_eq!(keys.len(), 10);
    assert_eq!(keys[0], "ALFA LTDA");
    assert_eq!(report.top_beneficiaries[0].total, money("2000000"));
    assert_eq!(keys[9], "MU SA");
    assert_eq!(report.top_beneficiaries[9].total, money("5000"));
    assert!(!keys.contains(&"DELTA EIRELI"));
    assert!(!keys.contains(&"ZETA SA"));
    assert!(report
        .top_beneficiaries
        .windows(2)
        .all(|w| w[0].total >= w[1].total));
}

#[test]
fn organs_are_ranked_descending() {
    let report = full_report();
    let organs: Vec<(&str, Money)> = report
        .top_organs
        .iter()
        .map(|r| (r.key.as_str(), r.total))
        .collect();

    assert_eq!(
        organs,
        vec![
            ("Ministério da Saúde", money("2019000")),
            ("Ministério da Educação", money("1149000.50")),
            ("Ministério da Fazenda", money("51500")),
            ("Ministério da Defesa", money("36234.56")),
        ]
    );
}

#[test]
fn smaller_ranking_size_is_honoured() {
    let records = RecordLoader::default().load_path(&fixture()).unwrap();
    let report = render(
        &records,
        &FilterCriteria::full(&records),
        ReportOptions { top_n: 3 },
    );

    assert_eq!(report.top_beneficiaries.len(), 3);
    assert_eq!(report.top_organs.len(), 3);
    // Rankings truncate, the distribution never does
    assert_eq!(report.category_distribution.len(), 3);
}

#[test]
fn date_and_category_filters_narrow_the_report() {
    let records = RecordLoader::default().load_path(&fixture()).unwrap();
    let january = FilterCriteria::full(&records)
        .with_date_range(Some(DateRange::new(date(1, 1), date(1, 31)).unwrap()));

    let report = render(&records, &january, ReportOptions::default());
    assert_eq!(report.record_ids().collect::<Vec<_>>(), vec!["NE001", "NE002", "NE003"]);
    assert_eq!(format_currency(report.grand_total), "R$ 1.762.000,50");

    let capital = january.with_categories(["Despesas de Capital"]);
    let report = render(&records, &capital, ReportOptions::default());
    assert_eq!(report.record_ids().collect::<Vec<_>>(), vec!["NE002"]);
}

#[test]
fn empty_category_selection_yields_empty_report() {
    let records = RecordLoader::default().load_path(&fixture()).unwrap();
    let criteria = FilterCriteria::full(&records).with_categories(Vec::<String>::new());
    let report = render(&records, &criteria, ReportOptions::default());

    assert!(report.is_empty());
    assert!(report.time_series.is_empty());
    assert!(report.top_beneficiaries.is_empty());
    assert!(report.category_distribution.is_empty());
    assert_eq!(report.grand_total, Money::zero());
    assert_eq!(format_currency(report.grand_total), "R$ 0,00");
}

#[test]
fn filtering_is_order_preserving_subset() {
    let records = RecordLoader::default().load_path(&fixture()).unwrap();
    let criteria = FilterCriteria::full(&records).with_organs(["Ministério da Defesa"]);
    let selected = filter(&records, &criteria);

    let ids: Vec<&str> = selected.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["NE004", "NE008", "NE012"]);
}

#[test]
fn grand_total_shows_magnitude() {
    let report = full_report();
    assert_eq!(
        format_with_magnitude(report.grand_total),
        "R$ 3.255.735,06 (milhões)"
    );
}

#[test]
fn export_reparses_to_same_ids() {
    let report = full_report();
    let schema = ColumnSchema::default();

    let mut buffer = Vec::new();
    export_id_values(&report.records, &schema, &mut buffer).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Id Empenho", "Valor do Empenho Convertido pra R$"]
    );

    let rows: Vec<(String, String)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string())
        })
        .collect();

    let exported: BTreeSet<&str> = rows.iter().map(|(id, _)| id.as_str()).collect();
    let expected: BTreeSet<&str> = report.record_ids().collect();
    assert_eq!(exported, expected);

    assert!(rows.contains(&("NE002".to_string(), "R$ 250.000,50".to_string())));
    assert!(rows.contains(&("NE006".to_string(), String::new())));
}

#[test]
fn reloading_gives_identical_report() {
    let first = full_report();
    let second = full_report();
    assert_eq!(first, second);
}
