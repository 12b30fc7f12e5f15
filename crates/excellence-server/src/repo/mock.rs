//! In-memory repositories producing synthetic data.
//!
//! Values are drawn from a generator seeded by the query, so the same
//! request always yields the same rows.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use super::{DataRow, MarketDataQuery, MarketDataRepository, RawDataQuery, RawDataRepository};

/// Most rows a mock download returns
pub const MAX_MOCK_RECORDS: usize = 50;

const CATEGORIES: [&str; 5] = [
    "SAMPLE_CATEGORY_1",
    "SAMPLE_CATEGORY_2",
    "NAV_DATA",
    "BALANCE_SHEET",
    "TRANSACTIONS",
];

const FUNDS: [&str; 5] = [
    "GLOBAL_EQUITY_FUND",
    "FIXED_INCOME_FUND",
    "EMERGING_MARKETS_FUND",
    "TECHNOLOGY_FUND",
    "REAL_ESTATE_FUND",
];

const SECURITIES: [&str; 5] = [
    "AAPL US Equity",
    "MSFT US Equity",
    "GOOGL US Equity",
    "TSLA US Equity",
    "AMZN US Equity",
];

const FIELDS: [&str; 6] = [
    "PX_LAST",
    "PX_OPEN",
    "PX_HIGH",
    "PX_LOW",
    "PX_VOLUME",
    "MARKET_CAP",
];

/// FNV-1a over the request fields. Stable across runs and toolchains.
fn seed_for(fields: &[&str]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for field in fields {
        for b in field.as_bytes().iter().chain(std::iter::once(&0x1f)) {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
    }
    h
}

fn seeded(fields: &[&str]) -> StdRng {
    StdRng::seed_from_u64(seed_for(fields))
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Days from `start` through `end`, capped at [`MAX_MOCK_RECORDS`]
fn days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..MAX_MOCK_RECORDS as u64)
        .map_while(move |i| start.checked_add_days(Days::new(i)))
        .take_while(move |d| *d <= end)
}

#[derive(Debug, Clone, Default)]
pub struct MockRawDataRepository;

impl RawDataRepository for MockRawDataRepository {
    fn categories(&self) -> Vec<String> {
        CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    fn funds(&self, _catalog: &str) -> Vec<String> {
        FUNDS.iter().map(|f| f.to_string()).collect()
    }

    fn raw_data(&self, query: &RawDataQuery) -> Vec<DataRow> {
        let start = query.start_date.to_string();
        let end = query.end_date.to_string();
        let mut rng = seeded(&[
            query.catalog.as_str(),
            query.fund.as_str(),
            start.as_str(),
            end.as_str(),
        ]);
        let mut value = 100.0;

        days(query.start_date, query.end_date)
            .map(|date| {
                value += rng.random_range(-5.0..5.0);
                let mut row = DataRow::new();
                row.insert("date".into(), json!(date.format("%Y-%m-%d").to_string()));
                row.insert("fund".into(), json!(query.fund));
                row.insert("catalog".into(), json!(query.catalog));
                row.insert("value".into(), json!(round2(value)));
                row.insert("nav".into(), json!(round2(value * 1.1)));
                row.insert("shares".into(), json!(rng.random_range(1000..=10000)));
                row.insert("currency".into(), json!("USD"));
                row
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockMarketDataRepository;

impl MarketDataRepository for MockMarketDataRepository {
    fn securities(&self) -> Vec<String> {
        SECURITIES.iter().map(|s| s.to_string()).collect()
    }

    fn fields(&self, _security: &str) -> Vec<String> {
        FIELDS.iter().map(|f| f.to_string()).collect()
    }

    fn market_data(&self, query: &MarketDataQuery) -> Vec<DataRow> {
        let start = query.start_date.to_string();
        let end = query.end_date.to_string();
        let mut rng = seeded(&[
            query.security.as_str(),
            query.field.as_str(),
            start.as_str(),
            end.as_str(),
        ]);
        let base_price = if query.security.contains("AAPL") {
            150.0
        } else {
            rng.random_range(50.0..500.0)
        };

        days(query.start_date, query.end_date)
            .map(|date| {
                let value: Value = match query.field.as_str() {
                    "PX_LAST" => json!(round2(base_price + rng.random_range(-10.0..10.0))),
                    "PX_VOLUME" => json!(rng.random_range(1_000_000u64..=50_000_000)),
                    "MARKET_CAP" => {
                        json!(rng.random_range(100_000_000_000u64..=3_000_000_000_000))
                    }
                    _ => json!(round2(base_price + rng.random_range(-15.0..15.0))),
                };

                let mut row = DataRow::new();
                row.insert("security".into(), json!(query.security));
                row.insert("field".into(), json!(query.field));
                row.insert(
                    "date".into(),
                    json!(date.format("%Y-%m-%dT00:00:00").to_string()),
                );
                row.insert("value".into(), value);
                row
            })
            .collect()
    }
}
