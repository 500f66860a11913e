#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use quotecache_core::db::{self, DbPool};
use quotecache_core::market_data::Bar;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Creates an empty on-disk database and a pool for it. The `TempDir` must
/// stay alive for the duration of the test.
pub fn setup_pool() -> (TempDir, Arc<DbPool>) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir
        .path()
        .join("prices.db")
        .to_string_lossy()
        .into_owned();

    db::init(&db_path).expect("failed to create database file");
    let pool = db::create_pool(&db_path).expect("failed to create pool");

    (dir, pool)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("invalid test date")
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d)
        .and_hms_opt(h, 0, 0)
        .expect("invalid test datetime")
}

pub fn bar(symbol: &str, day: NaiveDate, close: Decimal, created_at: NaiveDateTime) -> Bar {
    Bar {
        symbol: symbol.to_string(),
        date: day,
        open: close - Decimal::ONE,
        high: close + Decimal::TWO,
        low: close - Decimal::TWO,
        close,
        volume: 1_000_000,
        created_at,
    }
}
