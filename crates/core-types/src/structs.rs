use crate::enums::PeriodKey;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of the trading account a snapshot was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub login: String,
    pub server: String,
}

/// A point-in-time reading of the account's value.
///
/// Produced fresh by the account data provider on every run and never mutated
/// afterwards. `equity` is the mark-to-market value including open positions;
/// `balance` excludes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub equity: Decimal,
    pub balance: Decimal,
    pub observed_at: DateTime<Utc>,
    pub identity: AccountIdentity,
}

/// The stored reference point a period's ROI is measured against.
///
/// The period key is the key of the persisted map, not a field here. The
/// equity/balance values were always actually observed, never interpolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    #[serde(rename = "ts")]
    pub anchored_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub equity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// A single day's percentage return reported by the statistics API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainSample {
    pub date: NaiveDate,
    pub percent: Decimal,
}

/// Computed return for one tracked period.
///
/// `percent` is `None` when the reference baseline was invalid or the data
/// fetch for the period failed. `simple_percent` is the auxiliary arithmetic
/// sum, populated only by the compounding strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiResult {
    pub period: PeriodKey,
    pub percent: Option<Decimal>,
    pub simple_percent: Option<Decimal>,
    pub since: DateTime<Utc>,
}
