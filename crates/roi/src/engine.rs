use crate::window::PeriodWindows;
use account_client::{AccountDataProvider, Session};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use core_types::{AccountSnapshot, GainSample, PeriodKey, RoiResult};
use rust_decimal::Decimal;
use state_store::BaselineStore;

/// Percentage change of `current` against a fixed reference.
///
/// `None` for a non-positive reference: a zero or negative baseline can never
/// yield a meaningful percentage, and reporting 0% would be misleading.
pub fn roi_pct(current: Decimal, base: Decimal) -> Option<Decimal> {
    if base <= Decimal::ZERO {
        return None;
    }
    Some((current - base) / base * Decimal::ONE_HUNDRED)
}

/// Arithmetic sum of daily returns. Ignores compounding; auxiliary figure only.
pub fn simple_sum(samples: &[GainSample]) -> Decimal {
    samples.iter().map(|sample| sample.percent).sum()
}

/// Compounded daily returns: grows a unit stake through every daily factor,
/// reflecting re-investment of each day's gain.
pub fn compound_sum(samples: &[GainSample]) -> Decimal {
    let growth = samples.iter().fold(Decimal::ONE, |acc, sample| {
        acc * (Decimal::ONE + sample.percent / Decimal::ONE_HUNDRED)
    });
    (growth - Decimal::ONE) * Decimal::ONE_HUNDRED
}

/// Computes per-period returns against the baselines kept by the store.
///
/// Stateless apart from the reporting timezone; each call derives everything
/// from the instant and data it is handed.
#[derive(Debug, Clone, Copy)]
pub struct RoiEngine {
    tz: Tz,
}

impl RoiEngine {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Ensures every period has a baseline for `now`, rolling any whose
    /// boundary has been crossed since the last run. Called in every run,
    /// under both strategies, so the store stays the system's memory of the
    /// first run.
    pub fn roll_baselines(
        &self,
        now: DateTime<Utc>,
        snapshot: &AccountSnapshot,
        store: &mut BaselineStore,
    ) {
        let windows = PeriodWindows::compute(now, self.tz);
        for key in PeriodKey::ALL_KEYS {
            store.ensure_baseline(key, windows.start(key), snapshot);
        }
    }

    /// Point-in-time aggregation: the current equity measured against each
    /// period's stored baseline equity.
    pub fn snapshot_delta(
        &self,
        snapshot: &AccountSnapshot,
        store: &BaselineStore,
    ) -> Vec<RoiResult> {
        PeriodKey::ALL_KEYS
            .iter()
            .map(|&key| match store.get(key) {
                Some(baseline) => RoiResult {
                    period: key,
                    percent: roi_pct(snapshot.equity, baseline.equity),
                    simple_percent: None,
                    since: baseline.anchored_at,
                },
                None => RoiResult {
                    period: key,
                    percent: None,
                    simple_percent: None,
                    since: snapshot.observed_at,
                },
            })
            .collect()
    }

    /// Compounding aggregation: each period's figure is compounded from the
    /// provider's daily-gain history over the period's date range; the
    /// all-time figure is the provider's own cumulative field, passed through
    /// untouched.
    ///
    /// A failed fetch surfaces as `None` for that period alone; the other
    /// periods always come back.
    pub async fn compounded_daily_gain<P>(
        &self,
        now: DateTime<Utc>,
        provider: &P,
        session: &Session,
        store: &BaselineStore,
    ) -> Vec<RoiResult>
    where
        P: AccountDataProvider + ?Sized,
    {
        let windows = PeriodWindows::compute(now, self.tz);
        let today = now.with_timezone(&self.tz).date_naive();
        let mut results = Vec::with_capacity(PeriodKey::ALL_KEYS.len());

        for key in [PeriodKey::Day, PeriodKey::Week, PeriodKey::Month] {
            let start = windows.start(key);
            let range_start = start.with_timezone(&self.tz).date_naive();

            let (percent, simple_percent) = match provider
                .fetch_daily_gains(session, range_start, today)
                .await
            {
                Ok(samples) => (Some(compound_sum(&samples)), Some(simple_sum(&samples))),
                Err(e) => {
                    tracing::warn!(period = ?key, error = %e, "Daily gain fetch failed; reporting the period as unavailable.");
                    (None, None)
                }
            };

            results.push(RoiResult {
                period: key,
                percent,
                simple_percent,
                since: start,
            });
        }

        let since_all = store
            .get(PeriodKey::All)
            .map(|record| record.anchored_at)
            .unwrap_or_else(|| windows.start(PeriodKey::All));
        let percent_all = match provider.fetch_cumulative_gain(session).await {
            Ok(gain) => Some(gain),
            Err(e) => {
                tracing::warn!(error = %e, "Cumulative gain fetch failed; reporting all-time as unavailable.");
                None
            }
        };
        results.push(RoiResult {
            period: PeriodKey::All,
            percent: percent_all,
            simple_percent: None,
            since: since_all,
        });

        results
    }
}
