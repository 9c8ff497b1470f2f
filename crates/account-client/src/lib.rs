use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use configuration::ProviderConfig;
use core_types::{AccountIdentity, AccountSnapshot, GainSample};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::ProviderError;
pub use responses::{AccountDescriptor, AccountInformation, DailyGainEntry, MetricsResponse};

/// Bounded timeout applied to every request to the account data service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// An authenticated session with the account data service.
///
/// Carries the resolved account identity so that later fetches do not need to
/// re-read the account descriptor.
#[derive(Debug, Clone)]
pub struct Session {
    pub account_id: String,
    pub identity: AccountIdentity,
}

/// The generic, abstract interface to the account data service.
/// This trait is the contract the ROI engine and the runner use, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait AccountDataProvider: Send + Sync {
    /// Establishes a session. Failure here is fatal for the run.
    async fn authenticate(&self) -> Result<Session, ProviderError>;

    /// Fetches the current equity/balance reading. Required by every
    /// aggregation strategy; failure is fatal for the run.
    async fn fetch_snapshot(&self, session: &Session) -> Result<AccountSnapshot, ProviderError>;

    /// Fetches the per-day gain series for `[start, end]`, sorted by date
    /// with one entry per day. Failure is isolated to the requesting period.
    async fn fetch_daily_gains(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<GainSample>, ProviderError>;

    /// Fetches the provider's own cumulative gain figure, in percent.
    async fn fetch_cumulative_gain(&self, session: &Session) -> Result<Decimal, ProviderError>;
}

/// A concrete implementation of `AccountDataProvider` for a MetaApi-style
/// account data service.
#[derive(Clone)]
pub struct MetaApiClient {
    client: reqwest::Client,
    api_url: String,
    stats_url: String,
    account_id: String,
}

impl MetaApiClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            "auth-token",
            HeaderValue::from_str(&config.token).expect("Invalid API token"),
        );

        Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build reqwest client"),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            stats_url: config.stats_url.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text)
                .map_err(|e| ProviderError::Deserialization(e.to_string()))
        } else {
            Err(error_for(status, text))
        }
    }

    async fn post_empty(&self, url: &str) -> Result<(), ProviderError> {
        let response = self.client.post(url).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await?;
            Err(error_for(status, text))
        }
    }
}

fn error_for(status: StatusCode, body: String) -> ProviderError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ProviderError::Auth(format!("HTTP {}: {}", status.as_u16(), body))
    } else {
        ProviderError::Api(status.as_u16(), body)
    }
}

/// Enforces the `GainSample` shape: ascending dates, one entry per day.
fn normalize_gains(entries: Vec<DailyGainEntry>) -> Vec<GainSample> {
    let mut samples: Vec<GainSample> = entries
        .into_iter()
        .map(|entry| GainSample {
            date: entry.date,
            percent: entry.gains,
        })
        .collect();
    samples.sort_by_key(|sample| sample.date);
    samples.dedup_by_key(|sample| sample.date);
    samples
}

#[async_trait]
impl AccountDataProvider for MetaApiClient {
    async fn authenticate(&self) -> Result<Session, ProviderError> {
        let url = format!("{}/users/current/accounts/{}", self.api_url, self.account_id);
        let descriptor: AccountDescriptor = self.get_json(&url, &[]).await?;

        if !descriptor.is_active() {
            // The account has to be running on the service before it can
            // answer account-information requests.
            tracing::info!(account = %self.account_id, state = %descriptor.state, "Requesting account deploy.");
            let deploy_url = format!(
                "{}/users/current/accounts/{}/deploy",
                self.api_url, self.account_id
            );
            self.post_empty(&deploy_url).await?;
        }

        Ok(Session {
            account_id: self.account_id.clone(),
            identity: AccountIdentity {
                login: descriptor.login,
                server: descriptor.server,
            },
        })
    }

    async fn fetch_snapshot(&self, session: &Session) -> Result<AccountSnapshot, ProviderError> {
        let url = format!(
            "{}/users/current/accounts/{}/account-information",
            self.api_url, session.account_id
        );
        let info: AccountInformation = self.get_json(&url, &[]).await?;

        Ok(AccountSnapshot {
            equity: info.equity,
            balance: info.balance,
            observed_at: Utc::now(),
            identity: session.identity.clone(),
        })
    }

    async fn fetch_daily_gains(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<GainSample>, ProviderError> {
        let url = format!(
            "{}/users/current/accounts/{}/daily-gains",
            self.stats_url, session.account_id
        );
        let query = [
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
        ];
        let entries: Vec<DailyGainEntry> = self.get_json(&url, &query).await?;

        Ok(normalize_gains(entries))
    }

    async fn fetch_cumulative_gain(&self, session: &Session) -> Result<Decimal, ProviderError> {
        let url = format!(
            "{}/users/current/accounts/{}/metrics",
            self.stats_url, session.account_id
        );
        let metrics: MetricsResponse = self.get_json(&url, &[]).await?;

        Ok(metrics.gain)
    }
}
