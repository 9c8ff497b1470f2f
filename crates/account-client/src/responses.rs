use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

// Using `#[serde(rename_all = "camelCase")]` to automatically map from JSON camelCase to Rust snake_case.

/// The account descriptor from `GET /users/current/accounts/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDescriptor {
    pub login: String,
    pub server: String,
    /// Deployment state of the account, e.g. "DEPLOYED" or "UNDEPLOYED".
    #[serde(default)]
    pub state: String,
    // There are more fields, but these are the only ones the tracker needs.
}

impl AccountDescriptor {
    /// Whether the account is already running (or starting) on the service
    /// and can serve account-information requests without a deploy call.
    pub fn is_active(&self) -> bool {
        matches!(self.state.as_str(), "DEPLOYED" | "DEPLOYING")
    }
}

/// The account state from `GET /users/current/accounts/{id}/account-information`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInformation {
    pub balance: Decimal,
    pub equity: Decimal,
}

/// One day's growth from the statistics API's daily-gains endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGainEntry {
    pub date: NaiveDate,
    /// The day's return in percent.
    pub gains: Decimal,
}

/// The slice of the statistics API's metrics document the tracker reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    /// Cumulative gain in percent since the service started tracking the account.
    pub gain: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn only_deployed_and_deploying_accounts_are_active() {
        for (state, active) in [
            ("DEPLOYED", true),
            ("DEPLOYING", true),
            ("UNDEPLOYED", false),
            ("", false),
        ] {
            let descriptor = AccountDescriptor {
                login: "101".to_string(),
                server: "Test-Server".to_string(),
                state: state.to_string(),
            };
            assert_eq!(descriptor.is_active(), active, "state {state:?}");
        }
    }

    #[test]
    fn daily_gain_entries_parse_iso_dates_and_numeric_gains() {
        let raw = r#"{"date": "2026-03-02", "gains": -0.35}"#;
        let entry: DailyGainEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(entry.gains, dec!(-0.35));
    }
}
