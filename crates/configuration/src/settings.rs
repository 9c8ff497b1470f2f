use crate::error::ConfigError;
use chrono_tz::Tz;
use core_types::AggregationStrategy;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Assembled once at startup; no component reads ambient process state after
/// this has been constructed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub telegram: TelegramConfig,
    pub report: ReportConfig,
    pub state: StateConfig,
    /// Default log verbosity. `RUST_LOG` takes precedence when set.
    pub log_level: String,
}

/// Credentials and endpoints for the account data service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API token for the account data service. Mandatory.
    pub token: String,
    /// Identifier of the tracked trading account. Mandatory.
    pub account_id: String,
    /// Base URL of the account API.
    pub api_url: String,
    /// Base URL of the statistics API used for daily-gain history.
    pub stats_url: String,
}

/// Telegram bot credentials. Both fields empty is a supported configuration:
/// the tracker then runs and logs its report without sending it anywhere.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
}

/// Presentation and aggregation options for the ROI report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// IANA timezone identifier the period boundaries are computed in.
    pub timezone: String,
    /// First line of every Telegram message.
    pub header: String,
    pub strategy: AggregationStrategy,
}

/// Location of the persisted baseline state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            telegram: TelegramConfig::default(),
            report: ReportConfig::default(),
            state: StateConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            account_id: String::new(),
            api_url: "https://mt-client-api-v1.agiliumtrade.agiliumtrade.ai".to_string(),
            stats_url: "https://metastats-api-v1.agiliumtrade.agiliumtrade.ai".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Ho_Chi_Minh".to_string(),
            header: "💵 TRADE GOODS".to_string(),
            strategy: AggregationStrategy::Snapshot,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("roi_state.json"),
        }
    }
}

impl Config {
    /// Checks the invariants the rest of the system relies on.
    ///
    /// Missing provider credentials are fatal; missing Telegram credentials
    /// are not (the alerter degrades to a no-op).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.token.is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.token is required (ROI__PROVIDER__TOKEN)".to_string(),
            ));
        }
        if self.provider.account_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.account_id is required (ROI__PROVIDER__ACCOUNT_ID)".to_string(),
            ));
        }
        self.report.timezone()?;
        Ok(())
    }
}

impl ReportConfig {
    /// Parses the configured timezone identifier.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|_| {
            ConfigError::ValidationError(format!("unknown timezone identifier: {}", self.timezone))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        let mut config = Config::default();
        config.provider.token = "token".to_string();
        config.provider.account_id = "account".to_string();
        config
    }

    #[test]
    fn missing_provider_credentials_fail_validation() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let mut config = configured();
        config.provider.account_id.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_telegram_credentials_pass_validation() {
        let config = configured();
        assert!(config.telegram.token.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_timezone_is_indochina() {
        let tz = configured().report.timezone().unwrap();
        assert_eq!(tz, chrono_tz::Asia::Ho_Chi_Minh);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let mut config = configured();
        config.report.timezone = "Mars/Olympus_Mons".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn strategy_parses_from_kebab_case() {
        let report: ReportConfig = serde_json::from_str(r#"{"strategy": "daily-gain"}"#).unwrap();
        assert_eq!(report.strategy, AggregationStrategy::DailyGain);
    }
}
