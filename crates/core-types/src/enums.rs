use serde::{Deserialize, Serialize};

/// One of the four tracked reporting periods.
///
/// The derived `Ord` follows the report order: day, week, month, all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKey {
    Day,
    Week,
    Month,
    All,
}

impl PeriodKey {
    /// Every tracked period, in the order they appear in the report.
    pub const ALL_KEYS: [PeriodKey; 4] =
        [PeriodKey::Day, PeriodKey::Week, PeriodKey::Month, PeriodKey::All];

    /// Whether this period's baseline moves forward when a new period boundary
    /// is crossed. The all-time baseline keeps its first anchor forever.
    pub fn rolls(&self) -> bool {
        !matches!(self, PeriodKey::All)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PeriodKey::Day => "Day",
            PeriodKey::Week => "Week",
            PeriodKey::Month => "Month",
            PeriodKey::All => "All",
        }
    }
}

/// How per-period returns are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationStrategy {
    /// Point-in-time delta of the current equity against the stored baseline.
    Snapshot,
    /// Compounded daily-gain history from the provider's statistics API.
    DailyGain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_keys_are_ordered_for_the_report() {
        assert!(PeriodKey::Day < PeriodKey::Week);
        assert!(PeriodKey::Week < PeriodKey::Month);
        assert!(PeriodKey::Month < PeriodKey::All);
    }

    #[test]
    fn only_the_all_time_baseline_is_pinned() {
        assert!(PeriodKey::Day.rolls());
        assert!(PeriodKey::Week.rolls());
        assert!(PeriodKey::Month.rolls());
        assert!(!PeriodKey::All.rolls());
    }
}
