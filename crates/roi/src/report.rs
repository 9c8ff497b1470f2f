use chrono_tz::Tz;
use core_types::{AccountSnapshot, RoiResult};
use rust_decimal::Decimal;

/// Renders the computed results as the notification body.
///
/// Pure formatting over data that has already been validated upstream: no
/// business logic lives here, and an absent percentage is always printed as
/// an explicit `N/A` rather than a misleading zero.
pub fn compose_report(snapshot: &AccountSnapshot, results: &[RoiResult], tz: Tz) -> String {
    let mut lines = Vec::with_capacity(results.len() + 3);
    lines.push("==== ROI Report ====".to_string());
    lines.push(format!(
        "Account: {} @ {}",
        snapshot.identity.login, snapshot.identity.server
    ));
    lines.push(format!(
        "Equity: ${} | Balance: ${}",
        fmt_money(snapshot.equity),
        fmt_money(snapshot.balance)
    ));

    for result in results {
        let since = result.since.with_timezone(&tz).format("%Y-%m-%d %H:%M%:z");
        let label = format!("{}:", result.period.label());
        match result.simple_percent {
            Some(simple) => lines.push(format!(
                "{:<7}{} [simple {}]  (since {})",
                label,
                fmt_pct(result.percent),
                fmt_pct(Some(simple)),
                since
            )),
            None => lines.push(format!(
                "{:<7}{}  (since {})",
                label,
                fmt_pct(result.percent),
                since
            )),
        }
    }

    lines.join("\n")
}

/// Two decimal places, thousands separated, sign preserved.
fn fmt_money(value: Decimal) -> String {
    let formatted = format!("{:.2}", value.round_dp(2));
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Signed percentage with two decimal places, or the explicit absence marker.
fn fmt_pct(value: Option<Decimal>) -> String {
    match value {
        Some(pct) => {
            let rounded = pct.round_dp(2);
            if rounded.is_sign_negative() {
                format!("{:.2}%", rounded)
            } else {
                format!("+{:.2}%", rounded)
            }
        }
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::{AccountIdentity, PeriodKey};
    use rust_decimal_macros::dec;

    const TZ: Tz = chrono_tz::Asia::Ho_Chi_Minh;

    fn snapshot() -> AccountSnapshot {
        AccountSnapshot {
            equity: dec!(12345.678),
            balance: dec!(12000),
            observed_at: Utc::now(),
            identity: AccountIdentity {
                login: "7001".to_string(),
                server: "Exness-Real".to_string(),
            },
        }
    }

    #[test]
    fn money_is_grouped_and_rounded() {
        assert_eq!(fmt_money(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(fmt_money(dec!(950)), "950.00");
        assert_eq!(fmt_money(dec!(-1050.5)), "-1,050.50");
    }

    #[test]
    fn percentages_carry_an_explicit_sign() {
        assert_eq!(fmt_pct(Some(dec!(5))), "+5.00%");
        assert_eq!(fmt_pct(Some(dec!(-3.456))), "-3.46%");
        assert_eq!(fmt_pct(Some(Decimal::ZERO)), "+0.00%");
        assert_eq!(fmt_pct(None), "N/A");
    }

    #[test]
    fn report_lists_every_period_with_its_anchor() {
        let midnight = TZ
            .with_ymd_and_hms(2026, 3, 4, 0, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let results = vec![
            RoiResult {
                period: PeriodKey::Day,
                percent: Some(dec!(5)),
                simple_percent: None,
                since: midnight,
            },
            RoiResult {
                period: PeriodKey::Week,
                percent: None,
                simple_percent: None,
                since: midnight,
            },
        ];

        let report = compose_report(&snapshot(), &results, TZ);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[1], "Account: 7001 @ Exness-Real");
        assert_eq!(lines[2], "Equity: $12,345.68 | Balance: $12,000.00");
        assert_eq!(lines[3], "Day:   +5.00%  (since 2026-03-04 00:00+07:00)");
        assert_eq!(lines[4], "Week:  N/A  (since 2026-03-04 00:00+07:00)");
    }

    #[test]
    fn the_auxiliary_simple_figure_is_shown_when_present() {
        let midnight = TZ
            .with_ymd_and_hms(2026, 3, 2, 0, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let results = vec![RoiResult {
            period: PeriodKey::Week,
            percent: Some(dec!(2.01)),
            simple_percent: Some(dec!(2)),
            since: midnight,
        }];

        let report = compose_report(&snapshot(), &results, TZ);
        assert!(report.contains("Week:  +2.01% [simple +2.00%]  (since 2026-03-02 00:00+07:00)"));
    }
}
