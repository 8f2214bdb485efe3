//! Timestamps printed in email bodies.
//!
//! The format mirrors an en-US locale date-time followed by the
//! milliseconds: `"10/18/2026, 3:04:05 PM:042"`.

use crate::config::LoggingConfig;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Timezone and clock style for email timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormat {
    timezone: Tz,
    hour12: bool,
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            hour12: true,
        }
    }
}

impl TimestampFormat {
    pub fn new(timezone: Tz, hour12: bool) -> Self {
        Self { timezone, hour12 }
    }

    /// Build from the logging section, falling back to UTC on an unknown
    /// timezone (config validation reports it separately).
    pub fn from_config(config: &LoggingConfig) -> Self {
        let timezone: Tz = config.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %config.timezone, "Invalid timezone, falling back to UTC");
            chrono_tz::UTC
        });
        Self::new(timezone, config.hour12)
    }

    /// Format an instant.
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        let local = instant.with_timezone(&self.timezone);
        let pattern = if self.hour12 {
            "%-m/%-d/%Y, %-I:%M:%S %p"
        } else {
            "%-m/%-d/%Y, %H:%M:%S"
        };
        // Leap seconds report up to 1999 ms.
        let millis = instant.timestamp_subsec_millis() % 1000;
        format!("{}:{:03}", local.format(pattern), millis)
    }

    /// Format the current time. Both parts come from one clock read.
    pub fn now(&self) -> String {
        self.format(Utc::now())
    }
}

/// Current time in the default format (UTC, 12-hour clock).
pub fn current_date_time() -> String {
    TimestampFormat::default().now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    /// 2026-01-15T10:49:35.007Z
    const JAN_15_2026: i64 = 1_768_474_175_007;

    #[test]
    fn format_utc_12_hour() {
        let fmt = TimestampFormat::default();
        assert_eq!(fmt.format(instant(JAN_15_2026)), "1/15/2026, 10:49:35 AM:007");
    }

    #[test]
    fn format_24_hour_in_other_timezone() {
        let fmt = TimestampFormat::new(chrono_tz::Asia::Shanghai, false);
        assert_eq!(fmt.format(instant(JAN_15_2026)), "1/15/2026, 18:49:35:007");
    }

    #[test]
    fn format_12_hour_pm_has_no_leading_zero() {
        let fmt = TimestampFormat::new(chrono_tz::Asia::Shanghai, true);
        assert_eq!(fmt.format(instant(JAN_15_2026)), "1/15/2026, 6:49:35 PM:007");
    }

    #[test]
    fn millis_are_always_three_digits() {
        let fmt = TimestampFormat::default();
        for (offset, expected) in [(0, ":000"), (5, ":005"), (42, ":042"), (999, ":999")] {
            let base = JAN_15_2026 - 7;
            let out = fmt.format(instant(base + offset));
            assert!(out.ends_with(expected), "{} should end with {}", out, expected);
        }
    }

    #[test]
    fn current_date_time_has_expected_shape() {
        let out = current_date_time();
        let (locale, millis) = out.rsplit_once(':').unwrap();

        assert_eq!(millis.len(), 3, "millis part of {}", out);
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert!(locale.contains(", "));
        assert!(locale.ends_with("AM") || locale.ends_with("PM"));
        assert_eq!(locale.matches('/').count(), 2);
    }

    #[test]
    fn from_config_falls_back_to_utc() {
        let config = LoggingConfig {
            timezone: "Nowhere/Special".to_string(),
            ..Default::default()
        };
        assert_eq!(TimestampFormat::from_config(&config), TimestampFormat::default());
    }

    #[test]
    fn from_config_reads_timezone_and_clock() {
        let config = LoggingConfig {
            timezone: "Europe/Paris".to_string(),
            hour12: false,
            ..Default::default()
        };
        assert_eq!(
            TimestampFormat::from_config(&config),
            TimestampFormat::new(chrono_tz::Europe::Paris, false)
        );
    }
}
