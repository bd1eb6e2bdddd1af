//! Human-readable money, rate and duration text

use chrono::Duration;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Average days per month used for month/duration conversion
pub const DAYS_PER_MONTH: Decimal = dec!(30.44);

/// `$12,345.67`
pub fn currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Annual percentage rate, e.g. `6.50%`
pub fn percent(rate: Decimal) -> String {
    format!("{:.2}%", rate.round_dp(2))
}

/// Convert a month count to a duration at 30.44 days per month
///
/// `None` when the result does not fit a `Duration`.
pub fn months_to_duration(months: Decimal) -> Option<Duration> {
    months
        .checked_mul(DAYS_PER_MONTH)?
        .checked_mul(dec!(86400))?
        .round()
        .to_i64()
        .and_then(Duration::try_seconds)
}

/// Duration as fractional days
pub fn duration_days(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 86_400.0
}

/// Duration as approximate months, e.g. `3.2 months`
pub fn months(duration: Duration) -> String {
    format!("{:.1} months", duration_days(duration) / 30.44)
}

/// Serde adapter writing a `chrono::Duration` as fractional days
pub mod serde_days {
    use chrono::Duration;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(super::duration_days(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let days = f64::deserialize(deserializer)?;
        let seconds = (days * 86_400.0).round();
        if !seconds.is_finite() || seconds.abs() > Duration::MAX.num_seconds() as f64 {
            return Err(D::Error::custom(format!("{} days is out of range", days)));
        }
        Duration::try_seconds(seconds as i64)
            .ok_or_else(|| D::Error::custom(format!("{} days is out of range", days)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_currency() {
        assert_eq!(currency(dec!(0)), "$0.00");
        assert_eq!(currency(dec!(999.5)), "$999.50");
        assert_eq!(currency(dec!(1234.567)), "$1,234.57");
        assert_eq!(currency(dec!(250000)), "$250,000.00");
        assert_eq!(currency(dec!(-1234567.1)), "-$1,234,567.10");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec!(6.5)), "6.50%");
        assert_eq!(percent(dec!(19.999)), "20.00%");
    }

    #[test]
    fn test_months_to_duration() {
        let d = months_to_duration(dec!(2)).unwrap();
        assert_relative_eq!(duration_days(d), 60.88, epsilon = 1e-6);
        assert_eq!(months_to_duration(Decimal::ZERO), Some(Duration::zero()));
        assert_eq!(months(d), "2.0 months");
    }

    #[test]
    fn test_months_to_duration_out_of_range() {
        assert_eq!(months_to_duration(dec!(10000000000000000000000000)), None);
        assert_eq!(months_to_duration(Decimal::MAX), None);
        // Fits a Decimal but not a Duration
        assert_eq!(months_to_duration(dec!(10000000000)), None);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Days {
        #[serde(with = "serde_days")]
        value: Duration,
    }

    #[test]
    fn test_serde_days_rejects_out_of_range() {
        let ok: Days = serde_json::from_str(r#"{"value": 1.5}"#).unwrap();
        assert_eq!(ok.value, Duration::hours(36));
        assert!(serde_json::from_str::<Days>(r#"{"value": 1e300}"#).is_err());
        assert!(serde_json::from_str::<Days>(r#"{"value": -1e20}"#).is_err());
    }
}
