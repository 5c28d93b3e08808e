//! Display formatting shared by every table and view.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

const SECONDS_IN_MINUTE: i64 = 60;
const SECONDS_IN_HOUR: i64 = 3_600;
const SECONDS_IN_DAY: i64 = 86_400;

/// Render a golf-style score relative to par.
///
/// `None` is `"-"`, zero is even (`"E"`), positive scores carry an explicit `+`.
pub fn stringify_score(score: Option<i64>) -> String {
    match score {
        None => "-".to_string(),
        Some(0) => "E".to_string(),
        Some(s) if s > 0 => format!("+{s}"),
        Some(s) => s.to_string(),
    }
}

/// Scale a 0..=1 fraction to percent; `None` when it does not fit.
pub fn to_percent(probability: Decimal) -> Option<Decimal> {
    probability.checked_mul(Decimal::ONE_HUNDRED)
}

/// Render a 0..=1 fraction as a percentage rounded to two decimals,
/// half away from zero.
pub fn percentify_probability(probability: Option<Decimal>) -> String {
    match probability.and_then(to_percent) {
        None => "-".to_string(),
        Some(percent) => {
            let rounded = percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}%")
        }
    }
}

/// Relative age of `timestamp` as seen from `now`, e.g. "3 minutes ago".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).num_seconds().max(0);

    let (amount, unit) = if diff < SECONDS_IN_MINUTE {
        (diff, "second")
    } else if diff < SECONDS_IN_HOUR {
        (diff / SECONDS_IN_MINUTE, "minute")
    } else if diff < SECONDS_IN_DAY {
        (diff / SECONDS_IN_HOUR, "hour")
    } else {
        (diff / SECONDS_IN_DAY, "day")
    };

    if amount == 1 {
        format!("{amount} {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Truncate to `max_len` characters, marking the cut with "...".
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn test_stringify_score() {
        assert_eq!(stringify_score(Some(0)), "E");
        assert_eq!(stringify_score(Some(3)), "+3");
        assert_eq!(stringify_score(Some(-2)), "-2");
        assert_eq!(stringify_score(None), "-");
    }

    #[test]
    fn test_percentify_probability() {
        assert_eq!(percentify_probability(Some(dec!(0.1234))), "12.34%");
        assert_eq!(percentify_probability(Some(dec!(1))), "100.00%");
        assert_eq!(percentify_probability(Some(dec!(0))), "0.00%");
        assert_eq!(percentify_probability(Some(dec!(0.5))), "50.00%");
        assert_eq!(percentify_probability(None), "-");
    }

    #[test]
    fn test_percentify_probability_rounds() {
        assert_eq!(percentify_probability(Some(dec!(0.123456))), "12.35%");
        assert_eq!(percentify_probability(Some(dec!(0.999999))), "100.00%");
        assert_eq!(percentify_probability(Some(dec!(0.12344))), "12.34%");
        assert_eq!(percentify_probability(Some(dec!(0.00005))), "0.01%");
    }

    #[test]
    fn test_percentify_probability_overflow() {
        assert_eq!(to_percent(Decimal::MAX), None);
        assert_eq!(percentify_probability(Some(Decimal::MAX)), "-");
    }

    #[test]
    fn test_time_ago_units() {
        let now = Utc.with_ymd_and_hms(2025, 7, 20, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now, now), "0 seconds ago");
        assert_eq!(time_ago(now - Duration::seconds(1), now), "1 second ago");
        assert_eq!(time_ago(now - Duration::seconds(125), now), "2 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(time_ago(now - Duration::days(3), now), "3 days ago");
        // clock skew never produces negative ages
        assert_eq!(time_ago(now + Duration::seconds(30), now), "0 seconds ago");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer name", 10), "a much ...");
    }
}
