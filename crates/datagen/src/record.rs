//! Record representation and timestamp helpers.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

/// One synthesized observability record: a mapping from dot-separated field
/// paths (e.g. `service.name`) to JSON values. Every record carries a
/// mandatory `@timestamp` field.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Format a UTC timestamp as ISO-8601 with a trailing `Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The time range records are drawn from.
///
/// Fixed at generator construction so that all entries of one run share the
/// same one-year window regardless of how long generation takes.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The past 365 days, ending now.
    pub fn last_year() -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(365),
            end,
        }
    }

    /// Draw a timestamp uniformly from the window.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> DateTime<Utc> {
        let span = (self.end - self.start).num_seconds().max(1);
        self.start + Duration::seconds(rng.gen_range(0..span))
    }

    /// Monthly anchor points used for injected anomaly spikes: one per
    /// month, 30 days apart, starting 30 days into the window.
    pub fn monthly_anchors(&self) -> Vec<DateTime<Utc>> {
        (1..=12).map(|i| self.start + Duration::days(30 * i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_format_timestamp_trailing_z() {
        let ts = format_timestamp(Utc::now());
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_sample_within_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let window = TimeWindow::last_year();

        for _ in 0..100 {
            let ts = window.sample(&mut rng);
            assert!(ts >= window.start && ts <= window.end);
        }
    }

    #[test]
    fn test_monthly_anchors() {
        let window = TimeWindow::last_year();
        let anchors = window.monthly_anchors();

        assert_eq!(anchors.len(), 12);
        for anchor in &anchors {
            assert!(*anchor > window.start && *anchor <= window.end);
        }
    }
}
