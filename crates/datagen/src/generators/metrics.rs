//! Metric sample generator.
//!
//! Picks one of counter, gauge, histogram, or summary. Counter and gauge
//! names come from a service-specific vocabulary and the numeric range is
//! scaled by the unit hint in the name (percent, bytes, seconds). Histogram
//! and summary samples emit fixed bucket/quantile maps with monotonically
//! plausible ranges.

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::{synth, weighted};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const METRIC_TYPES: &[&str] = &["counter", "gauge", "histogram", "summary"];

const SERVICES: &[&str] = &[
    "frontend",
    "api-gateway",
    "user-service",
    "order-service",
    "database",
];

pub struct MetricGenerator {
    rng: StdRng,
    window: TimeWindow,
}

impl MetricGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window: TimeWindow::last_year(),
        }
    }
}

impl EntryGenerator for MetricGenerator {
    fn generate_entry(&mut self) -> Record {
        let rng = &mut self.rng;

        let service = weighted::choose(rng, SERVICES);
        let metric_type = weighted::choose(rng, METRIC_TYPES);
        let timestamp = self.window.sample(rng);

        let mut record = obj(json!({
            "@timestamp": format_timestamp(timestamp),
            "metric.type": metric_type,
            "service.name": service,
            "host.name": synth::hostname(rng),
            "environment": weighted::choose(rng, &["production", "staging", "development"]),
        }));

        let extra = match metric_type {
            "counter" => counter_sample(rng, service),
            "gauge" => gauge_sample(rng, service),
            "histogram" => histogram_sample(rng),
            _ => summary_sample(rng),
        };
        record.extend(extra);

        record
    }
}

fn counter_names(service: &str) -> &'static [&'static str] {
    match service {
        "frontend" => &[
            "page_views_total",
            "button_clicks_total",
            "form_submissions_total",
        ],
        "api-gateway" => &["requests_total", "errors_total", "rate_limit_hits_total"],
        "user-service" => &["logins_total", "registrations_total", "password_resets_total"],
        "order-service" => &[
            "orders_created_total",
            "orders_completed_total",
            "orders_cancelled_total",
        ],
        _ => &["queries_total", "connections_total", "deadlocks_total"],
    }
}

fn gauge_names(service: &str) -> &'static [&'static str] {
    match service {
        "frontend" => &["active_users", "page_load_time_seconds"],
        "api-gateway" => &["active_connections", "queue_size"],
        "user-service" => &["active_sessions", "cache_hit_ratio"],
        "order-service" => &["pending_orders", "processing_time_seconds"],
        _ => &["active_connections", "cpu_usage_percent", "memory_usage_bytes"],
    }
}

fn counter_sample<R: Rng>(rng: &mut R, service: &str) -> Record {
    let name = weighted::choose(rng, counter_names(service));

    let mut labels = Record::new();
    if name.contains("requests") {
        labels.insert(
            "method".to_string(),
            json!(weighted::choose(rng, &["GET", "POST", "PUT", "DELETE"])),
        );
    }
    labels.insert(
        "status".to_string(),
        json!(weighted::choose(rng, &["success", "error"])),
    );

    obj(json!({
        "metric.name": name,
        "metric.value": rng.gen_range(1..=1000),
        "labels": labels,
    }))
}

/// Gauge values scale with the unit hint embedded in the metric name.
fn gauge_sample<R: Rng>(rng: &mut R, service: &str) -> Record {
    let name = weighted::choose(rng, gauge_names(service));

    let value = if name.contains("percent") {
        json!(rng.gen_range(0..=100))
    } else if name.contains("bytes") {
        // 1MB to 8GB
        json!(rng.gen_range(1_000_000i64..=8_000_000_000))
    } else if name.contains("seconds") {
        json!((rng.gen_range(0.1..10.0f64) * 1000.0).round() / 1000.0)
    } else if name.contains("ratio") {
        json!((rng.gen_range(0.0..1.0f64) * 1000.0).round() / 1000.0)
    } else {
        json!(rng.gen_range(0..=1000))
    };

    obj(json!({
        "metric.name": name,
        "metric.value": value,
    }))
}

fn histogram_sample<R: Rng>(rng: &mut R) -> Record {
    obj(json!({
        "metric.name": "response_time_histogram",
        "metric.buckets": {
            "0.1": rng.gen_range(0..=100),
            "0.5": rng.gen_range(100..=500),
            "1.0": rng.gen_range(500..=800),
            "5.0": rng.gen_range(800..=950),
            "10.0": rng.gen_range(950..=1000),
        },
        "metric.count": rng.gen_range(1000..=10000),
        "metric.sum": rng.gen_range(5000..=50000),
    }))
}

fn summary_sample<R: Rng>(rng: &mut R) -> Record {
    obj(json!({
        "metric.name": "request_duration_summary",
        "metric.quantiles": {
            "0.5": (rng.gen_range(0.1..2.0f64) * 1000.0).round() / 1000.0,
            "0.9": (rng.gen_range(2.0..5.0f64) * 1000.0).round() / 1000.0,
            "0.95": (rng.gen_range(5.0..8.0f64) * 1000.0).round() / 1000.0,
            "0.99": (rng.gen_range(8.0..15.0f64) * 1000.0).round() / 1000.0,
        },
        "metric.count": rng.gen_range(1000..=10000),
        "metric.sum": rng.gen_range(5000..=50000),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{assert_has, assert_valid_timestamp};

    #[test]
    fn test_metric_type_vocabulary() {
        let mut generator = MetricGenerator::new(42);
        for _ in 0..200 {
            let record = generator.generate_entry();
            assert_valid_timestamp(&record);
            let metric_type = record["metric.type"].as_str().unwrap();
            assert!(METRIC_TYPES.contains(&metric_type));
            assert_has(&record, "metric.name");
            assert_has(&record, "service.name");
        }
    }

    #[test]
    fn test_buckets_imply_histogram() {
        let mut generator = MetricGenerator::new(42);
        for _ in 0..500 {
            let record = generator.generate_entry();
            if record.contains_key("metric.buckets") {
                assert_eq!(record["metric.type"], "histogram");
            }
            if record.contains_key("metric.quantiles") {
                assert_eq!(record["metric.type"], "summary");
            }
        }
    }

    #[test]
    fn test_percent_gauges_bounded() {
        let mut generator = MetricGenerator::new(42);
        for _ in 0..500 {
            let record = generator.generate_entry();
            if record["metric.type"] == "gauge" {
                let name = record["metric.name"].as_str().unwrap();
                if name.contains("percent") {
                    let value = record["metric.value"].as_i64().unwrap();
                    assert!((0..=100).contains(&value));
                }
            }
        }
    }

    #[test]
    fn test_byte_gauges_in_range() {
        let mut generator = MetricGenerator::new(7);
        for _ in 0..500 {
            let record = generator.generate_entry();
            if record["metric.type"] == "gauge" {
                let name = record["metric.name"].as_str().unwrap();
                if name.contains("bytes") {
                    let value = record["metric.value"].as_i64().unwrap();
                    assert!((1_000_000..=8_000_000_000).contains(&value));
                }
            }
        }
    }
}
