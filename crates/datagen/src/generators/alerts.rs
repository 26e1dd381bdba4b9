//! Alert-manager-style alert generator.
//!
//! Alerts are 30% firing / 70% resolved. Firing alerts carry only a start
//! time, 1-60 minutes before the record timestamp. Resolved alerts carry a
//! start time 5-120 minutes before and a resolved time equal to the record
//! timestamp, so the start always precedes resolution.

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::{synth, weighted};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const ALERT_NAMES: &[&str] = &[
    "HighCPUUsage",
    "HighMemoryUsage",
    "DiskSpaceLow",
    "ServiceDown",
    "HighErrorRate",
    "SlowResponseTime",
    "DatabaseConnectionFailed",
    "SecurityBreach",
    "UnauthorizedAccess",
    "PaymentFailure",
];

const STATE_WEIGHTS: &[(&str, f64)] = &[("firing", 30.0), ("resolved", 70.0)];

pub struct AlertGenerator {
    rng: StdRng,
    window: TimeWindow,
}

impl AlertGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window: TimeWindow::last_year(),
        }
    }
}

impl EntryGenerator for AlertGenerator {
    fn generate_entry(&mut self) -> Record {
        let rng = &mut self.rng;

        let alert_name = weighted::choose(rng, ALERT_NAMES);
        let state = weighted::choose_weighted(rng, STATE_WEIGHTS);
        let timestamp = self.window.sample(rng);

        let mut alert = obj(json!({
            "@timestamp": format_timestamp(timestamp),
            "alert.name": alert_name,
            "alert.state": state,
            "alert.severity": weighted::choose(rng, &["warning", "critical"]),
            "alert.id": synth::uuid_v4(rng).to_string(),
            "labels": {
                "service": weighted::choose(rng, &["frontend", "backend", "database", "cache", "queue"]),
                "environment": weighted::choose(rng, &["production", "staging", "development"]),
                "team": weighted::choose(rng, &["platform", "backend", "frontend", "devops", "security"]),
                "instance": synth::hostname(rng),
            },
            "annotations": {
                "summary": summary(alert_name, state),
                "description": description(alert_name),
                "runbook_url": format!("https://runbooks.company.com/{}", alert_name.to_lowercase()),
            },
        }));

        if state == "firing" {
            let started = timestamp - Duration::minutes(rng.gen_range(1..=60));
            alert.insert("alert.started_at".to_string(), json!(format_timestamp(started)));
        } else {
            let started = timestamp - Duration::minutes(rng.gen_range(5..=120));
            alert.insert("alert.started_at".to_string(), json!(format_timestamp(started)));
            alert.insert(
                "alert.resolved_at".to_string(),
                json!(format_timestamp(timestamp)),
            );
        }

        // Metric value/threshold pairs, matched against the alert name.
        let metric = if alert_name.contains("CPU") {
            Some((rng.gen_range(80..=100), 85))
        } else if alert_name.contains("Memory") {
            Some((rng.gen_range(85..=98), 90))
        } else if alert_name.contains("Disk") {
            Some((rng.gen_range(90..=98), 95))
        } else if alert_name.contains("ErrorRate") {
            Some((rng.gen_range(5..=25), 5))
        } else {
            None
        };
        if let Some((value, threshold)) = metric {
            alert.insert("metric.value".to_string(), json!(value));
            alert.insert("metric.threshold".to_string(), json!(threshold));
        }

        alert
    }
}

fn summary(alert_name: &str, state: &str) -> String {
    let firing = state == "firing";
    match alert_name {
        "HighCPUUsage" => format!(
            "CPU usage is {} threshold",
            if firing { "above" } else { "below" }
        ),
        "HighMemoryUsage" => format!(
            "Memory usage is {} threshold",
            if firing { "above" } else { "below" }
        ),
        "ServiceDown" => format!("Service is {}", if firing { "down" } else { "up" }),
        "HighErrorRate" => format!(
            "Error rate is {} threshold",
            if firing { "above" } else { "below" }
        ),
        other => format!("{other} alert is {state}"),
    }
}

fn description(alert_name: &str) -> String {
    match alert_name {
        "HighCPUUsage" => "CPU usage has exceeded the configured threshold".to_string(),
        "HighMemoryUsage" => "Memory usage has exceeded the configured threshold".to_string(),
        "ServiceDown" => "Service health check is failing".to_string(),
        "HighErrorRate" => "Application error rate has exceeded acceptable levels".to_string(),
        other => format!("Alert for {other}"),
    }
}
