//! Unstructured log generator.
//!
//! Free-form log lines from five backend services. Most timestamps are drawn
//! uniformly from the past year, but a configurable slice of entries lands
//! in one of twelve monthly "spike" windows with the level forced to ERROR,
//! modeling periodic incident bursts.

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::template::{render, FALLBACK_MESSAGE};
use crate::{synth, weighted};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::collections::HashMap;

/// Probability that an entry lands in a monthly error-spike window.
const SPIKE_PROBABILITY: f64 = 0.10;

const LEVEL_WEIGHTS: &[(&str, f64)] = &[
    ("INFO", 0.7),
    ("WARN", 0.1),
    ("ERROR", 0.1),
    ("DEBUG", 0.1),
];

const SOURCES: &[&str] = &[
    "AuthService",
    "PaymentService",
    "DatabaseService",
    "NotificationService",
    "CacheService",
];

pub struct UnstructuredLogGenerator {
    rng: StdRng,
    window: TimeWindow,
    spike_anchors: Vec<DateTime<Utc>>,
}

impl UnstructuredLogGenerator {
    pub fn new(seed: u64) -> Self {
        let window = TimeWindow::last_year();
        let spike_anchors = window.monthly_anchors();
        Self {
            rng: StdRng::seed_from_u64(seed),
            window,
            spike_anchors,
        }
    }
}

impl EntryGenerator for UnstructuredLogGenerator {
    fn generate_entry(&mut self) -> Record {
        let rng = &mut self.rng;

        let (timestamp, level) = if rng.gen_bool(SPIKE_PROBABILITY) {
            // A random point within one hour after a monthly anchor.
            let anchor = weighted::choose(rng, &self.spike_anchors);
            (anchor + Duration::seconds(rng.gen_range(0..3600)), "ERROR")
        } else {
            (
                self.window.sample(rng),
                weighted::choose_weighted(rng, LEVEL_WEIGHTS),
            )
        };

        let source = weighted::choose(rng, SOURCES);
        let template = weighted::choose(rng, templates(source, level));
        let fields = message_fields(rng);
        let message =
            render(template, &fields).unwrap_or_else(|_| FALLBACK_MESSAGE.to_string());

        obj(json!({
            "@timestamp": format_timestamp(timestamp),
            "log.level": level,
            "source": source,
            "message": message,
        }))
    }
}

/// Level- and source-specific message templates.
fn templates(source: &str, level: &str) -> &'static [&'static str] {
    match (source, level) {
        ("AuthService", "INFO") => &[
            "User '{user}' logged in successfully from IP address {ip_address}",
            "Password reset initiated for user '{user}'; verification email sent",
        ],
        ("AuthService", "WARN") => &[
            "Multiple failed login attempts detected for user '{user}'; account locked for 30 minutes",
        ],
        ("AuthService", "ERROR") => &[
            "Critical security vulnerability detected: unauthorized access attempt to admin panel from IP '{ip_address}'",
            "Authentication service failed to validate token for user '{user}'",
        ],
        ("AuthService", "DEBUG") => &[
            "Generated authentication token for session ID '{session_id}' with expiration time of 2 hours",
            "Password hash generated using SHA-256 algorithm for user '{user}'",
            "Session expired for user ID '{user_id}'; prompting re-authentication",
        ],
        ("PaymentService", "INFO") => &[
            "Refund processed for order ID '{order_id}'; amount refunded: ${amount}",
            "Large volume of transactions processed: {transaction_count} transactions in the last hour",
            "Payment completed successfully for transaction ID '{transaction_id}'",
        ],
        ("PaymentService", "WARN") => &[
            "Payment processing delayed due to network latency exceeding {latency}ms threshold",
            "Currency conversion rate not available for '{from_currency}' to '{to_currency}'; using last known rate",
            "Suspicious transaction pattern detected for user '{user}'; flagging for manual review",
        ],
        ("PaymentService", "ERROR") => &[
            "Transaction ID '{transaction_id}' declined due to insufficient funds in the user's account",
            "Payment gateway error: {gateway_response}",
        ],
        ("PaymentService", "DEBUG") => &[
            "Debugging payment flow for transaction ID '{transaction_id}'",
            "Payment gateway response: {gateway_response}",
        ],
        ("DatabaseService", "INFO") => &[
            "Database query executed successfully: {query}",
            "Backup completed successfully; backup file stored at '{backup_location}'",
            "Connection established to database '{database_name}'",
        ],
        ("DatabaseService", "WARN") => &[
            "Disk space usage at {disk_usage}%; consider cleaning up old logs and backups",
            "Slow query detected: {query}",
        ],
        ("DatabaseService", "ERROR") => &[
            "Timeout while executing query: {query}",
            "Data corruption detected in '{table}' table; initiating recovery procedures",
            "Failed to connect to database '{database_name}'",
        ],
        ("DatabaseService", "DEBUG") => &[
            "Executing query plan optimization for query: {query}",
            "Connection pool status: {pool_status}",
            "Database transaction started for session ID '{session_id}'",
        ],
        ("NotificationService", "INFO") => &[
            "Email notification sent to '{email}' regarding {subject}",
            "Push notification sent to device ID '{device_id}' with message '{message_content}'",
            "SMS sent to '{phone_number}' with message '{message_content}'",
        ],
        ("NotificationService", "WARN") => &[
            "Email quota nearing limit; only {emails_remaining} emails remaining for the day",
            "Delayed delivery of notifications due to high server load",
        ],
        ("NotificationService", "ERROR") => &[
            "Failed to send SMS to '{phone_number}' due to {error_reason}",
            "Email delivery failed to '{email}' due to SMTP server timeout",
            "Notification service encountered an unexpected error: {error_reason}",
        ],
        ("NotificationService", "DEBUG") => &[
            "SMTP server response: {smtp_response}",
            "Notification queue size: {queue_size}",
        ],
        ("CacheService", "INFO") => &[
            "Cache updated for key '{cache_key}' after {update_reason}",
            "Cache cleared for user ID '{user_id}'",
        ],
        ("CacheService", "WARN") => &[
            "Cache miss for key '{cache_key}'; fetching data from the database instead",
            "High cache eviction rate detected",
        ],
        ("CacheService", "ERROR") => &[
            "Redis server not responding; attempting to reconnect in {retry_interval} seconds",
            "Cache corruption detected; reinitializing cache",
        ],
        ("CacheService", "DEBUG") => &[
            "Cache eviction policy applied to key '{cache_key}'",
            "Current cache size: {cache_size} items",
            "Cache hit ratio: {cache_hit_ratio}%",
        ],
        _ => &["Generic log message"],
    }
}

/// The data dictionary available to templates. Deliberately does not cover
/// every placeholder a template might name; rendering falls back to a
/// placeholder message when a field is missing.
fn message_fields<R: Rng>(rng: &mut R) -> HashMap<&'static str, String> {
    let mut fields = HashMap::new();
    fields.insert("user", synth::username(rng));
    fields.insert("ip_address", synth::ipv4(rng));
    fields.insert("session_id", synth::uuid_v4(rng).to_string());
    fields.insert("user_id", rng.gen_range(1000..10000).to_string());
    fields.insert("order_id", rng.gen_range(100000..1000000).to_string());
    fields.insert("amount", format!("{:.2}", rng.gen_range(10.0..500.0)));
    fields.insert(
        "transaction_count",
        rng.gen_range(5000..15000).to_string(),
    );
    fields.insert("latency", rng.gen_range(200..1000).to_string());
    fields.insert("from_currency", weighted::choose(rng, &["USD", "EUR", "GBP"]).to_string());
    fields.insert("to_currency", weighted::choose(rng, &["USD", "EUR", "GBP"]).to_string());
    fields.insert(
        "transaction_id",
        rng.gen_range(1000000..10000000).to_string(),
    );
    fields.insert("gateway_response", synth::sentence(rng));
    fields.insert("query", synth::sentence(rng));
    fields.insert("backup_location", synth::file_path(rng));
    fields.insert("disk_usage", rng.gen_range(80..100).to_string());
    fields.insert("table", synth::word(rng));
    fields.insert("pool_status", synth::sentence(rng));
    fields.insert("email", synth::email(rng));
    fields.insert("subject", synth::sentence(rng));
    fields.insert("device_id", synth::uuid_v4(rng).to_string());
    fields.insert("message_content", synth::sentence(rng));
    fields.insert("emails_remaining", rng.gen_range(10..100).to_string());
    fields.insert("phone_number", synth::phone_number(rng));
    fields.insert("error_reason", synth::sentence(rng));
    fields.insert("smtp_response", synth::sentence(rng));
    fields.insert("queue_size", rng.gen_range(0..1000).to_string());
    fields.insert("cache_key", synth::word(rng));
    fields.insert("update_reason", synth::sentence(rng));
    fields.insert("retry_interval", rng.gen_range(1..10).to_string());
    fields.insert("cache_size", rng.gen_range(1000..10000).to_string());
    fields.insert("database_name", synth::word(rng));
    fields.insert(
        "cache_hit_ratio",
        format!("{:.1}", rng.gen_range(50.0..99.9)),
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{assert_has, assert_valid_timestamp};

    #[test]
    fn test_mandatory_fields() {
        let mut generator = UnstructuredLogGenerator::new(42);
        for _ in 0..100 {
            let record = generator.generate_entry();
            assert_valid_timestamp(&record);
            assert_has(&record, "log.level");
            assert_has(&record, "source");
            assert_has(&record, "message");
            assert_eq!(record.len(), 4);
        }
    }

    #[test]
    fn test_level_and_source_from_vocabulary() {
        let mut generator = UnstructuredLogGenerator::new(42);
        for _ in 0..200 {
            let record = generator.generate_entry();
            let level = record["log.level"].as_str().unwrap();
            assert!(["INFO", "WARN", "ERROR", "DEBUG"].contains(&level));
            let source = record["source"].as_str().unwrap();
            assert!(SOURCES.contains(&source));
        }
    }

    #[test]
    fn test_messages_render_without_raw_placeholders() {
        // Every template's fields are either supplied or the entry degrades
        // to the fallback; either way no raw "{name}" survives.
        let mut generator = UnstructuredLogGenerator::new(7);
        for _ in 0..500 {
            let record = generator.generate_entry();
            let message = record["message"].as_str().unwrap();
            assert!(!message.is_empty());
            assert!(
                !message.contains('{') || message == FALLBACK_MESSAGE,
                "unrendered placeholder in: {message}"
            );
        }
    }

    #[test]
    fn test_error_fraction_reflects_spikes() {
        // 10% forced-ERROR spikes on top of a 10% ERROR weight: the ERROR
        // share should be well above the base weight alone.
        let mut generator = UnstructuredLogGenerator::new(42);
        let total = 5000;
        let errors = (0..total)
            .filter(|_| generator.generate_entry()["log.level"] == "ERROR")
            .count();

        let ratio = errors as f64 / total as f64;
        assert!((0.14..=0.25).contains(&ratio), "ERROR ratio {ratio}");
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let mut a = UnstructuredLogGenerator::new(42);
        let mut b = UnstructuredLogGenerator::new(42);
        // Timestamps derive from a wall-clock window, so compare the stable
        // fields only.
        for _ in 0..20 {
            let ra = a.generate_entry();
            let rb = b.generate_entry();
            assert_eq!(ra["log.level"], rb["log.level"]);
            assert_eq!(ra["source"], rb["source"]);
            assert_eq!(ra["message"], rb["message"]);
        }
    }
}
