//! APM transaction generator.
//!
//! Transactions succeed 85% of the time. Failures always attach error
//! fields (type, message, three-frame stack trace) and force HTTP status
//! 500 when the transaction type is "request". Request and database-query
//! transactions carry type-specific sub-fields.

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::{synth, weighted};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const TRANSACTION_TYPES: &[&str] = &["request", "task", "background_job", "database_query"];

const SERVICES: &[&str] = &["web-app", "api-service", "worker", "database"];

const SUCCESS_STATUS_WEIGHTS: &[(u16, f64)] = &[(200, 80.0), (201, 15.0), (204, 5.0)];

const ERROR_TYPES: &[&str] = &[
    "DatabaseError",
    "TimeoutError",
    "ValidationError",
    "AuthenticationError",
];

const DB_STATEMENTS: &[&str] = &[
    "SELECT * FROM users WHERE id = $1",
    "UPDATE orders SET status = 'completed' WHERE id = $1",
    "INSERT INTO products (name, price) VALUES ($1, $2)",
    "DELETE FROM sessions WHERE expires_at < NOW()",
];

pub struct ApmGenerator {
    rng: StdRng,
    window: TimeWindow,
}

impl ApmGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window: TimeWindow::last_year(),
        }
    }
}

impl EntryGenerator for ApmGenerator {
    fn generate_entry(&mut self) -> Record {
        let rng = &mut self.rng;

        let transaction_type = weighted::choose(rng, TRANSACTION_TYPES);
        let service = weighted::choose(rng, SERVICES);
        let timestamp = self.window.sample(rng);
        let success = rng.gen_bool(0.85);

        let mut record = obj(json!({
            "@timestamp": format_timestamp(timestamp),
            "transaction.id": synth::uuid_v4(rng).to_string(),
            "transaction.type": transaction_type,
            "transaction.name": transaction_name(rng, transaction_type),
            "service.name": service,
            "service.version": synth::version(rng, 3),
            "transaction.duration.ms": rng.gen_range(10..=5000),
            "transaction.result": if success { "success" } else { "error" },
            "user.id": synth::uuid_v4(rng).to_string(),
            "trace.id": synth::uuid_v4(rng).to_string(),
            "span.id": synth::span_id(rng),
            "host.name": synth::hostname(rng),
            "container.id": synth::hex_string(rng, 12),
            "kubernetes.pod.name": format!("{service}-{}", synth::hex_string(rng, 8)),
            "kubernetes.namespace": weighted::choose(rng, &["production", "staging", "development"]),
        }));

        match transaction_type {
            "request" => {
                record.insert(
                    "http.method".to_string(),
                    json!(weighted::choose(rng, &["GET", "POST", "PUT", "DELETE"])),
                );
                let status = if success {
                    weighted::choose_weighted(rng, SUCCESS_STATUS_WEIGHTS)
                } else {
                    500
                };
                record.insert("http.status_code".to_string(), json!(status));
                record.insert(
                    "http.url".to_string(),
                    json!(format!("https://api.company.com/{}", synth::uri_path(rng))),
                );
                record.insert("user.agent".to_string(), json!(synth::user_agent(rng)));
            }
            "database_query" => {
                record.insert(
                    "db.type".to_string(),
                    json!(weighted::choose(rng, &["postgresql", "mysql", "mongodb", "redis"])),
                );
                record.insert(
                    "db.statement".to_string(),
                    json!(weighted::choose(rng, DB_STATEMENTS)),
                );
                record.insert(
                    "db.rows_affected".to_string(),
                    json!(if success { rng.gen_range(0..=1000) } else { 0 }),
                );
            }
            _ => {}
        }

        if !success {
            record.insert(
                "error.type".to_string(),
                json!(weighted::choose(rng, ERROR_TYPES)),
            );
            record.insert("error.message".to_string(), json!(synth::sentence(rng)));
            record.insert("error.stack_trace".to_string(), json!(stack_trace(rng)));
        }

        record
    }
}

fn transaction_name<R: Rng>(rng: &mut R, transaction_type: &str) -> String {
    match transaction_type {
        "request" => format!(
            "{} /api/{}",
            weighted::choose(rng, &["GET", "POST", "PUT", "DELETE"]),
            weighted::choose(rng, &["users", "orders", "products", "payments"]),
        ),
        "task" => weighted::choose(
            rng,
            &[
                "send_email",
                "process_payment",
                "generate_report",
                "cleanup_temp_files",
            ],
        )
        .to_string(),
        "background_job" => weighted::choose(
            rng,
            &["data_sync", "cache_refresh", "log_rotation", "backup_database"],
        )
        .to_string(),
        _ => weighted::choose(
            rng,
            &["SELECT users", "UPDATE orders", "INSERT products", "DELETE sessions"],
        )
        .to_string(),
    }
}

/// Three synthesized stack frames.
fn stack_trace<R: Rng>(rng: &mut R) -> String {
    let frames: Vec<String> = (0..3)
        .map(|_| {
            format!(
                "  at {}.{}({}:{})",
                synth::word(rng),
                synth::word(rng),
                synth::file_name(rng),
                rng.gen_range(1..=100)
            )
        })
        .collect();
    frames.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{assert_has, assert_valid_timestamp};

    #[test]
    fn test_mandatory_fields() {
        let mut generator = ApmGenerator::new(42);
        for _ in 0..100 {
            let record = generator.generate_entry();
            assert_valid_timestamp(&record);
            for field in [
                "transaction.id",
                "transaction.type",
                "transaction.name",
                "transaction.duration.ms",
                "transaction.result",
                "service.name",
                "trace.id",
                "span.id",
                "host.name",
            ] {
                assert_has(&record, field);
            }
            let transaction_type = record["transaction.type"].as_str().unwrap();
            assert!(TRANSACTION_TYPES.contains(&transaction_type));
        }
    }

    #[test]
    fn test_error_fields_on_failure_only() {
        let mut generator = ApmGenerator::new(42);
        for _ in 0..1000 {
            let record = generator.generate_entry();
            let failed = record["transaction.result"] == "error";
            assert_eq!(record.contains_key("error.type"), failed);
            assert_eq!(record.contains_key("error.message"), failed);
            assert_eq!(record.contains_key("error.stack_trace"), failed);
            if failed {
                let trace = record["error.stack_trace"].as_str().unwrap();
                assert_eq!(trace.lines().count(), 3);
            }
        }
    }

    #[test]
    fn test_failed_requests_force_500() {
        let mut generator = ApmGenerator::new(42);
        let mut seen_failed_request = false;

        for _ in 0..2000 {
            let record = generator.generate_entry();
            if record["transaction.type"] == "request" {
                let status = record["http.status_code"].as_u64().unwrap();
                if record["transaction.result"] == "error" {
                    assert_eq!(status, 500);
                    seen_failed_request = true;
                } else {
                    assert!([200, 201, 204].contains(&status));
                }
            }
        }

        assert!(seen_failed_request);
    }

    #[test]
    fn test_db_query_fields() {
        let mut generator = ApmGenerator::new(42);
        for _ in 0..1000 {
            let record = generator.generate_entry();
            let is_db = record["transaction.type"] == "database_query";
            assert_eq!(record.contains_key("db.statement"), is_db);
            if is_db && record["transaction.result"] == "error" {
                assert_eq!(record["db.rows_affected"], 0);
            }
        }
    }

    #[test]
    fn test_success_ratio() {
        let mut generator = ApmGenerator::new(42);
        let trials = 10_000;
        let successes = (0..trials)
            .filter(|_| generator.generate_entry()["transaction.result"] == "success")
            .count();

        let ratio = successes as f64 / trials as f64;
        assert!((0.83..=0.87).contains(&ratio), "success ratio {ratio}");
    }
}
