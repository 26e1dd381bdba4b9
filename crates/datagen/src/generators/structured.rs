//! Structured (JSON) log generator.
//!
//! Consistent field set with correlation identifiers (trace/span/request/
//! user ids), a weighted HTTP status distribution skewed toward 200, and a
//! response-time integer.

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::{synth, weighted};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const SERVICES: &[&str] = &[
    "user-api",
    "order-service",
    "inventory-service",
    "notification-service",
    "analytics-service",
];

const ENVIRONMENTS: &[&str] = &["production", "staging", "development"];

const LEVEL_WEIGHTS: &[(&str, f64)] = &[
    ("INFO", 0.6),
    ("WARN", 0.2),
    ("ERROR", 0.1),
    ("DEBUG", 0.1),
];

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH"];

/// 200-heavy with a long 4xx/5xx tail.
const STATUS_WEIGHTS: &[(u16, f64)] = &[
    (200, 40.0),
    (201, 10.0),
    (400, 8.0),
    (401, 5.0),
    (403, 3.0),
    (404, 8.0),
    (500, 10.0),
    (502, 5.0),
    (503, 5.0),
];

pub struct StructuredLogGenerator {
    rng: StdRng,
    window: TimeWindow,
}

impl StructuredLogGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window: TimeWindow::last_year(),
        }
    }
}

impl EntryGenerator for StructuredLogGenerator {
    fn generate_entry(&mut self) -> Record {
        let rng = &mut self.rng;

        let service = weighted::choose(rng, SERVICES);
        let level = weighted::choose_weighted(rng, LEVEL_WEIGHTS);
        let timestamp = self.window.sample(rng);

        obj(json!({
            "@timestamp": format_timestamp(timestamp),
            "service.name": service,
            "service.version": synth::version(rng, 5),
            "log.level": level,
            "environment": weighted::choose(rng, ENVIRONMENTS),
            "host.name": synth::hostname(rng),
            "process.pid": rng.gen_range(1000..100000),
            "trace.id": synth::uuid_v4(rng).to_string(),
            "span.id": synth::span_id(rng),
            "user.id": synth::uuid_v4(rng).to_string(),
            "request.id": synth::uuid_v4(rng).to_string(),
            "http.method": weighted::choose(rng, HTTP_METHODS),
            "http.status_code": weighted::choose_weighted(rng, STATUS_WEIGHTS),
            "http.response_time_ms": rng.gen_range(10..2000),
            "message": message(rng, service, level),
        }))
    }
}

fn message<R: Rng>(rng: &mut R, service: &str, level: &str) -> String {
    let candidates: &[&str] = match (service, level) {
        ("user-api", "INFO") => &[
            "User profile updated successfully",
            "User authentication completed",
            "Password reset email sent",
        ],
        ("user-api", "WARN") => &[
            "Rate limit approaching for user",
            "Deprecated API endpoint used",
        ],
        ("user-api", "ERROR") => &[
            "User authentication failed",
            "Database connection timeout",
            "Invalid user credentials",
        ],
        ("user-api", "DEBUG") => &[
            "JWT token validated",
            "Database query executed",
            "Cache miss for user profile",
        ],
        ("order-service", "INFO") => &[
            "Order created successfully",
            "Payment processed",
            "Order shipped",
        ],
        ("order-service", "WARN") => &[
            "Inventory low for product",
            "Payment gateway slow response",
        ],
        ("order-service", "ERROR") => &[
            "Payment failed",
            "Order processing error",
            "Inventory service unavailable",
        ],
        ("order-service", "DEBUG") => &[
            "Order validation completed",
            "Inventory check performed",
            "Payment gateway called",
        ],
        (_, "INFO") => &["Generic info message"],
        (_, "WARN") => &["Generic warning"],
        (_, "ERROR") => &["Generic error"],
        _ => &["Generic debug message"],
    };
    weighted::choose(rng, candidates).to_string()
}
