//! Distributed trace span generator.
//!
//! Each entry builds a transient span tree for one trace: a root span plus
//! 2-8 children, each child's parent chosen uniformly from the spans
//! generated earlier in the same trace. Exactly one span of the tree is
//! emitted, chosen uniformly at random, so output volume equals requested
//! entry count; the rest of the tree exists only to produce a plausible
//! parent reference.

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::{synth, weighted};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const SERVICES: &[&str] = &[
    "frontend",
    "user-service",
    "order-service",
    "payment-service",
    "inventory-service",
    "notification-service",
];

const SPAN_KINDS: &[&str] = &["client", "server", "internal"];

const STATUS_WEIGHTS: &[(&str, f64)] = &[("OK", 85.0), ("ERROR", 10.0), ("TIMEOUT", 5.0)];

pub struct TraceGenerator {
    rng: StdRng,
    window: TimeWindow,
}

impl TraceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window: TimeWindow::last_year(),
        }
    }

    /// Build one full span tree: root + 2..=8 children.
    fn build_trace(&mut self) -> Vec<Record> {
        let trace_id = synth::uuid_v4(&mut self.rng).to_string();

        let root = self.build_span(&trace_id, None, "frontend", "page_load", true);
        let mut spans = vec![root];

        let children = self.rng.gen_range(2..=8);
        for _ in 0..children {
            let parent_index = self.rng.gen_range(0..spans.len());
            let parent_id = spans[parent_index]["span.id"]
                .as_str()
                .expect("spans always carry span.id")
                .to_string();
            // Child spans never run on the frontend.
            let service = weighted::choose(&mut self.rng, &SERVICES[1..]);
            let operation = weighted::choose(&mut self.rng, operations(service));
            let child = self.build_span(&trace_id, Some(&parent_id), service, operation, false);
            spans.push(child);
        }

        spans
    }

    fn build_span(
        &mut self,
        trace_id: &str,
        parent_span_id: Option<&str>,
        service: &str,
        operation: &str,
        is_root: bool,
    ) -> Record {
        let rng = &mut self.rng;

        let start_time = self.window.sample(rng);
        let duration_ms: i64 = if is_root {
            rng.gen_range(100..=5000)
        } else {
            rng.gen_range(1..=1000)
        };
        let end_time = start_time + Duration::milliseconds(duration_ms);

        let span_kind = if is_root {
            "server"
        } else {
            weighted::choose(rng, SPAN_KINDS)
        };

        let mut span = obj(json!({
            "@timestamp": format_timestamp(start_time),
            "trace.id": trace_id,
            "span.id": synth::span_id(rng),
            "span.name": format!("{service}.{operation}"),
            "service.name": service,
            "operation.name": operation,
            "span.kind": span_kind,
            "span.status": weighted::choose_weighted(rng, STATUS_WEIGHTS),
            "duration.ms": duration_ms,
            "span.start_time": format_timestamp(start_time),
            "span.end_time": format_timestamp(end_time),
            "resource.attributes": {
                "service.version": synth::version(rng, 3),
                "deployment.environment": weighted::choose(rng, &["production", "staging", "development"]),
                "host.name": synth::hostname(rng),
            },
        }));

        if let Some(parent_id) = parent_span_id {
            span.insert("span.parent_id".to_string(), json!(parent_id));
        }

        // Operation-specific attributes, matched by substring.
        if operation.contains("payment") {
            span.insert("payment.amount".to_string(), json!(rng.gen_range(10..=1000)));
            span.insert(
                "payment.currency".to_string(),
                json!(weighted::choose(rng, &["USD", "EUR", "GBP"])),
            );
        } else if operation.contains("order") {
            span.insert("order.id".to_string(), json!(synth::uuid_v4(rng).to_string()));
            span.insert("order.total".to_string(), json!(rng.gen_range(50..=500)));
        } else if operation.contains("user") {
            span.insert("user.id".to_string(), json!(synth::uuid_v4(rng).to_string()));
            span.insert("user.email".to_string(), json!(synth::email(rng)));
        }

        span
    }
}

impl EntryGenerator for TraceGenerator {
    fn generate_entry(&mut self) -> Record {
        let mut spans = self.build_trace();
        let index = self.rng.gen_range(0..spans.len());
        spans.swap_remove(index)
    }
}

fn operations(service: &str) -> &'static [&'static str] {
    match service {
        "frontend" => &["page_load", "user_click", "form_submit", "api_call"],
        "user-service" => &["authenticate", "get_profile", "update_profile", "validate_token"],
        "order-service" => &["create_order", "get_order", "update_order", "cancel_order"],
        "payment-service" => &["process_payment", "refund", "validate_card", "charge"],
        "inventory-service" => &[
            "check_stock",
            "reserve_items",
            "update_inventory",
            "release_reservation",
        ],
        "notification-service" => &["send_email", "send_sms", "send_push", "log_notification"],
        _ => &["unknown_operation"],
    }
}
