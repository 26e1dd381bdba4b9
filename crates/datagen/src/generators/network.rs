//! Network flow generator.
//!
//! Source and destination IPs mix internal and external ranges. The
//! destination port is drawn from a common-ports list or a random high
//! port, and flows hitting 80 or 443 additionally carry HTTP-layer fields.

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::{synth, weighted};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const PROTOCOLS: &[&str] = &["tcp", "udp", "icmp"];

const COMMON_PORTS: &[u16] = &[
    80, 443, 22, 21, 25, 53, 110, 143, 993, 995, 3389, 1433, 3306, 5432, 6379,
];

const HTTP_STATUS_WEIGHTS: &[(u16, f64)] =
    &[(200, 70.0), (404, 15.0), (500, 10.0), (403, 5.0)];

pub struct NetworkTrafficGenerator {
    rng: StdRng,
    window: TimeWindow,
}

impl NetworkTrafficGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window: TimeWindow::last_year(),
        }
    }
}

impl EntryGenerator for NetworkTrafficGenerator {
    fn generate_entry(&mut self) -> Record {
        let rng = &mut self.rng;

        let timestamp = self.window.sample(rng);
        let protocol = weighted::choose(rng, PROTOCOLS);

        // Common ports most of the time, with an occasional random high port.
        let destination_port = if rng.gen_bool(1.0 - 1.0 / (COMMON_PORTS.len() as f64 + 1.0)) {
            weighted::choose(rng, COMMON_PORTS)
        } else {
            rng.gen_range(1024..65536) as u16
        };

        let mut flow = obj(json!({
            "@timestamp": format_timestamp(timestamp),
            "flow.id": synth::uuid_v4(rng).to_string(),
            "network.protocol": protocol,
            "source.ip": synth::mixed_ipv4(rng),
            "destination.ip": synth::mixed_ipv4(rng),
            "source.port": rng.gen_range(1024..65536),
            "destination.port": destination_port,
            "network.bytes": rng.gen_range(64..=1_000_000),
            "network.packets": rng.gen_range(1..=1000),
            "flow.duration_ms": rng.gen_range(100..=30_000),
            "network.direction": weighted::choose(rng, &["inbound", "outbound", "internal"]),
            "event.action": weighted::choose(rng, &["allowed", "blocked", "monitored"]),
            "geo.source.country": synth::country_code(rng),
            "geo.destination.country": synth::country_code(rng),
            "network.transport": protocol,
        }));

        // Application-layer detail for HTTP/HTTPS flows.
        if destination_port == 80 || destination_port == 443 {
            flow.insert(
                "http.method".to_string(),
                json!(weighted::choose(rng, &["GET", "POST", "PUT", "DELETE"])),
            );
            flow.insert(
                "http.status_code".to_string(),
                json!(weighted::choose_weighted(rng, HTTP_STATUS_WEIGHTS)),
            );
            flow.insert("user.agent".to_string(), json!(synth::user_agent(rng)));
            flow.insert("url.domain".to_string(), json!(synth::domain_name(rng)));
        }

        flow
    }
}
