//! SIEM-style security event generator.
//!
//! Events are drawn from six categories. Authentication events apply a 70/30
//! success/failure split; network events flag 20% of connections as
//! malicious and force their severity to "high"; malware detections are
//! always "critical".

use crate::generators::{obj, EntryGenerator};
use crate::record::{format_timestamp, Record, TimeWindow};
use crate::{synth, weighted};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const EVENT_TYPES: &[&str] = &[
    "authentication",
    "authorization",
    "network",
    "malware",
    "data_access",
    "system",
];

const SEVERITY_WEIGHTS: &[(&str, f64)] = &[
    ("low", 40.0),
    ("medium", 35.0),
    ("high", 20.0),
    ("critical", 5.0),
];

const ATTACK_TYPES: &[&str] = &[
    "brute_force",
    "sql_injection",
    "xss",
    "csrf",
    "malware",
    "phishing",
    "ddos",
];

pub struct SecurityEventGenerator {
    rng: StdRng,
    window: TimeWindow,
}

impl SecurityEventGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            window: TimeWindow::last_year(),
        }
    }
}

impl EntryGenerator for SecurityEventGenerator {
    fn generate_entry(&mut self) -> Record {
        let rng = &mut self.rng;

        let event_type = weighted::choose(rng, EVENT_TYPES);
        let timestamp = self.window.sample(rng);

        let mut record = obj(json!({
            "@timestamp": format_timestamp(timestamp),
            "event.type": event_type,
            "event.id": synth::uuid_v4(rng).to_string(),
            "event.severity": weighted::choose_weighted(rng, SEVERITY_WEIGHTS),
            "source.ip": synth::ipv4(rng),
            "destination.ip": synth::ipv4(rng),
            "user.name": synth::username(rng),
            "host.name": synth::hostname(rng),
            "agent.name": "security-agent",
            "agent.version": synth::version(rng, 3),
        }));

        let extra = match event_type {
            "authentication" => auth_event(rng),
            "network" => network_event(rng),
            "malware" => malware_event(rng),
            other => generic_event(other),
        };
        // Sub-generators may override the base severity.
        record.extend(extra);

        record
    }
}

fn auth_event<R: Rng>(rng: &mut R) -> Record {
    let success = rng.gen_bool(0.7);
    obj(json!({
        "event.action": "login_attempt",
        "event.outcome": if success { "success" } else { "failure" },
        "authentication.method": weighted::choose(rng, &["password", "mfa", "sso", "api_key"]),
        "source.port": rng.gen_range(1024..65536),
        "user.agent": synth::user_agent(rng),
        "geo.country": synth::country_code(rng),
        "geo.city": synth::city(rng),
        "message": if success {
            "Successful login attempt for user"
        } else {
            "Failed login attempt for user"
        },
    }))
}

fn network_event<R: Rng>(rng: &mut R) -> Record {
    let is_malicious = rng.gen_bool(0.2);

    let mut event = obj(json!({
        "event.action": "network_connection",
        "network.protocol": weighted::choose(rng, &["tcp", "udp", "icmp"]),
        "source.port": rng.gen_range(1024..65536),
        "destination.port": weighted::choose(rng, &[80u16, 443, 22, 3389, 1433, 3306]),
        "network.bytes": rng.gen_range(100..=1_000_000),
        "event.severity": if is_malicious { "high" } else { "low" },
        "message": if is_malicious {
            "Network connection blocked - malicious"
        } else {
            "Network connection allowed"
        },
    }));

    if is_malicious {
        event.insert(
            "threat.indicator".to_string(),
            json!(weighted::choose(rng, ATTACK_TYPES)),
        );
    }

    event
}

fn malware_event<R: Rng>(rng: &mut R) -> Record {
    let malware_family = weighted::choose(rng, &["Trojan", "Virus", "Worm", "Ransomware"]);
    let mut variant = synth::word(rng);
    if let Some(head) = variant.get_mut(0..1) {
        head.make_ascii_uppercase();
    }

    obj(json!({
        "event.action": "malware_detection",
        "file.name": synth::file_name(rng),
        "file.path": synth::file_path(rng),
        "file.hash.sha256": synth::sha256_hex(rng),
        "malware.name": format!("{malware_family}.{variant}"),
        "event.severity": "critical",
        "event.outcome": weighted::choose(rng, &["quarantined", "deleted", "blocked"]),
        "message": "Malware detected and quarantined",
    }))
}

fn generic_event(event_type: &str) -> Record {
    obj(json!({
        "event.action": format!("{event_type}_event"),
        "message": format!("Security event of type {event_type} detected"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{assert_has, assert_valid_timestamp};

    #[test]
    fn test_mandatory_fields() {
        let mut generator = SecurityEventGenerator::new(42);
        for _ in 0..100 {
            let record = generator.generate_entry();
            assert_valid_timestamp(&record);
            for field in [
                "event.type",
                "event.id",
                "event.severity",
                "event.action",
                "source.ip",
                "destination.ip",
                "user.name",
                "host.name",
                "message",
            ] {
                assert_has(&record, field);
            }
            let event_type = record["event.type"].as_str().unwrap();
            assert!(EVENT_TYPES.contains(&event_type));
        }
    }

    #[test]
    fn test_malicious_network_events_forced_high() {
        let mut generator = SecurityEventGenerator::new(42);
        for _ in 0..1000 {
            let record = generator.generate_entry();
            if record.contains_key("threat.indicator") {
                assert_eq!(record["event.severity"], "high");
                assert_eq!(record["event.type"], "network");
            }
        }
    }

    #[test]
    fn test_malware_events_are_critical() {
        let mut generator = SecurityEventGenerator::new(42);
        for _ in 0..1000 {
            let record = generator.generate_entry();
            if record["event.type"] == "malware" {
                assert_eq!(record["event.severity"], "critical");
                assert_has(&record, "file.hash.sha256");
                assert_has(&record, "malware.name");
            }
        }
    }

    #[test]
    fn test_auth_success_split() {
        let mut generator = SecurityEventGenerator::new(42);
        let mut successes = 0usize;
        let mut auth_events = 0usize;

        for _ in 0..10_000 {
            let record = generator.generate_entry();
            if record["event.type"] == "authentication" {
                auth_events += 1;
                if record["event.outcome"] == "success" {
                    successes += 1;
                }
            }
        }

        assert!(auth_events > 1000);
        let ratio = successes as f64 / auth_events as f64;
        assert!((0.65..=0.75).contains(&ratio), "success ratio {ratio}");
    }
}
