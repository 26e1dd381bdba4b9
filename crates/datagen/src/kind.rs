//! The closed set of data kinds and their registry metadata.
//!
//! Dispatch is by enum rather than string key, so an invalid kind is
//! rejected at the CLI or API boundary instead of surfacing at call time.

use crate::generators::{
    AlertGenerator, ApmGenerator, EntryGenerator, MetricGenerator, NetworkTrafficGenerator,
    SecurityEventGenerator, StructuredLogGenerator, TraceGenerator, UnstructuredLogGenerator,
};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// The data-kind identifier was not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown data kind '{0}'")]
pub struct UnknownKind(pub String);

/// One category of synthesized observability record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[value(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    UnstructuredLogs,
    StructuredLogs,
    DistributedTraces,
    Metrics,
    SecurityEvents,
    Alerts,
    NetworkTraffic,
    ApmData,
}

impl DataKind {
    /// Every kind, in registry order.
    pub const ALL: [DataKind; 8] = [
        DataKind::UnstructuredLogs,
        DataKind::StructuredLogs,
        DataKind::DistributedTraces,
        DataKind::Metrics,
        DataKind::SecurityEvents,
        DataKind::Alerts,
        DataKind::NetworkTraffic,
        DataKind::ApmData,
    ];

    /// Stable snake_case identifier, used in file names and the API.
    pub fn id(&self) -> &'static str {
        match self {
            DataKind::UnstructuredLogs => "unstructured_logs",
            DataKind::StructuredLogs => "structured_logs",
            DataKind::DistributedTraces => "distributed_traces",
            DataKind::Metrics => "metrics",
            DataKind::SecurityEvents => "security_events",
            DataKind::Alerts => "alerts",
            DataKind::NetworkTraffic => "network_traffic",
            DataKind::ApmData => "apm_data",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            DataKind::UnstructuredLogs => "Unstructured Logs",
            DataKind::StructuredLogs => "Structured Logs",
            DataKind::DistributedTraces => "Distributed Traces",
            DataKind::Metrics => "Metrics & Time Series",
            DataKind::SecurityEvents => "Security Events",
            DataKind::Alerts => "Alerts & Notifications",
            DataKind::NetworkTraffic => "Network Traffic",
            DataKind::ApmData => "APM Data",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DataKind::UnstructuredLogs => {
                "Traditional log files with free-form text messages"
            }
            DataKind::StructuredLogs => {
                "JSON-formatted logs with consistent fields and metadata"
            }
            DataKind::DistributedTraces => {
                "OpenTelemetry-style tracing data showing request flows across services"
            }
            DataKind::Metrics => {
                "Counter, gauge, histogram and summary metrics from applications and infrastructure"
            }
            DataKind::SecurityEvents => {
                "SIEM-style security events including authentication, network, and threat data"
            }
            DataKind::Alerts => "Alert manager style alerts with firing and resolved states",
            DataKind::NetworkTraffic => {
                "Network flow logs with connection details, protocols, and traffic analysis"
            }
            DataKind::ApmData => {
                "Application Performance Monitoring data with transactions, errors, and traces"
            }
        }
    }

    /// Target Elasticsearch index name.
    pub fn index_name(&self) -> &'static str {
        match self {
            DataKind::UnstructuredLogs => "logs-unstructured",
            DataKind::StructuredLogs => "logs-structured",
            DataKind::DistributedTraces => "traces",
            DataKind::Metrics => "metrics",
            DataKind::SecurityEvents => "security-events",
            DataKind::Alerts => "alerts",
            DataKind::NetworkTraffic => "network-traffic",
            DataKind::ApmData => "apm",
        }
    }

    /// Construct this kind's generator with the given seed.
    pub fn build_generator(&self, seed: u64) -> Box<dyn EntryGenerator> {
        match self {
            DataKind::UnstructuredLogs => Box::new(UnstructuredLogGenerator::new(seed)),
            DataKind::StructuredLogs => Box::new(StructuredLogGenerator::new(seed)),
            DataKind::DistributedTraces => Box::new(TraceGenerator::new(seed)),
            DataKind::Metrics => Box::new(MetricGenerator::new(seed)),
            DataKind::SecurityEvents => Box::new(SecurityEventGenerator::new(seed)),
            DataKind::Alerts => Box::new(AlertGenerator::new(seed)),
            DataKind::NetworkTraffic => Box::new(NetworkTrafficGenerator::new(seed)),
            DataKind::ApmData => Box::new(ApmGenerator::new(seed)),
        }
    }

    /// Elasticsearch field mapping (`properties` object) for this kind's
    /// fixed field set. Fields not listed here are left to dynamic mapping.
    pub fn mapping(&self) -> Value {
        match self {
            DataKind::UnstructuredLogs => json!({
                "@timestamp": {"type": "date"},
                "log.level": {"type": "keyword"},
                "source": {"type": "keyword"},
                "message": {"type": "text"},
            }),
            DataKind::StructuredLogs => json!({
                "@timestamp": {"type": "date"},
                "service.name": {"type": "keyword"},
                "service.version": {"type": "keyword"},
                "log.level": {"type": "keyword"},
                "environment": {"type": "keyword"},
                "host.name": {"type": "keyword"},
                "process.pid": {"type": "long"},
                "trace.id": {"type": "keyword"},
                "span.id": {"type": "keyword"},
                "user.id": {"type": "keyword"},
                "request.id": {"type": "keyword"},
                "http.method": {"type": "keyword"},
                "http.status_code": {"type": "integer"},
                "http.response_time_ms": {"type": "integer"},
                "message": {"type": "text"},
            }),
            DataKind::DistributedTraces => json!({
                "@timestamp": {"type": "date"},
                "trace.id": {"type": "keyword"},
                "span.id": {"type": "keyword"},
                "span.parent_id": {"type": "keyword"},
                "span.name": {"type": "keyword"},
                "service.name": {"type": "keyword"},
                "operation.name": {"type": "keyword"},
                "span.kind": {"type": "keyword"},
                "span.status": {"type": "keyword"},
                "duration.ms": {"type": "long"},
                "span.start_time": {"type": "date"},
                "span.end_time": {"type": "date"},
            }),
            DataKind::Metrics => json!({
                "@timestamp": {"type": "date"},
                "metric.type": {"type": "keyword"},
                "metric.name": {"type": "keyword"},
                "metric.value": {"type": "double"},
                "metric.count": {"type": "long"},
                "metric.sum": {"type": "long"},
                "service.name": {"type": "keyword"},
                "host.name": {"type": "keyword"},
                "environment": {"type": "keyword"},
            }),
            DataKind::SecurityEvents => json!({
                "@timestamp": {"type": "date"},
                "event.type": {"type": "keyword"},
                "event.id": {"type": "keyword"},
                "event.severity": {"type": "keyword"},
                "event.action": {"type": "keyword"},
                "event.outcome": {"type": "keyword"},
                "source.ip": {"type": "ip"},
                "destination.ip": {"type": "ip"},
                "source.port": {"type": "integer"},
                "destination.port": {"type": "integer"},
                "user.name": {"type": "keyword"},
                "host.name": {"type": "keyword"},
                "threat.indicator": {"type": "keyword"},
                "message": {"type": "text"},
            }),
            DataKind::Alerts => json!({
                "@timestamp": {"type": "date"},
                "alert.name": {"type": "keyword"},
                "alert.state": {"type": "keyword"},
                "alert.severity": {"type": "keyword"},
                "alert.id": {"type": "keyword"},
                "alert.started_at": {"type": "date"},
                "alert.resolved_at": {"type": "date"},
                "metric.value": {"type": "double"},
                "metric.threshold": {"type": "double"},
            }),
            DataKind::NetworkTraffic => json!({
                "@timestamp": {"type": "date"},
                "flow.id": {"type": "keyword"},
                "network.protocol": {"type": "keyword"},
                "network.transport": {"type": "keyword"},
                "network.direction": {"type": "keyword"},
                "network.bytes": {"type": "long"},
                "network.packets": {"type": "long"},
                "source.ip": {"type": "ip"},
                "destination.ip": {"type": "ip"},
                "source.port": {"type": "integer"},
                "destination.port": {"type": "integer"},
                "flow.duration_ms": {"type": "long"},
                "event.action": {"type": "keyword"},
                "http.method": {"type": "keyword"},
                "http.status_code": {"type": "integer"},
                "url.domain": {"type": "keyword"},
            }),
            DataKind::ApmData => json!({
                "@timestamp": {"type": "date"},
                "transaction.id": {"type": "keyword"},
                "transaction.type": {"type": "keyword"},
                "transaction.name": {"type": "keyword"},
                "transaction.result": {"type": "keyword"},
                "transaction.duration.ms": {"type": "long"},
                "service.name": {"type": "keyword"},
                "service.version": {"type": "keyword"},
                "trace.id": {"type": "keyword"},
                "span.id": {"type": "keyword"},
                "host.name": {"type": "keyword"},
                "http.method": {"type": "keyword"},
                "http.status_code": {"type": "integer"},
                "error.type": {"type": "keyword"},
                "error.message": {"type": "text"},
            }),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DataKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataKind::ALL
            .iter()
            .find(|kind| kind.id() == s)
            .copied()
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_ids() {
        for kind in DataKind::ALL {
            assert_eq!(kind.id().parse::<DataKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "bogus_kind".parse::<DataKind>().unwrap_err();
        assert_eq!(err, UnknownKind("bogus_kind".to_string()));
    }

    #[test]
    fn test_every_kind_generates() {
        for kind in DataKind::ALL {
            let mut generator = kind.build_generator(42);
            let record = generator.generate_entry();
            assert!(record.contains_key("@timestamp"), "{kind}: no @timestamp");
        }
    }

    #[test]
    fn test_mappings_cover_timestamp() {
        for kind in DataKind::ALL {
            let mapping = kind.mapping();
            assert_eq!(mapping["@timestamp"]["type"], "date", "{kind}");
        }
    }

    #[test]
    fn test_index_names_unique() {
        let mut names: Vec<&str> = DataKind::ALL.iter().map(|k| k.index_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DataKind::ALL.len());
    }
}
