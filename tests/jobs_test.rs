//! End-to-end job tests against mock sinks.

use async_trait::async_trait;
use obs_datagen::{DataKind, Record};
use obs_elastic_sink::{EnsureIndex, IngestSink, SinkError};
use obs_forge::job::{JobOptions, JobPhase, JobRunner, JobStatus, StatusStore, ValidationError};
use obs_kibana_sink::{DashboardError, DashboardSink};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

#[derive(Default)]
struct MockIngest {
    fail: bool,
    indexed: Mutex<Vec<(String, usize)>>,
}

impl MockIngest {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn total_indexed(&self) -> usize {
        self.indexed.lock().unwrap().iter().map(|(_, n)| n).sum()
    }
}

#[async_trait]
impl IngestSink for MockIngest {
    async fn ensure_index(&self, _name: &str, _mapping: &Value) -> Result<EnsureIndex, SinkError> {
        Ok(EnsureIndex::Created)
    }

    async fn bulk_write(&self, name: &str, records: &[Record]) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::BulkItemFailures {
                failed: records.len(),
                first_reason: "mock rejection".to_string(),
            });
        }
        self.indexed
            .lock()
            .unwrap()
            .push((name.to_string(), records.len()));
        Ok(())
    }
}

#[derive(Default)]
struct MockDashboards {
    fail: bool,
    imported: AtomicUsize,
}

impl MockDashboards {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl DashboardSink for MockDashboards {
    async fn import_objects(&self, objects: &[Value]) -> Result<usize, DashboardError> {
        if self.fail {
            return Err(DashboardError::ImportRejected("mock rejection".to_string()));
        }
        self.imported.fetch_add(objects.len(), Ordering::SeqCst);
        Ok(objects.len())
    }
}

fn runner(
    ingest: Arc<MockIngest>,
    dashboards: Arc<MockDashboards>,
) -> JobRunner<MockIngest, MockDashboards> {
    JobRunner::new(StatusStore::new(), ingest, dashboards, 1000)
}

async fn await_terminal(store: &StatusStore, id: Uuid) -> JobStatus {
    for _ in 0..200 {
        let status = store.poll(id);
        if status.phase.is_terminal() {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("job did not reach a terminal phase in time");
}

#[tokio::test]
async fn test_count_over_max_rejected_before_id_allocation() {
    let runner = runner(Arc::default(), Arc::default());
    let result = runner.start_job(DataKind::Metrics, 5000, JobOptions::default());
    assert_eq!(
        result,
        Err(ValidationError::CountExceedsMax {
            requested: 5000,
            max: 1000,
        })
    );
}

#[tokio::test]
async fn test_csv_only_job_writes_sequenced_file() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(Arc::default(), Arc::default());
    let options = JobOptions {
        write_csv: true,
        ingest: false,
        create_dashboards: false,
        output_dir: dir.path().to_path_buf(),
        seed: Some(42),
    };

    let id = runner
        .start_job(DataKind::UnstructuredLogs, 100, options)
        .unwrap();
    let status = await_terminal(runner.store(), id).await;
    assert_eq!(status.phase, JobPhase::Completed);
    assert_eq!(status.progress, 100);

    let path = dir.path().join("unstructured_logs_dataset_0001.csv");
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 101);
    assert_eq!(lines[0], "@timestamp,log.level,message,source");
}

#[tokio::test]
async fn test_full_job_ingests_and_imports() {
    let ingest = Arc::new(MockIngest::default());
    let dashboards = Arc::new(MockDashboards::default());
    let runner = runner(Arc::clone(&ingest), Arc::clone(&dashboards));

    let id = runner
        .start_job(DataKind::StructuredLogs, 250, JobOptions::default())
        .unwrap();
    let status = await_terminal(runner.store(), id).await;

    assert_eq!(status.phase, JobPhase::Completed);
    assert!(status.message.contains("logs-structured"));
    assert_eq!(ingest.total_indexed(), 250);
    assert!(dashboards.imported.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn test_ingest_failure_is_fatal() {
    let runner = runner(Arc::new(MockIngest::failing()), Arc::default());

    let id = runner
        .start_job(DataKind::Alerts, 50, JobOptions::default())
        .unwrap();
    let status = await_terminal(runner.store(), id).await;

    assert_eq!(status.phase, JobPhase::Error);
    assert!(status.message.contains("mock rejection"));
}

#[tokio::test]
async fn test_dashboard_failure_downgrades_to_warning() {
    let ingest = Arc::new(MockIngest::default());
    let runner = runner(Arc::clone(&ingest), Arc::new(MockDashboards::failing()));

    let id = runner
        .start_job(DataKind::NetworkTraffic, 50, JobOptions::default())
        .unwrap();
    let status = await_terminal(runner.store(), id).await;

    // The data landed, so the job completes and names the index even though
    // the saved-object import failed.
    assert_eq!(status.phase, JobPhase::Completed);
    assert_eq!(status.progress, 100);
    assert!(status.message.contains("network-traffic"));
    assert!(status.message.contains("dashboard import failed"));
    assert_eq!(ingest.total_indexed(), 50);
}

#[tokio::test]
async fn test_unknown_job_id_polls_as_not_found() {
    let runner = runner(Arc::default(), Arc::default());
    let status = runner.store().poll(Uuid::new_v4());
    assert_eq!(status.phase, JobPhase::NotFound);
}

#[tokio::test]
async fn test_metrics_batch_invariants() {
    let records = obs_forge::generate(DataKind::Metrics, 10, 3);
    assert_eq!(records.len(), 10);
    for record in &records {
        let metric_type = record["metric.type"].as_str().unwrap();
        assert!(["counter", "gauge", "histogram", "summary"].contains(&metric_type));
        if record.contains_key("metric.buckets") {
            assert_eq!(metric_type, "histogram");
        }
    }
}

#[tokio::test]
async fn test_same_seed_same_batch() {
    let a = obs_forge::generate(DataKind::Metrics, 10, 9);
    let b = obs_forge::generate(DataKind::Metrics, 10, 9);
    let strip = |records: Vec<Record>| -> Vec<Record> {
        records
            .into_iter()
            .map(|mut record| {
                record.remove("@timestamp");
                record
            })
            .collect()
    };
    assert_eq!(strip(a), strip(b));
}
