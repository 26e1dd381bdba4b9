//! The generation pipeline run by each job worker.
//!
//! Stages run in a fixed order: generate, optionally export CSV, optionally
//! ingest into Elasticsearch, optionally import Kibana saved objects. An
//! ingest failure kills the job; a dashboard failure only downgrades the
//! completion message, since the data itself landed fine.

use obs_datagen::{DataKind, Record};
use obs_elastic_sink::IngestSink;
use obs_kibana_sink::{objects, DashboardSink};
use uuid::Uuid;

use crate::job::{JobOptions, JobPhase, StatusStore};

/// Entries generated between progress updates.
const PROGRESS_CHUNK: usize = 1000;

/// Generate a batch of records synchronously.
pub fn generate(kind: DataKind, count: usize, seed: u64) -> Vec<Record> {
    let mut generator = kind.build_generator(seed);
    (0..count).map(|_| generator.generate_entry()).collect()
}

fn generation_progress(produced: usize, count: usize) -> u8 {
    // Generation owns the 10..30 band of the progress bar.
    10 + (produced * 20 / count.max(1)) as u8
}

/// Run every stage of a job, reporting progress into the status store.
pub async fn run_pipeline<I, D>(
    store: &StatusStore,
    id: Uuid,
    kind: DataKind,
    count: usize,
    options: &JobOptions,
    ingest: &I,
    dashboards: &D,
) -> anyhow::Result<()>
where
    I: IngestSink + ?Sized,
    D: DashboardSink + ?Sized,
{
    let index = kind.index_name();
    let seed = options.seed.unwrap_or_else(rand::random);

    store.update(
        id,
        JobPhase::Running,
        format!("Generating {count} {} entries", kind.display_name()),
        10,
    );

    let mut generator = kind.build_generator(seed);
    let mut records = Vec::with_capacity(count);
    for produced in 0..count {
        records.push(generator.generate_entry());
        if (produced + 1) % PROGRESS_CHUNK == 0 {
            store.update(
                id,
                JobPhase::Running,
                format!("Generated {}/{count} entries", produced + 1),
                generation_progress(produced + 1, count),
            );
        }
    }
    tracing::info!(job_id = %id, kind = kind.id(), count, seed, "generation finished");

    if options.write_csv {
        store.update(id, JobPhase::Running, "Exporting CSV", 30);
        let path = crate::export::write_csv(&records, kind, &options.output_dir)?;
        store.update(
            id,
            JobPhase::Running,
            format!("Wrote {}", path.display()),
            45,
        );
    }

    if options.ingest {
        store.update(
            id,
            JobPhase::Running,
            format!("Ingesting into index {index}"),
            50,
        );
        let outcome = ingest.ensure_index(index, &kind.mapping()).await?;
        tracing::debug!(job_id = %id, index, ?outcome, "index ready");
        ingest.bulk_write(index, &records).await?;
        store.update(
            id,
            JobPhase::Running,
            format!("Ingested {count} entries into {index}"),
            70,
        );
    }

    let mut dashboard_warning = None;
    if options.create_dashboards {
        store.update(id, JobPhase::Running, "Importing saved objects", 80);
        let columns: Vec<&str> = records
            .first()
            .map(|record| {
                record
                    .keys()
                    .filter(|key| key.as_str() != "@timestamp")
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default();
        match dashboards
            .import_objects(&objects::default_objects(index, &columns))
            .await
        {
            Ok(imported) => {
                store.update(
                    id,
                    JobPhase::Running,
                    format!("Imported {imported} saved objects"),
                    95,
                );
            }
            Err(e) => {
                tracing::warn!(job_id = %id, error = %e, "saved-object import failed");
                dashboard_warning = Some(e);
            }
        }
    }

    let message = match dashboard_warning {
        None => format!("Generated {count} entries for index {index}"),
        Some(e) => format!(
            "Generated {count} entries for index {index}; dashboard import failed ({e}), set up the data view manually"
        ),
    };
    store.update(id, JobPhase::Completed, message, 100);

    Ok(())
}
