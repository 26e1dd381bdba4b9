use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use obs_datagen::DataKind;
use obs_elastic_sink::ElasticsearchSink;
use obs_forge::config::{Settings, DEFAULT_CONFIG_PATH};
use obs_forge::job::{JobOptions, JobPhase, JobRunner, StatusStore};
use obs_kibana_sink::KibanaSink;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "obs-forge")]
#[command(about = "Generate realistic observability test data for Elasticsearch and Kibana")]
struct Cli {
    /// Path to the JSON settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available data kinds
    List,

    /// Generate a batch of entries and optionally export or ingest them
    Generate {
        /// The kind of data to generate
        kind: DataKind,

        /// Number of entries (defaults to the configured default)
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed for reproducible batches
        #[arg(long)]
        seed: Option<u64>,

        /// Write the batch to a sequenced CSV file
        #[arg(long)]
        csv: bool,

        /// Bulk-ingest the batch into Elasticsearch
        #[arg(long)]
        ingest: bool,

        /// Import a data view and discover sessions into Kibana
        #[arg(long)]
        dashboards: bool,

        /// Directory for CSV output
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Check connectivity to Elasticsearch and Kibana
    TestConnection,

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective settings
    Show,
    /// Write a default settings file if none exists
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    match cli.command {
        Commands::List => list_kinds(),
        Commands::Generate {
            kind,
            count,
            seed,
            csv,
            ingest,
            dashboards,
            output_dir,
        } => {
            let count = count.unwrap_or(settings.generation.default_entries);
            let options = JobOptions {
                write_csv: csv,
                ingest,
                create_dashboards: dashboards,
                output_dir,
                seed,
            };
            run_generate(&settings, kind, count, options).await?;
        }
        Commands::TestConnection => test_connection(&settings).await?,
        Commands::Config { command } => match command {
            ConfigCommands::Show => println!("{}", serde_json::to_string_pretty(&settings)?),
            ConfigCommands::Init => {
                if cli.config.exists() {
                    println!("Settings file {} already exists", cli.config.display());
                } else {
                    Settings::default().save(&cli.config)?;
                    println!("Wrote default settings to {}", cli.config.display());
                }
            }
        },
    }

    Ok(())
}

fn list_kinds() {
    for kind in DataKind::ALL {
        println!(
            "{:<20} {:<28} index: {:<18} {}",
            kind.id(),
            kind.display_name(),
            kind.index_name(),
            kind.description()
        );
    }
}

async fn run_generate(
    settings: &Settings,
    kind: DataKind,
    count: usize,
    options: JobOptions,
) -> anyhow::Result<()> {
    let ingest = Arc::new(ElasticsearchSink::new(
        &settings.elasticsearch.host,
        &settings.elasticsearch.username,
        &settings.elasticsearch.password,
    )?);
    let dashboards = Arc::new(KibanaSink::new(
        &settings.kibana.host,
        &settings.kibana.username,
        &settings.kibana.password,
    )?);

    let runner = JobRunner::new(
        StatusStore::new(),
        ingest,
        dashboards,
        settings.generation.max_entries,
    );
    let id = runner.start_job(kind, count, options)?;
    tracing::info!(job_id = %id, kind = kind.id(), count, "job started");

    // Same pipeline a service would run in the background, awaited here.
    let mut last_message = String::new();
    loop {
        tokio::time::sleep(Duration::from_millis(250)).await;
        let status = runner.store().poll(id);
        if status.message != last_message {
            tracing::info!(progress = status.progress, "{}", status.message);
            last_message = status.message.clone();
        }
        if status.phase.is_terminal() {
            if status.phase == JobPhase::Error {
                bail!("{}", status.message);
            }
            break;
        }
    }

    Ok(())
}

async fn test_connection(settings: &Settings) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let es_url = format!(
        "{}/_cluster/health",
        settings.elasticsearch.host.trim_end_matches('/')
    );
    match client
        .get(&es_url)
        .basic_auth(
            &settings.elasticsearch.username,
            Some(&settings.elasticsearch.password),
        )
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => {
            let health: serde_json::Value = response.json().await?;
            println!(
                "Elasticsearch: ok (cluster status {})",
                health["status"].as_str().unwrap_or("unknown")
            );
        }
        Ok(response) => println!("Elasticsearch: HTTP {}", response.status()),
        Err(e) => println!("Elasticsearch: unreachable ({e})"),
    }

    let kibana_url = format!(
        "{}/api/status",
        settings.kibana.host.trim_end_matches('/')
    );
    match client
        .get(&kibana_url)
        .basic_auth(&settings.kibana.username, Some(&settings.kibana.password))
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => println!("Kibana: ok"),
        Ok(response) => println!("Kibana: HTTP {}", response.status()),
        Err(e) => println!("Kibana: unreachable ({e})"),
    }

    Ok(())
}
