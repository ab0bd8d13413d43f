use clap::{Parser, Subcommand};
use gridly_sync::{
    AppConfig, EntrySource, ExportPipeline, GridlyClient, JsonEntrySource, LocalRecordRef,
    ReconcileOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "gridly-sync", version, about = "Sync localization entries with a Gridly view")]
struct Cli {
    /// TOML configuration file. Defaults to `gridly.toml` when it exists.
    #[arg(long, short)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload entries, then prune stale records when sync is enabled.
    Export {
        #[arg(long)]
        entries: PathBuf,
        /// Also upload target-culture translations.
        #[arg(long)]
        with_translations: bool,
        /// Skip the fetch-and-prune step after uploading.
        #[arg(long)]
        no_sync: bool,
    },
    /// Print the request bodies an export would send.
    Preview {
        #[arg(long)]
        entries: PathBuf,
        #[arg(long)]
        with_translations: bool,
    },
    /// Delete records the entries make stale, without uploading.
    Prune {
        #[arg(long)]
        entries: PathBuf,
        /// List the ids instead of deleting them.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = AppConfig::load(cli.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|config| config.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(format!("gridly_sync={}", level)))?,
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    match cli.command {
        Command::Preview {
            entries,
            with_translations,
        } => {
            config.export.include_target_translations |= with_translations;
            let entries = JsonEntrySource::new(entries).load_entries()?;
            let client = Arc::new(GridlyClient::new(&config.api)?);
            let pipeline = ExportPipeline::new(client, &config);
            for page in pipeline.preview(&entries) {
                println!("{}", serde_json::to_string_pretty(&page.rows)?);
            }
        }
        Command::Export {
            entries,
            with_translations,
            no_sync,
        } => {
            config.export.include_target_translations |= with_translations;
            if no_sync {
                config.export.sync_records = false;
            }
            config.validate()?;

            let entries = JsonEntrySource::new(entries).load_entries()?;
            let client = Arc::new(GridlyClient::new(&config.api)?);
            let mut pipeline = ExportPipeline::new(client, &config);
            let report = pipeline.export(&entries).await?;

            println!("Number of entries updated: {}", report.entries_updated);
            match report.reconcile {
                ReconcileOutcome::Skipped => {}
                ReconcileOutcome::Pruned { stale, summary } => {
                    println!("Number of entries deleted: {} of {}", summary.records_deleted, stale);
                    if let Some(error) = summary.error_message() {
                        anyhow::bail!("Error during record deletion: {}", error);
                    }
                }
                ReconcileOutcome::Failed(e) => anyhow::bail!("Record sync failed: {}", e),
            }
        }
        Command::Prune { entries, dry_run } => {
            config.validate()?;

            let entries = JsonEntrySource::new(entries).load_entries()?;
            let local: Vec<LocalRecordRef> =
                entries.iter().map(LocalRecordRef::from_entry).collect();
            let client = Arc::new(GridlyClient::new(&config.api)?);
            let mut pipeline = ExportPipeline::new(client, &config);

            if dry_run {
                for id in pipeline.stale_ids(&local).await? {
                    println!("{}", id);
                }
            } else {
                let (stale, summary) = pipeline.prune(&local).await?;
                println!("Number of entries deleted: {} of {}", summary.records_deleted, stale);
                if let Some(error) = summary.error_message() {
                    anyhow::bail!("Error during record deletion: {}", error);
                }
            }
        }
    }

    Ok(())
}
