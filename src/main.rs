use std::sync::Arc;

use citizen_reports::core::config::Config;
use citizen_reports::core::database;
use citizen_reports::features::reports::{PgReportStore, ReportService};
use citizen_reports::features::users::PgUserDirectory;
use citizen_reports::shared::types::PaginationQuery;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded (tokio_worker_threads={}, default_status={})",
        worker_threads,
        config.reports.default_status
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!(
        "Database connection pool created: {}",
        config.database.redacted_url()
    );

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let report_service = ReportService::new(
        Arc::new(PgReportStore::new(pool.clone())),
        Arc::new(PgUserDirectory::new(pool.clone())),
        &config.reports,
    )?;

    let page = report_service.list(&PaginationQuery::default()).await?;
    tracing::info!(
        "Report repository ready: {} reports stored ({} pages of {})",
        page.total,
        page.total_pages(),
        page.page_size
    );

    pool.close().await;
    Ok(())
}
