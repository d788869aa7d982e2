//! `taskhubd` — the TaskHub server binary.
//!
//! Usage:
//!   taskhubd [--listen <addr>] [--data-dir <dir>] [--db <path>] [--dev]
//!
//! Serves the task API under `/api/tasks`, plus a service descriptor at `/`.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use taskhub_core::Module;
use tracing::info;

/// TaskHub server.
#[derive(Parser, Debug)]
#[command(name = "taskhubd", about = "TaskHub server")]
struct Cli {
    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:5000")]
    listen: String,

    /// Directory for persistent data.
    #[arg(long = "data-dir", default_value = "data")]
    data_dir: PathBuf,

    /// Path to the SQLite database file (default: `{data-dir}/data.sqlite`).
    #[arg(long = "db")]
    db: Option<PathBuf>,

    /// Dev mode: expose internal error detail in responses.
    #[arg(long = "dev")]
    dev: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = taskhub_core::ServiceConfig {
        data_dir: Some(cli.data_dir.clone()),
        db_path: cli.db.clone(),
        listen: cli.listen.clone(),
        dev: cli.dev,
    };

    // Error responses include internal detail only in dev mode.
    taskhub_core::error::set_expose_internal_detail(config.dev);
    if config.dev {
        info!("Dev mode: internal error detail exposed in responses");
    }

    // Initialize storage.
    std::fs::create_dir_all(&cli.data_dir)?;
    let db: Arc<dyn taskhub_sql::SQLStore> = Arc::new(
        taskhub_sql::SqliteStore::open(&config.resolve_db_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    let tasks_module = taskhub_tasks::TasksModule::new(db)?;
    info!("Tasks module initialized");

    // Build router.
    let app = routes::build_router(vec![(tasks_module.name(), tasks_module.routes())]);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("TaskHub server listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
