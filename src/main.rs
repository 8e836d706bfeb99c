use std::path::PathBuf;
use std::sync::Arc;

use bookmarks::config::{Backend, Cli, Config, default_config_dir, default_config_path};
use bookmarks::db::Database;
use bookmarks::handler::AppState;
use bookmarks::routes::app;
use bookmarks::store::{BookmarkStore, MemoryStore, seed_if_empty};
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // With --config, data (the libsql file) lives next to the config file.
    // Otherwise both live in ~/.bookmarks/.
    let (config_path, data_dir) = match args.config_path {
        Some(path) => {
            let path = PathBuf::from(path);
            let dir = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            (path, dir)
        }
        None => (default_config_path(), default_config_dir()),
    };

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to read .env: {}", e);
        }
    }

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("bookmarks.svc starting");

    let mut cfg = Config::new(&config_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });
    cfg.override_port(args.port);

    let store: Arc<dyn BookmarkStore> = match cfg.storage.backend {
        Backend::Memory => {
            tracing::info!("[store] using in-memory bookmarks");
            Arc::new(MemoryStore::new())
        }
        Backend::Libsql => {
            if let Err(e) = std::fs::create_dir_all(&data_dir) {
                tracing::error!(error = %e, dir = ?data_dir, "failed to create data directory");
                std::process::exit(1);
            }
            let db = Database::new(&cfg.storage.database, &data_dir).await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to setup database");
                std::process::exit(1);
            });
            Arc::new(db)
        }
    };

    if cfg.storage.seed {
        if let Err(e) = seed_if_empty(store.as_ref()).await {
            tracing::error!(error = %bookmarks::unpack_error(&e), "failed to seed bookmarks");
            std::process::exit(1);
        }
    }

    let router = app(AppState::new(store), cfg.app.get_api_token());
    let address = format!("0.0.0.0:{}", cfg.app.get_port());

    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("bookmarks.svc running on {}", &address);
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
        }
        tracing::info!("ctrl+c signal received, preparing to shutdown");
    };

    if let Err(err) = axum::serve(listener, router).with_graceful_shutdown(shutdown).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }

    tracing::info!("bookmarks.svc going off, graceful shutdown complete");
}
