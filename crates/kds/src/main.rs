//! Kuntur Detector case service (KDS)
//!
//! Serves the case API over the file store or MongoDB.

use std::sync::Arc;

use clap::Parser;
use kuntur_persistence::backends::file::FileBackend;
use kuntur_persistence::core::{Backend, BackendKind};
use kuntur_persistence::{CaseRepository, CaseStorage};
use kuntur_rest::{AppState, ServerConfig, create_app, init_logging};
use tracing::info;

#[cfg(feature = "mongodb")]
use kuntur_persistence::backends::mongodb::MongoBackend;

/// Creates and initializes the file backend from the server configuration.
async fn create_file_backend(config: &ServerConfig) -> anyhow::Result<Arc<FileBackend>> {
    info!(path = %config.data_file.display(), "Initializing file backend");

    let backend = FileBackend::new(&config.data_file);
    backend.initialize().await?;

    Ok(Arc::new(backend))
}

/// Connects to MongoDB when `MONGO_URI` is set.
#[cfg(feature = "mongodb")]
async fn connect_document_store(config: &ServerConfig) -> anyhow::Result<Option<Arc<MongoBackend>>> {
    let Some(mongo_config) = config.mongo_config() else {
        return Ok(None);
    };

    info!(
        database = %mongo_config.database,
        collection = %mongo_config.collection,
        "Connecting to MongoDB"
    );
    let backend = MongoBackend::connect(mongo_config).await?;
    Ok(Some(Arc::new(backend)))
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let backend_kind = config
        .backend_kind()
        .map_err(|e| anyhow::anyhow!("Invalid storage backend configuration: {}", e))?;

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %backend_kind,
        "Starting Kuntur Detector case service"
    );

    let file_store = create_file_backend(&config).await?;

    match backend_kind {
        BackendKind::File => start_file(config, file_store).await,
        BackendKind::MongoDB => start_mongodb(config, file_store).await,
    }
}

/// Starts the server with the file store as active backend.
///
/// When `MONGO_URI` is also set, the document store is attached for the
/// migration and report endpoints.
#[cfg(feature = "mongodb")]
async fn start_file(config: ServerConfig, file_store: Arc<FileBackend>) -> anyhow::Result<()> {
    let storage: Arc<dyn CaseStorage> = file_store.clone();
    let mut state = AppState::new(CaseRepository::new(storage), config.clone())
        .with_file_store(file_store);

    if let Some(document_store) = connect_document_store(&config).await? {
        if let Err(e) = document_store.initialize().await {
            tracing::warn!(error = %e, "MongoDB is not reachable; migration will fail until it is");
        }
        state = state.with_document_store(document_store);
    }

    serve(create_app(state), &config).await
}

/// Starts the server with the file store as active backend.
#[cfg(not(feature = "mongodb"))]
async fn start_file(config: ServerConfig, file_store: Arc<FileBackend>) -> anyhow::Result<()> {
    let storage: Arc<dyn CaseStorage> = file_store.clone();
    let state = AppState::new(CaseRepository::new(storage), config.clone())
        .with_file_store(file_store);

    serve(create_app(state), &config).await
}

/// Starts the server with MongoDB as active backend.
#[cfg(feature = "mongodb")]
async fn start_mongodb(config: ServerConfig, file_store: Arc<FileBackend>) -> anyhow::Result<()> {
    let Some(document_store) = connect_document_store(&config).await? else {
        anyhow::bail!("The mongodb backend requires MONGO_URI");
    };
    document_store.initialize().await?;

    let storage: Arc<dyn CaseStorage> = document_store.clone();
    let state = AppState::new(CaseRepository::new(storage), config.clone())
        .with_file_store(file_store)
        .with_document_store(document_store);

    serve(create_app(state), &config).await
}

/// Fallback when mongodb feature is not enabled.
#[cfg(not(feature = "mongodb"))]
async fn start_mongodb(_config: ServerConfig, _file_store: Arc<FileBackend>) -> anyhow::Result<()> {
    anyhow::bail!(
        "The mongodb backend requires the 'mongodb' feature. \
         Build with: cargo build -p kuntur-kds --features mongodb"
    )
}
