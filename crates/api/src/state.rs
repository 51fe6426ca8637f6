use std::sync::Arc;

use graphene_core::pressure::config::IngestConfig;
use graphene_core::pressure::importer::FrameImporter;
use graphene_db::sink::PgPressureSink;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: graphene_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Dataset importer writing through the database sink.
    pub importer: Arc<FrameImporter<PgPressureSink>>,
    /// Cancelled when the server begins shutting down. Imports run under a
    /// child token so they stop between files.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        pool: graphene_db::DbPool,
        config: ServerConfig,
        ingest: IngestConfig,
        shutdown: CancellationToken,
    ) -> Self {
        let importer = FrameImporter::new(PgPressureSink::new(pool.clone()), ingest);
        Self {
            pool,
            config: Arc::new(config),
            importer: Arc::new(importer),
            shutdown,
        }
    }

    pub fn ingest_config(&self) -> &IngestConfig {
        self.importer.config()
    }
}
