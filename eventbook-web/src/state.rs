//! Application state wiring the core service to its collaborators

use crate::{database::SqliteStore, WebConfig, WebError, WebResult};
use chrono::Duration;
use eventbook_core::{AuthService, MemoryStore, TokenCodec};
use std::sync::Arc;
use tracing::info;

/// Shared per-process state. The signing key inside the codec is
/// read-only after startup; everything else lives behind the
/// persistence collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Auth service over the configured stores
    pub auth: AuthService,
}

impl AppState {
    /// Create a new application state
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let codec = TokenCodec::new(
            config.jwt_secret.as_bytes(),
            Duration::minutes(config.token_ttl_minutes),
        );

        let auth = if let Some(database_url) = &config.database_url {
            let store = Arc::new(
                SqliteStore::new(database_url)
                    .await
                    .map_err(|e| WebError::Database(e.to_string()))?,
            );
            info!("Using SQLite store at {}", database_url);
            AuthService::new(codec, store.clone(), store)
        } else {
            let store = Arc::new(MemoryStore::new());
            info!("No DATABASE_URL configured, using in-memory store");
            AuthService::new(codec, store.clone(), store)
        };

        Ok(Self { config, auth })
    }
}
