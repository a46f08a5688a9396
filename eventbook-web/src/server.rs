//! Eventbook Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main Eventbook web server
pub struct EventbookServer {
    config: WebConfig,
    state: AppState,
}

impl EventbookServer {
    /// Create a new Eventbook server
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting Eventbook Web Server");
        info!("Server address: http://{}", address);

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for EventbookServer
#[derive(Default)]
pub struct EventbookServerBuilder {
    config: WebConfig,
}

impl EventbookServerBuilder {
    /// Create a new server builder seeded from the environment
    pub fn new() -> Self {
        Self {
            config: WebConfig::from_env(),
        }
    }

    pub fn host(mut self, host: String) -> Self {
        self.config.host = host;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn database_url(mut self, database_url: Option<String>) -> Self {
        self.config.database_url = database_url;
        self
    }

    pub fn jwt_secret(mut self, jwt_secret: String) -> Self {
        self.config.jwt_secret = jwt_secret;
        self
    }

    pub fn token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.config.token_ttl_minutes = minutes;
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<EventbookServer> {
        EventbookServer::new(self.config).await
    }
}
