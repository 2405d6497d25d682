//! Server Implementation
//!
//! HTTP server startup and shutdown

use crate::core::{Config, Result, ServerState};
use crate::services::HttpService;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let http = HttpService::new(state);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        http.start_server(shutdown)
            .await
            .map_err(|e| crate::core::ServerError::Internal(e.into()))?;

        Ok(())
    }
}
