use std::sync::Arc;

use anyhow::Result;
use assignfeed_core::{CanvasClient, FeedConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FeedConfig>,
    // Reused across requests for its connection pool; nothing else is
    // shared between requests.
    pub client: CanvasClient,
}

impl AppState {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = CanvasClient::new(&config)?;

        Ok(AppState {
            config: Arc::new(config),
            client,
        })
    }
}
