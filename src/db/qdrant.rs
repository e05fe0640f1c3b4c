use crate::types::{AppError, Result};
use crate::utils::config::VectorDbConfig;
use qdrant_client::Qdrant;
use tracing::debug;

/// Qdrant vector database handle.
///
/// Wraps a lazily connected [`Qdrant`] client. Collection, point and search
/// operations are those of `qdrant-client`; reach them through
/// [`QdrantVectorStore::client`].
pub struct QdrantVectorStore {
    client: Qdrant,
    host: String,
    port: u16,
}

impl QdrantVectorStore {
    pub fn new(host: String, port: u16, api_key: Option<String>) -> Result<Self> {
        let url = format!("http://{}:{}", host, port);
        debug!("Creating Qdrant client for {}", url);

        // The version check would contact the server during construction.
        let mut builder = Qdrant::from_url(&url).skip_compatibility_check();
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Database(format!("Failed to create Qdrant client: {}", e)))?;

        Ok(Self { client, host, port })
    }

    /// Build from the `[vector_db]` configuration section
    pub fn from_config(config: &VectorDbConfig) -> Result<Self> {
        Self::new(config.host.clone(), config.port, config.api_key.clone())
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// The underlying client, for collection and point operations
    pub fn client(&self) -> &Qdrant {
        &self.client
    }

    /// Ask the server for its version. This is the first call that opens a
    /// connection.
    pub async fn health_check(&self) -> Result<String> {
        let reply = self
            .client
            .health_check()
            .await
            .map_err(|e| AppError::Database(format!("Qdrant health check failed: {}", e)))?;

        Ok(reply.version)
    }
}
