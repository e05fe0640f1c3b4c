//! Client Registry
//!
//! Builds the handles every LawboxAI service talks to:
//!
//! - the primary chat model (Ollama)
//! - an optional secondary chat model (Groq)
//! - the Qdrant vector database
//!
//! The registry is a plain value. Build it once at startup and hand clones
//! to the components that need it; every handle is behind an `Arc`. For code
//! that cannot take it as a parameter, [`ClientRegistry::install`] publishes
//! a single process-wide instance.
//!
//! Construction performs no network I/O. Each client connects the first
//! time it is used.

use crate::db::QdrantVectorStore;
use crate::llm::{LLMClient, Provider};
use crate::types::{AppError, Result};
use crate::utils::config::RegistryConfig;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Process-wide registry, set at most once.
static GLOBAL_REGISTRY: OnceLock<ClientRegistry> = OnceLock::new();

/// Pre-configured client handles
#[derive(Clone)]
pub struct ClientRegistry {
    config: Arc<RegistryConfig>,
    primary: Arc<dyn LLMClient>,
    secondary: Option<Arc<dyn LLMClient>>,
    vector_db: Arc<QdrantVectorStore>,
}

impl ClientRegistry {
    /// Build all handles from a configuration.
    ///
    /// The configuration is taken as given: call
    /// [`RegistryConfig::validate`] (or use one of its loading functions)
    /// first to have absent or malformed values reported. The primary
    /// endpoint is recorded exactly as configured, empty included.
    ///
    /// # Errors
    ///
    /// Returns an error if the secondary handle is enabled in a build without
    /// the `groq` feature, or if the Qdrant client cannot be created.
    pub fn build(config: &RegistryConfig) -> Result<Self> {
        let primary = Provider::from_primary(&config.primary).create_client()?;
        info!(
            "Primary LLM handle ready: model={} endpoint='{}' temperature={}",
            primary.model_name(),
            primary.base_url(),
            primary.temperature()
        );

        let secondary = if config.secondary.enabled {
            let provider = Provider::from_secondary(&config.secondary);
            let client = provider.create_client()?;
            info!(
                "Secondary LLM handle ready: provider={} model={} temperature={}",
                provider.name(),
                client.model_name(),
                client.temperature()
            );
            Some(client)
        } else {
            debug!("Secondary LLM disabled");
            None
        };

        let vector_db = Arc::new(QdrantVectorStore::from_config(&config.vector_db)?);
        info!("Vector database handle ready: {}", vector_db.url());

        Ok(Self {
            config: Arc::new(config.clone()),
            primary,
            secondary,
            vector_db,
        })
    }

    /// Load configuration from defaults, `.env` and the environment, then build.
    pub fn from_env() -> Result<Self> {
        let config = RegistryConfig::from_env()?;
        Self::build(&config)
    }

    /// Configuration the handles were built from
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Primary chat handle
    pub fn primary(&self) -> Arc<dyn LLMClient> {
        Arc::clone(&self.primary)
    }

    /// Secondary chat handle, when enabled
    pub fn secondary(&self) -> Option<Arc<dyn LLMClient>> {
        self.secondary.as_ref().map(Arc::clone)
    }

    /// Vector database handle
    pub fn vector_db(&self) -> Arc<QdrantVectorStore> {
        Arc::clone(&self.vector_db)
    }

    /// Publish this registry as the process-wide instance.
    ///
    /// # Errors
    ///
    /// Fails if a registry was already installed; the existing one is kept.
    pub fn install(self) -> Result<&'static ClientRegistry> {
        let mut installed = false;
        let registry = GLOBAL_REGISTRY.get_or_init(|| {
            installed = true;
            self
        });

        if installed {
            info!("Client registry installed");
            Ok(registry)
        } else {
            Err(AppError::Internal(
                "A client registry is already installed for this process".to_string(),
            ))
        }
    }

    /// The process-wide registry, if one was installed
    pub fn global() -> Option<&'static ClientRegistry> {
        GLOBAL_REGISTRY.get()
    }
}

impl fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("primary_model", &self.primary.model_name())
            .field("primary_endpoint", &self.primary.base_url())
            .field(
                "secondary_model",
                &self.secondary.as_ref().map(|s| s.model_name()),
            )
            .field("vector_db", &self.vector_db.url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_endpoint(endpoint: Option<&str>) -> RegistryConfig {
        let mut config = RegistryConfig::default();
        config.primary.base_url = endpoint.map(str::to_string);
        config.secondary.enabled = false;
        config
    }

    #[test]
    fn test_build_records_primary_settings() {
        let registry =
            ClientRegistry::build(&config_with_endpoint(Some("http://localhost:11434"))).unwrap();

        let primary = registry.primary();
        assert_eq!(primary.base_url(), "http://localhost:11434");
        assert_eq!(primary.model_name(), "llama3.2:latest");
        assert_eq!(primary.temperature(), 0.8);
        assert!(registry.secondary().is_none());
    }

    #[test]
    fn test_build_without_endpoint_succeeds() {
        let registry = ClientRegistry::build(&config_with_endpoint(None)).unwrap();

        assert_eq!(registry.primary().base_url(), "");
    }

    #[test]
    fn test_vector_db_host_is_fixed() {
        let registry = ClientRegistry::build(&config_with_endpoint(None)).unwrap();

        assert_eq!(registry.vector_db().host(), "lawboxai_qdrant");
    }

    #[test]
    fn test_clones_share_handles() {
        let registry = ClientRegistry::build(&config_with_endpoint(None)).unwrap();
        let clone = registry.clone();

        assert!(Arc::ptr_eq(&registry.primary(), &clone.primary()));
        assert!(Arc::ptr_eq(&registry.vector_db(), &clone.vector_db()));
    }

    #[test]
    fn test_unusable_endpoint_is_recorded_verbatim() {
        let registry = ClientRegistry::build(&config_with_endpoint(Some("not a url"))).unwrap();

        assert_eq!(registry.primary().base_url(), "not a url");
    }

    #[cfg(not(feature = "groq"))]
    #[test]
    fn test_secondary_enabled_without_feature_fails_build() {
        let mut config = config_with_endpoint(None);
        config.secondary.enabled = true;

        assert!(matches!(
            ClientRegistry::build(&config),
            Err(AppError::Configuration(_))
        ));
    }

    #[cfg(feature = "groq")]
    #[test]
    fn test_secondary_settings() {
        let mut config = config_with_endpoint(None);
        config.secondary.enabled = true;
        config.secondary.api_key = Some("gsk-test".to_string());

        let registry = ClientRegistry::build(&config).unwrap();
        let secondary = registry.secondary().unwrap();

        assert_eq!(secondary.model_name(), "llama-3.3-70b-versatile");
        assert_eq!(secondary.temperature(), 0.0);
    }
}
