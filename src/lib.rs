//! # LawboxAI client registry
//!
//! Builds the pre-configured service handles LawboxAI components share:
//!
//! - **Primary LLM** - a locally hosted Ollama model (`llama3.2:latest`,
//!   temperature 0.8) at the address in `OLLAMA_SERVER`
//! - **Secondary LLM** - an optional Groq cloud model (temperature 0),
//!   compiled in with the `groq` feature
//! - **Vector database** - the Qdrant instance at `lawboxai_qdrant`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lawbox::{ClientRegistry, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Defaults + .env + environment, validated up front
//!     let config = RegistryConfig::from_env()?;
//!     let registry = ClientRegistry::build(&config)?;
//!
//!     let answer = registry.primary().generate("Summarise clause 4.2").await?;
//!     let collections = registry.vector_db().client().list_collections().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `groq` | Groq secondary chat model via its OpenAI-compatible API |
//!
//! Tests for the secondary handle are gated on `groq`; run the whole suite
//! with `cargo test --features full`.
//!
//! ## Modules
//!
//! - [`registry`] - Builds and hands out the client handles
//! - [`llm`] - Chat handles and the provider abstraction
//! - [`db`] - Qdrant vector-database handle
//! - [`utils`] - Configuration loading and validation
//! - [`types`] - Error types
//! - [`cli`] - `lawbox-registry` command line

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line front end.
pub mod cli;
/// Vector database handle (Qdrant).
#[allow(missing_docs)]
pub mod db;
/// LLM provider clients and abstractions.
#[allow(missing_docs)]
pub mod llm;
/// Client registry.
pub mod registry;
/// Core types and error handling.
#[allow(missing_docs)]
pub mod types;
/// Configuration utilities.
#[allow(missing_docs)]
pub mod utils;

// Re-export commonly used types
pub use db::QdrantVectorStore;
pub use llm::{LLMClient, OllamaClient, Provider};
pub use registry::ClientRegistry;
pub use types::{AppError, Result};
pub use utils::config::{ConfigError, ConfigIssue, RegistryConfig};

#[cfg(feature = "groq")]
pub use llm::GroqClient;
