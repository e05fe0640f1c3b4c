//! LLM Provider Clients and Abstractions
//!
//! The registry hands out chat handles as `Arc<dyn LLMClient>`, so consumers
//! never depend on the provider behind them.
//!
//! - [`LLMClient`] - The core trait both providers implement
//! - [`Provider`] - Describes a handle and creates it
//!
//! # Supported Providers
//!
//! - Ollama - always available, used for the primary handle
//! - Groq - enable the `groq` feature for the secondary handle
//!
//! # Example
//!
//! ```ignore
//! use lawbox::llm::Provider;
//!
//! let client = Provider::Ollama {
//!     base_url: "http://localhost:11434".to_string(),
//!     model: "llama3.2:latest".to_string(),
//!     temperature: 0.8,
//! }
//! .create_client()?;
//!
//! let answer = client.generate("What is a tort?").await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;

pub mod ollama;

#[cfg(feature = "groq")]
pub mod groq;

pub use client::{LLMClient, Provider};
pub use ollama::OllamaClient;

#[cfg(feature = "groq")]
pub use groq::GroqClient;
