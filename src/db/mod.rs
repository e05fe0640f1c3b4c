//! Vector database handle.
//!
//! LawboxAI stores its embeddings in Qdrant. This module only builds the
//! client; collection and search operations come from `qdrant-client`.

pub mod qdrant;

pub use qdrant::QdrantVectorStore;
