//! Wordvec Model Layer
//!
//! Loads pre-trained word embeddings and answers semantic queries over
//! their vocabulary.
//!
//! ## Features
//!
//! - **Formats** - word2vec text and binary, GloVe, Model2Vec directories
//! - **Queries** - pair similarity, nearest neighbours, analogies, odd one out
//! - **Typed failures** - unknown terms are reported, never panicked on
//!
//! ## Example
//!
//! ```ignore
//! use wordvec_model::{find_model_path, EmbeddingModel};
//!
//! let path = find_model_path(None)?;
//! let model = EmbeddingModel::load(&path, None)?;
//!
//! let score = model.pair_similarity("cat", "dog")?;
//! let queen = model.vector_analogy("king", "man", "woman")?;
//! let odd = model.odd_one_out(&["king", "queen", "prince", "banana"])?;
//! ```

pub mod embedding;
pub mod error;
pub mod model;
pub mod vectors;

// Re-exports for convenience
pub use embedding::{find_model_path, ModelFormat, MODEL_PATH_ENV};
pub use error::{ModelError, QueryError};
pub use model::{EmbeddingModel, ANALOGY_RESULTS};
pub use vectors::{KeyedVectors, Neighbor};
