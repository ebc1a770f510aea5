//! Model layer integration for the explorer
//!
//! Resolves and loads the embedding model the session runs against.

use std::path::Path;
use std::time::Instant;

use crate::error::ExplorerResult;

// Import and re-export types from wordvec_model
pub use wordvec_model::{EmbeddingModel, ModelFormat, Neighbor, QueryError};

/// Locate and load the model, blocking until it is in memory.
///
/// # Arguments
/// * `explicit` - Path given on the command line, if any
/// * `format` - Forced format, `None` to detect from the path
///
/// # Errors
/// Returns error if no model can be found or the file cannot be parsed.
pub fn open_model(
    explicit: Option<&Path>,
    format: Option<ModelFormat>,
) -> ExplorerResult<EmbeddingModel> {
    let path = wordvec_model::find_model_path(explicit).map_err(|e| {
        tracing::error!("Model discovery failed: {}", e);
        e
    })?;

    let started = Instant::now();
    let model = EmbeddingModel::load(&path, format).map_err(|e| {
        tracing::error!("Failed to load {}: {}", path.display(), e);
        e
    })?;

    tracing::info!(
        "Model ready: {} terms, {}d, loaded in {:.1?}",
        model.vocabulary_size(),
        model.dimension(),
        started.elapsed()
    );
    Ok(model)
}
