//! Model path discovery utilities
//!
//! Finds the embedding model to load when none is given explicitly.

use crate::error::{ModelError, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the model to load
pub const MODEL_PATH_ENV: &str = "WORDVEC_MODEL_PATH";

/// Find the model path with priority:
/// 1. Explicit path (must exist)
/// 2. Environment variable WORDVEC_MODEL_PATH
/// 3. User home directory (~/.wordvec/models/default)
pub fn find_model_path(explicit: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: explicit path from the command line
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(ModelError::invalid_path(format!(
            "model not found: {}",
            path.display()
        )));
    }

    // Priority 2: environment variable
    if let Ok(model_path) = std::env::var(MODEL_PATH_ENV) {
        let path = PathBuf::from(&model_path);
        if path.exists() {
            log::info!("Using {}: {}", MODEL_PATH_ENV, path.display());
            return Ok(path);
        }
        log::warn!("{} set but model not found: {}", MODEL_PATH_ENV, model_path);
    }

    // Priority 3: user home directory
    if let Some(user_path) = default_model_path() {
        if user_path.exists() {
            log::info!("Using user model: {}", user_path.display());
            return Ok(user_path);
        }
    }

    Err(ModelError::model(format!(
        "Embedding model not found. Checked:\n\
         - --model argument\n\
         - {} environment variable\n\
         - ~/.wordvec/models/default\n\
         \n\
         Pass --model <PATH> with a word2vec, GloVe or Model2Vec model.",
        MODEL_PATH_ENV
    )))
}

/// `~/.wordvec/models/default`, if a home directory is known
pub fn default_model_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(
        PathBuf::from(home)
            .join(".wordvec")
            .join("models")
            .join("default"),
    )
}
