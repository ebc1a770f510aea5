//! Model2Vec static embeddings
//!
//! A Model2Vec model is a directory holding the token embedding matrix
//! (`model.safetensors`) and the tokenizer vocabulary (`tokenizer.json`).
//! Each vocabulary token becomes one term of the keyed table.

use safetensors::{Dtype, SafeTensors};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ModelError, Result};
use crate::vectors::KeyedVectors;

pub const WEIGHTS_FILE: &str = "model.safetensors";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Model2Vec loading configuration
#[derive(Debug, Clone)]
pub(crate) struct Model2VecConfig {
    /// Name of the embedding tensor (default: "embeddings")
    pub tensor_name: String,
    /// Drop tokens flagged as special in tokenizer.json (default: true)
    pub skip_special_tokens: bool,
}

impl Default for Model2VecConfig {
    fn default() -> Self {
        Self {
            tensor_name: "embeddings".to_string(),
            skip_special_tokens: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenizerFile {
    model: TokenizerModel,
    #[serde(default)]
    added_tokens: Vec<AddedToken>,
}

#[derive(Debug, Deserialize)]
struct TokenizerModel {
    vocab: Vocab,
}

/// WordPiece/BPE store `token -> id`; Unigram stores `[token, score]` by id
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Vocab {
    Map(HashMap<String, usize>),
    List(Vec<(String, f64)>),
}

#[derive(Debug, Deserialize)]
struct AddedToken {
    content: String,
    #[serde(default)]
    special: bool,
}

/// Load Model2Vec from a local directory
///
/// Required files in the directory:
/// - model.safetensors
/// - tokenizer.json
pub fn from_pretrained(model_path: &Path) -> Result<KeyedVectors> {
    from_pretrained_with_config(model_path, &Model2VecConfig::default())
}

/// Load Model2Vec with custom configuration
pub(crate) fn from_pretrained_with_config(
    model_path: &Path,
    config: &Model2VecConfig,
) -> Result<KeyedVectors> {
    let weights_path = model_path.join(WEIGHTS_FILE);
    let tokenizer_path = model_path.join(TOKENIZER_FILE);
    for required in [&weights_path, &tokenizer_path] {
        if !required.exists() {
            return Err(ModelError::model(format!(
                "Model2Vec file not found at: {}",
                required.display()
            )));
        }
    }

    log::info!("Loading Model2Vec from: {}", model_path.display());

    let tokenizer: TokenizerFile = serde_json::from_slice(&std::fs::read(&tokenizer_path)?)?;
    let bytes = std::fs::read(&weights_path)?;
    let tensors = SafeTensors::deserialize(&bytes)?;
    let view = tensors.tensor(&config.tensor_name)?;

    if view.dtype() != Dtype::F32 {
        return Err(ModelError::model(format!(
            "Unsupported embedding dtype {:?}, expected F32",
            view.dtype()
        )));
    }
    let (rows, dimension) = match view.shape() {
        [rows, dimension] => (*rows, *dimension),
        other => {
            return Err(ModelError::model(format!(
                "Expected a 2-d embedding matrix, got shape {:?}",
                other
            )))
        }
    };

    let special: Vec<&str> = if config.skip_special_tokens {
        tokenizer
            .added_tokens
            .iter()
            .filter(|t| t.special)
            .map(|t| t.content.as_str())
            .collect()
    } else {
        Vec::new()
    };

    let mut by_id: Vec<Option<String>> = vec![None; rows];
    let tokens: Vec<(String, usize)> = match tokenizer.model.vocab {
        Vocab::Map(map) => map.into_iter().collect(),
        Vocab::List(list) => list
            .into_iter()
            .enumerate()
            .map(|(id, (token, _))| (token, id))
            .collect(),
    };
    for (token, id) in tokens {
        if id >= rows {
            return Err(ModelError::model(format!(
                "Token '{}' has id {} but the matrix has {} rows",
                token, id, rows
            )));
        }
        if !special.contains(&token.as_str()) {
            by_id[id] = Some(token);
        }
    }

    let data = view.data();
    let row_bytes = dimension * 4;
    let mut table = KeyedVectors::with_capacity(dimension, rows);
    let mut vector = vec![0.0_f32; dimension];
    for (id, token) in by_id.into_iter().enumerate() {
        let Some(token) = token else { continue };
        let raw = &data[id * row_bytes..(id + 1) * row_bytes];
        for (value, chunk) in vector.iter_mut().zip(raw.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        table.push(token, &vector, id + 1)?;
    }

    if table.is_empty() {
        return Err(ModelError::EmptyVocabulary);
    }

    log::info!(
        "Loaded Model2Vec ({} tokens, {}d, {} special skipped)",
        table.len(),
        dimension,
        special.len()
    );
    Ok(table)
}
