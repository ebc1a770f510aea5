//! Embedding model readers
//!
//! word2vec/GloVe text and binary files plus Model2Vec directories.

mod discovery;
pub mod model2vec;
pub mod word2vec;

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::vectors::KeyedVectors;

pub use discovery::{default_model_path, find_model_path, MODEL_PATH_ENV};

/// On-disk layout of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Word2VecText,
    Word2VecBinary,
    Model2Vec,
}

impl ModelFormat {
    /// Guess the format: directories are Model2Vec, `.bin` files are
    /// binary word2vec, everything else is read as text.
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            Self::Model2Vec
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
        {
            Self::Word2VecBinary
        } else {
            Self::Word2VecText
        }
    }

    pub fn read(self, path: &Path) -> Result<KeyedVectors> {
        match self {
            Self::Word2VecText => word2vec::load_text(path),
            Self::Word2VecBinary => word2vec::load_binary(path),
            Self::Model2Vec => model2vec::from_pretrained(path),
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word2VecText => write!(f, "word2vec text"),
            Self::Word2VecBinary => write!(f, "word2vec binary"),
            Self::Model2Vec => write!(f, "Model2Vec"),
        }
    }
}
