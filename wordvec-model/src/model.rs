//! Model gateway
//!
//! `EmbeddingModel` is the loaded, read-only model handle. Its query methods
//! never panic on unknown input: missing terms come back as
//! [`QueryError::TermNotFound`] and nothing is computed.

use std::path::{Path, PathBuf};

use crate::embedding::ModelFormat;
use crate::error::{QueryResult, Result};
use crate::vectors::{KeyedVectors, Neighbor};

/// Number of completions returned by [`EmbeddingModel::vector_analogy`]
pub const ANALOGY_RESULTS: usize = 3;

/// A loaded word-embedding model
#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    vectors: KeyedVectors,
    source: PathBuf,
}

impl EmbeddingModel {
    /// Load a model from disk. `None` detects the format from the path.
    ///
    /// # Errors
    /// Returns error if the path cannot be read or the content is malformed.
    pub fn load(path: &Path, format: Option<ModelFormat>) -> Result<Self> {
        let format = format.unwrap_or_else(|| ModelFormat::detect(path));
        log::info!("Loading {} model: {}", format, path.display());

        let vectors = format.read(path)?;
        Ok(Self {
            vectors,
            source: path.to_path_buf(),
        })
    }

    /// Wrap an already built table
    pub fn from_vectors(vectors: KeyedVectors, source: impl Into<PathBuf>) -> Self {
        Self {
            vectors,
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn vectors(&self) -> &KeyedVectors {
        &self.vectors
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectors.len()
    }

    pub fn dimension(&self) -> usize {
        self.vectors.dimension()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vectors.contains(term)
    }

    /// Cosine similarity as a percentage, clamped to [0, 100]
    pub fn pair_similarity(&self, term_a: &str, term_b: &str) -> QueryResult<f32> {
        let similarity = self.vectors.similarity(term_a, term_b)?;
        Ok((similarity * 100.0).clamp(0.0, 100.0))
    }

    /// The `top_n` nearest terms, best first, without `term` itself
    pub fn most_similar(&self, term: &str, top_n: usize) -> QueryResult<Vec<Neighbor>> {
        self.vectors.most_similar(&[term], &[], top_n)
    }

    /// Best completions of `term_a - term_b + term_c`
    pub fn vector_analogy(
        &self,
        term_a: &str,
        term_b: &str,
        term_c: &str,
    ) -> QueryResult<Vec<Neighbor>> {
        self.vectors
            .most_similar(&[term_a, term_c], &[term_b], ANALOGY_RESULTS)
    }

    /// The supplied term that fits least with the others
    pub fn odd_one_out<S: AsRef<str>>(&self, terms: &[S]) -> QueryResult<String> {
        let terms: Vec<&str> = terms.iter().map(AsRef::as_ref).collect();
        self.vectors.doesnt_match(&terms)
    }
}
