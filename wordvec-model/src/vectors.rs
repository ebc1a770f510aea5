//! Keyed vector table
//!
//! In-memory vocabulary → vector store. Rows are L2-normalised on insert so
//! every similarity below is a plain dot product.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::error::{ModelError, QueryError, QueryResult, Result};

/// Upper bound on rows reserved up front; headers can lie about the count
const MAX_RESERVED_ROWS: usize = 1 << 16;

/// A ranked `(term, score)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub term: String,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', {})", self.term, self.score)
    }
}

/// Vocabulary table backed by one flat row-major buffer
#[derive(Debug, Clone)]
pub struct KeyedVectors {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    data: Vec<f32>,
    dimension: usize,
}

impl KeyedVectors {
    /// Create an empty table for vectors of the given dimension.
    ///
    /// `capacity` is a hint; at most `MAX_RESERVED_ROWS` rows are reserved.
    pub fn with_capacity(dimension: usize, capacity: usize) -> Self {
        let rows = capacity.min(MAX_RESERVED_ROWS);
        let values = rows
            .checked_mul(dimension)
            .filter(|&n| n <= MAX_RESERVED_ROWS * 64)
            .unwrap_or(0);
        Self {
            terms: Vec::with_capacity(rows),
            index: HashMap::with_capacity(rows),
            data: Vec::with_capacity(values),
            dimension,
        }
    }

    /// Build a table from `(term, vector)` pairs
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut table: Option<Self> = None;
        for (line, (term, vector)) in entries.into_iter().enumerate() {
            let table = table.get_or_insert_with(|| Self::with_capacity(vector.len(), 0));
            table.push(term.into(), &vector, line + 1)?;
        }
        table.ok_or(ModelError::EmptyVocabulary)
    }

    /// Append a row, normalising it.
    ///
    /// Returns `false` when the term was already present (first row wins).
    pub fn push(&mut self, term: String, vector: &[f32], line: usize) -> Result<bool> {
        if vector.len() != self.dimension {
            return Err(ModelError::format(
                line,
                format!(
                    "expected {} components, found {}",
                    self.dimension,
                    vector.len()
                ),
            ));
        }
        if let Some(pos) = vector.iter().position(|x| !x.is_finite()) {
            return Err(ModelError::format(
                line,
                format!(
                    "non-finite component {} at position {} for '{}'",
                    vector[pos],
                    pos + 1,
                    term
                ),
            ));
        }
        if self.index.contains_key(&term) {
            log::debug!("Skipping duplicate term '{}' at line {}", term, line);
            return Ok(false);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            self.data.extend(vector.iter().map(|x| x / norm));
        } else {
            self.data.extend_from_slice(vector);
        }
        self.index.insert(term.clone(), self.terms.len());
        self.terms.push(term);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Terms in load order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Unit-length vector for a term
    pub fn get(&self, term: &str) -> Option<&[f32]> {
        self.index.get(term).map(|&i| self.row(i))
    }

    fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Resolve every term or report all missing ones, in input order
    fn lookup_all<'a>(&'a self, terms: &[&str]) -> QueryResult<Vec<&'a [f32]>> {
        let mut rows = Vec::with_capacity(terms.len());
        let mut missing = Vec::new();
        for term in terms {
            match self.get(term) {
                Some(row) => rows.push(row),
                None => missing.push(term.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(rows)
        } else {
            Err(QueryError::TermNotFound { terms: missing })
        }
    }

    /// Cosine similarity between two terms
    pub fn similarity(&self, a: &str, b: &str) -> QueryResult<f32> {
        let rows = self.lookup_all(&[a, b])?;
        Ok(dot(rows[0], rows[1]))
    }

    /// Rank the vocabulary against the normalised mean of `positive` minus
    /// `negative`, skipping the input terms themselves.
    pub fn most_similar(
        &self,
        positive: &[&str],
        negative: &[&str],
        top_n: usize,
    ) -> QueryResult<Vec<Neighbor>> {
        let mut all: Vec<&str> = positive.to_vec();
        all.extend_from_slice(negative);
        if all.is_empty() {
            return Err(QueryError::InsufficientInput {
                required: 1,
                given: 0,
            });
        }
        let rows = self.lookup_all(&all)?;

        let mut mean = vec![0.0_f32; self.dimension];
        for (i, row) in rows.iter().enumerate() {
            let weight = if i < positive.len() { 1.0 } else { -1.0 };
            for (m, x) in mean.iter_mut().zip(row.iter()) {
                *m += weight * x;
            }
        }
        normalize(&mut mean);

        let excluded: Vec<usize> = all.iter().filter_map(|t| self.index.get(*t).copied()).collect();
        let mut scored: Vec<(usize, f32)> = (0..self.len())
            .filter(|i| !excluded.contains(i))
            .map(|i| (i, dot(&mean, self.row(i))))
            .collect();

        let by_score = |a: &(usize, f32), b: &(usize, f32)| -> Ordering {
            b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
        };
        if top_n < scored.len() {
            if top_n == 0 {
                return Ok(Vec::new());
            }
            scored.select_nth_unstable_by(top_n - 1, by_score);
            scored.truncate(top_n);
        }
        scored.sort_by(by_score);

        Ok(scored
            .into_iter()
            .map(|(i, score)| Neighbor {
                term: self.terms[i].clone(),
                score,
            })
            .collect())
    }

    /// The term least similar to the centroid of the other terms.
    ///
    /// Ties go to the earliest term.
    pub fn doesnt_match(&self, terms: &[&str]) -> QueryResult<String> {
        if terms.len() < 2 {
            return Err(QueryError::InsufficientInput {
                required: 2,
                given: terms.len(),
            });
        }
        let rows = self.lookup_all(terms)?;

        let mut odd: Option<(usize, f32)> = None;
        for (i, row) in rows.iter().enumerate() {
            let mut centroid = vec![0.0_f32; self.dimension];
            for other in rows.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, r)| r) {
                for (c, x) in centroid.iter_mut().zip(other.iter()) {
                    *c += x;
                }
            }
            normalize(&mut centroid);
            let score = dot(row, &centroid);
            if odd.map_or(true, |(_, best)| score < best) {
                odd = Some((i, score));
            }
        }

        Ok(odd.map(|(i, _)| terms[i].to_string()).unwrap_or_default())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn royal_table() -> KeyedVectors {
        KeyedVectors::from_entries(vec![
            ("king", vec![0.9, 0.8, 0.1, 0.0]),
            ("queen", vec![0.8, 0.9, 0.1, 0.0]),
            ("prince", vec![0.85, 0.7, 0.2, 0.0]),
            ("man", vec![0.6, 0.1, 0.1, 0.1]),
            ("woman", vec![0.1, 0.6, 0.1, 0.1]),
            ("banana", vec![0.0, 0.05, 0.1, 0.95]),
            ("apple", vec![0.05, 0.0, 0.2, 0.9]),
        ])
        .unwrap()
    }

    #[test]
    fn test_rows_are_normalised() {
        let table = royal_table();
        let king = table.get("king").unwrap();
        let norm: f32 = king.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let table = KeyedVectors::from_entries(vec![("a", vec![0.0, 0.0]), ("b", vec![1.0, 0.0])])
            .unwrap();
        assert_eq!(table.similarity("a", "b").unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_format_error() {
        let err = KeyedVectors::from_entries(vec![("a", vec![1.0, 0.0]), ("b", vec![1.0])])
            .unwrap_err();
        match err {
            ModelError::Format { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_component_is_format_error() {
        let err = KeyedVectors::from_entries(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![f32::NAN, 1.0]),
        ])
        .unwrap_err();
        match err {
            ModelError::Format { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("non-finite"));
            }
            other => panic!("Expected format error, got {other:?}"),
        }

        let mut table = KeyedVectors::with_capacity(2, 1);
        assert!(table
            .push("c".to_string(), &[f32::INFINITY, 0.0], 7)
            .is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_with_capacity_ignores_oversized_hint() {
        let mut table = KeyedVectors::with_capacity(300, usize::MAX);
        assert!(table.is_empty());
        assert!(table.push("cat".to_string(), &[1.0; 300], 1).unwrap());

        let table = KeyedVectors::with_capacity(usize::MAX / 2, 4);
        assert_eq!(table.dimension(), usize::MAX / 2);
    }

    #[test]
    fn test_empty_entries_rejected() {
        let entries: Vec<(String, Vec<f32>)> = Vec::new();
        assert!(matches!(
            KeyedVectors::from_entries(entries),
            Err(ModelError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_duplicate_first_wins() {
        let table = KeyedVectors::from_entries(vec![
            ("a", vec![1.0, 0.0]),
            ("a", vec![0.0, 1.0]),
            ("b", vec![1.0, 0.0]),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!((table.similarity("a", "b").unwrap() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_similarity_symmetric() {
        let table = royal_table();
        let ab = table.similarity("king", "queen").unwrap();
        let ba = table.similarity("queen", "king").unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_missing_terms_all_reported() {
        let table = royal_table();
        let err = table.similarity("foo", "bar").unwrap_err();
        assert_eq!(
            err,
            QueryError::TermNotFound {
                terms: vec!["foo".to_string(), "bar".to_string()]
            }
        );
    }

    #[test]
    fn test_most_similar_sorted_and_excludes_query() {
        let table = royal_table();
        let hits = table.most_similar(&["king"], &[], 4).unwrap();
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|n| n.term != "king"));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(hits[0].term, "prince");
    }

    #[test]
    fn test_most_similar_caps_at_vocabulary() {
        let table = royal_table();
        let hits = table.most_similar(&["king"], &[], 100).unwrap();
        assert_eq!(hits.len(), table.len() - 1);
    }

    #[test]
    fn test_most_similar_zero_top_n() {
        let table = royal_table();
        assert!(table.most_similar(&["king"], &[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_most_similar_with_negative() {
        let table = royal_table();
        let hits = table.most_similar(&["king", "woman"], &["man"], 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].term, "queen");
    }

    #[test]
    fn test_doesnt_match_picks_outlier() {
        let table = royal_table();
        let odd = table
            .doesnt_match(&["king", "queen", "prince", "banana"])
            .unwrap();
        assert_eq!(odd, "banana");
    }

    #[test]
    fn test_doesnt_match_needs_two() {
        let table = royal_table();
        assert_eq!(
            table.doesnt_match(&["king"]).unwrap_err(),
            QueryError::InsufficientInput {
                required: 2,
                given: 1
            }
        );
    }

    #[test]
    fn test_doesnt_match_missing_term() {
        let table = royal_table();
        assert_eq!(
            table
                .doesnt_match(&["king", "xyzzy", "banana"])
                .unwrap_err(),
            QueryError::TermNotFound {
                terms: vec!["xyzzy".to_string()]
            }
        );
    }

    #[test]
    fn test_doesnt_match_tie_goes_to_first() {
        let table = KeyedVectors::from_entries(vec![
            ("left", vec![0.3, 0.4]),
            ("right", vec![0.3, 0.4]),
        ])
        .unwrap();
        assert_eq!(table.doesnt_match(&["right", "left"]).unwrap(), "right");
    }

    #[test]
    fn test_neighbor_display() {
        let n = Neighbor {
            term: "queen".to_string(),
            score: 0.5,
        };
        assert_eq!(n.to_string(), "('queen', 0.5)");
    }
}
