//! TF-IDF vectorizer for the URL pipeline
//!
//! The vectorizer is a fitted artifact loaded from disk: a vocabulary
//! mapping terms to feature columns plus per-term inverse document
//! frequencies. Fitting happens offline; this module only applies the
//! transform.

use phishguard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// How raw text is split into terms before lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Analyzer {
    /// Character n-grams in the configured range (URL substrings)
    Char,
    /// Word tokens split on non-alphanumeric characters
    Word,
}

/// Serialized form of a fitted vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub analyzer: Analyzer,

    /// Inclusive n-gram size range for the char analyzer
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default = "default_lowercase")]
    pub lowercase: bool,

    /// Term -> feature column
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature column
    pub idf: Vec<f32>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 3)
}

fn default_lowercase() -> bool {
    true
}

/// A fitted TF-IDF vectorizer paired 1:1 with a linear model.
///
/// Terms absent from the vocabulary are ignored, so any input (including
/// the empty string) transforms to a valid, possibly all-zero, feature
/// vector rather than an error.
pub struct UrlVectorizer {
    analyzer: Analyzer,
    ngram_range: (usize, usize),
    lowercase: bool,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl std::fmt::Debug for UrlVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlVectorizer")
            .field("analyzer", &self.analyzer)
            .field("ngram_range", &self.ngram_range)
            .field("vocabulary_size", &self.vocabulary.len())
            .finish()
    }
}

impl UrlVectorizer {
    /// Validate and take ownership of a deserialized artifact
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let VectorizerArtifact {
            analyzer,
            ngram_range,
            lowercase,
            vocabulary,
            idf,
        } = artifact;

        if ngram_range.0 == 0 || ngram_range.0 > ngram_range.1 {
            return Err(Error::artifact(
                "url vectorizer",
                format!(
                    "invalid ngram range [{}, {}]",
                    ngram_range.0, ngram_range.1
                ),
            ));
        }

        if idf.len() != vocabulary.len() {
            return Err(Error::artifact(
                "url vectorizer",
                format!(
                    "idf length {} does not match vocabulary size {}",
                    idf.len(),
                    vocabulary.len()
                ),
            ));
        }

        if let Some(out_of_range) = vocabulary.values().find(|&&idx| idx >= idf.len()) {
            return Err(Error::artifact(
                "url vectorizer",
                format!(
                    "vocabulary index {out_of_range} out of range for {} features",
                    idf.len()
                ),
            ));
        }

        Ok(Self {
            analyzer,
            ngram_range,
            lowercase,
            vocabulary,
            idf,
        })
    }

    /// Load a fitted vectorizer from a JSON artifact on disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::artifact("url vectorizer", format!("{}: {e}", path.display())))?;
        let artifact: VectorizerArtifact = serde_json::from_str(&content)
            .map_err(|e| Error::artifact("url vectorizer", format!("{}: {e}", path.display())))?;
        Self::from_artifact(artifact)
    }

    /// Transform text into sparse TF-IDF features: (column, weight) pairs
    /// sorted by column, L2-normalized.
    pub fn transform(&self, text: &str) -> Vec<(usize, f32)> {
        let normalized;
        let text = if self.lowercase {
            normalized = text.to_lowercase();
            &normalized
        } else {
            text
        };

        let mut counts: HashMap<usize, f32> = HashMap::new();
        match self.analyzer {
            Analyzer::Char => {
                let chars: Vec<char> = text.chars().collect();
                let (lo, hi) = self.ngram_range;
                for n in lo..=hi {
                    if chars.len() < n {
                        break;
                    }
                    for window in chars.windows(n) {
                        let gram: String = window.iter().collect();
                        if let Some(&idx) = self.vocabulary.get(gram.as_str()) {
                            *counts.entry(idx).or_insert(0.0) += 1.0;
                        }
                    }
                }
            }
            Analyzer::Word => {
                let tokens = text
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|t| !t.is_empty());
                for token in tokens {
                    if let Some(&idx) = self.vocabulary.get(token) {
                        *counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
            }
        }

        let mut features: Vec<(usize, f32)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        // Sorted iteration keeps downstream float sums reproducible.
        features.sort_unstable_by_key(|&(idx, _)| idx);

        let norm: f32 = features.iter().map(|&(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut features {
                *v /= norm;
            }
        }

        features
    }

    /// Number of feature columns the paired model must expect
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }
}
