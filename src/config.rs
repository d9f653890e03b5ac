//! Comparison configuration.
//!
//! Configuration is plain data that can be built in code or read from TOML:
//!
//! ```toml
//! [align]
//! similarity_threshold = 0.5
//! window_radius = 3
//!
//! [policy]
//! min_non_empty = 2
//! max_documents = 10
//! ```
//!
//! Every field is optional; missing fields keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::align::AlignConfig;
use crate::errors::{CompareError, CompareResult};
use crate::normalize::Document;

/// Caller-level limits on the documents handed to a comparison.
///
/// The engine accepts any number of documents; a policy lets an
/// interactive caller reject input before any work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPolicy {
    /// Minimum number of documents with non-whitespace content.
    pub min_non_empty: usize,
    /// Maximum number of documents, if bounded.
    pub max_documents: Option<usize>,
}

impl InputPolicy {
    /// No limits.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// At least two documents with content, at most ten documents.
    pub fn interactive() -> Self {
        Self {
            min_non_empty: 2,
            max_documents: Some(10),
        }
    }

    /// Check the prepared documents against the policy.
    pub fn check(&self, documents: &[Document]) -> CompareResult<()> {
        if let Some(limit) = self.max_documents {
            if documents.len() > limit {
                return Err(CompareError::TooManyDocuments {
                    found: documents.len(),
                    limit,
                });
            }
        }

        let non_empty = documents.iter().filter(|doc| !doc.is_blank()).count();
        if non_empty < self.min_non_empty {
            return Err(CompareError::TooFewDocuments {
                found: non_empty,
                required: self.min_non_empty,
            });
        }

        Ok(())
    }
}

/// Full configuration of a [`Comparator`](crate::Comparator).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub align: AlignConfig,
    pub policy: InputPolicy,
}

impl CompareConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(content: &str) -> CompareResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CompareError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. A missing file yields the default.
    pub fn load(path: &Path) -> CompareResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| CompareError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject a similarity threshold outside `[0.0, 1.0]`.
    pub fn validate(&self) -> CompareResult<()> {
        let threshold = self.align.similarity_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(CompareError::Config {
                message: format!(
                    "similarity_threshold must be within 0.0..=1.0, got {}",
                    threshold
                ),
            });
        }
        Ok(())
    }
}
