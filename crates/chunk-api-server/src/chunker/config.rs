use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chunker::registry::ModelLimitRegistry;
use crate::utils::error::ChunkError;

/// Chunking algorithm selector.
///
/// Fixed-size windowing is the only strategy today; the enum exists so
/// future strategies (sentence-boundary, semantic) slot into the same
/// configuration without restructuring validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategy {
    Fixed,
}

impl FromStr for ChunkingStrategy {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(ChunkingStrategy::Fixed),
            other => Err(ChunkError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkingStrategy::Fixed => write!(f, "fixed"),
        }
    }
}

/// Validated, immutable chunking configuration.
///
/// Invariants held after construction: `max_tokens > 0`,
/// `overlap < max_tokens`, `max_tokens <= model_max_tokens`.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    pub strategy: ChunkingStrategy,
    pub max_tokens: usize,
    pub overlap: usize,
    pub model_id: Option<String>,
    /// Ceiling resolved from the registry for `model_id`
    pub model_max_tokens: usize,
}

impl ChunkerConfig {
    /// Build a config, resolving `max_tokens` against the model's registry
    /// ceiling when not given explicitly.
    pub fn new(
        strategy: ChunkingStrategy,
        max_tokens: Option<usize>,
        overlap: usize,
        model_id: Option<String>,
        registry: &ModelLimitRegistry,
    ) -> Result<Self, ChunkError> {
        let model_max_tokens = registry.limit(model_id.as_deref());

        let max_tokens = match max_tokens {
            None => model_max_tokens,
            Some(0) => {
                return Err(ChunkError::InvalidConfig(
                    "max_tokens must be positive".to_string(),
                ))
            }
            Some(requested) if requested > model_max_tokens => {
                return Err(ChunkError::TokenLimitExceeded {
                    requested,
                    limit: model_max_tokens,
                    model: model_id.unwrap_or_else(|| "this model".to_string()),
                })
            }
            Some(requested) => requested,
        };

        if overlap >= max_tokens {
            return Err(ChunkError::InvalidConfig(format!(
                "overlap ({}) must be less than max_tokens ({})",
                overlap, max_tokens
            )));
        }

        Ok(Self {
            strategy,
            max_tokens,
            overlap,
            model_id,
            model_max_tokens,
        })
    }
}
