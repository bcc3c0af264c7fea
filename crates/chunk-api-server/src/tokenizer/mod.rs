pub mod provider;

pub use provider::HfTokenizerProvider;

use anyhow::Result;
use async_trait::async_trait;

/// Output of a tokenizer encode call, consumed read-only by the chunker.
#[derive(Debug, Clone, Default)]
pub struct Tokenized {
    pub tokens: Vec<String>,
    pub ids: Vec<u32>,
    /// Per-token byte spans into the source text, when the tokenizer
    /// tracks them.
    pub offsets: Option<Vec<(usize, usize)>>,
}

/// Tokenization collaborator. The chunker never tokenizes text itself;
/// handlers depend on this seam so tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextEncoder: Send + Sync {
    async fn encode(&self, tokenizer_name: &str, text: &str) -> Result<Tokenized>;
}
