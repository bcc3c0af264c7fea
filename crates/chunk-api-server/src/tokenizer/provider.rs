use anyhow::{anyhow, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::{TextEncoder, Tokenized};

/// HuggingFace tokenizer provider.
///
/// Loads tokenizers by name via `Tokenizer::from_pretrained` (downloads on
/// first use) and caches them per process. Loading and encoding both run on
/// the blocking pool; the cached `Tokenizer` itself is safe to share.
pub struct HfTokenizerProvider {
    cache: DashMap<String, Arc<Tokenizer>>,
}

impl HfTokenizerProvider {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    async fn load(&self, name: &str) -> Result<Arc<Tokenizer>> {
        if let Some(tokenizer) = self.cache.get(name) {
            return Ok(tokenizer.clone());
        }

        info!("Loading tokenizer '{}'", name);
        let owned = name.to_string();
        let tokenizer = tokio::task::spawn_blocking(move || {
            Tokenizer::from_pretrained(&owned, None).map_err(|e| anyhow!("{}", e))
        })
        .await??;

        let tokenizer = Arc::new(tokenizer);
        self.cache.insert(name.to_string(), tokenizer.clone());
        Ok(tokenizer)
    }
}

impl Default for HfTokenizerProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextEncoder for HfTokenizerProvider {
    async fn encode(&self, tokenizer_name: &str, text: &str) -> Result<Tokenized> {
        let tokenizer = self.load(tokenizer_name).await?;

        debug!(
            "Encoding {} chars with tokenizer '{}'",
            text.len(),
            tokenizer_name
        );

        // No special tokens: chunk windows must map 1:1 onto source spans.
        let owned = text.to_string();
        let encoding = tokio::task::spawn_blocking(move || {
            tokenizer.encode(owned, false).map_err(|e| anyhow!("{}", e))
        })
        .await??;

        Ok(Tokenized {
            tokens: encoding.get_tokens().to_vec(),
            ids: encoding.get_ids().to_vec(),
            offsets: Some(encoding.get_offsets().to_vec()),
        })
    }
}
