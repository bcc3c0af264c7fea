use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::chunker::{Chunk, ChunkerConfig, ChunkingStrategy, ModelLimitRegistry, TokenChunker};
use crate::config::Settings;
use crate::tokenizer::TextEncoder;
use crate::utils::error::{ApiError, ChunkError};

#[derive(Debug, Deserialize)]
pub struct ChunkRequest {
    pub text: String,
    pub tokenizer_name: Option<String>,
    pub chunk_size: Option<usize>,
    /// i64 so negative values reach config validation instead of a
    /// deserialization failure
    pub overlap: Option<i64>,
    pub strategy: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub chunks: Vec<Chunk>,
    pub tokenizer_name: String,
    pub total_tokens: usize,
}

pub async fn chunk_handler(
    Extension(encoder): Extension<Arc<dyn TextEncoder>>,
    Extension(registry): Extension<Arc<ModelLimitRegistry>>,
    Extension(settings): Extension<Arc<Settings>>,
    Json(request): Json<ChunkRequest>,
) -> Result<Json<ChunkResponse>, ApiError> {
    let tokenizer_name = request
        .tokenizer_name
        .unwrap_or_else(|| settings.chunker.default_tokenizer.clone());
    let chunk_size = request.chunk_size.or(settings.chunker.default_chunk_size);

    info!(
        "Chunk request: tokenizer={}, {} chars, chunk_size={:?}, overlap={:?}",
        tokenizer_name,
        request.text.len(),
        chunk_size,
        request.overlap
    );

    let overlap = match request.overlap {
        Some(requested) if requested < 0 => {
            return Err(ChunkError::InvalidConfig(format!(
                "overlap ({}) must be non-negative",
                requested
            ))
            .into());
        }
        Some(requested) => requested as usize,
        None => settings.chunker.default_overlap,
    };

    let strategy = match request.strategy.as_deref() {
        Some(name) => name.parse::<ChunkingStrategy>()?,
        None => ChunkingStrategy::Fixed,
    };

    let config = ChunkerConfig::new(
        strategy,
        chunk_size,
        overlap,
        Some(tokenizer_name.clone()),
        &registry,
    )?;

    let tokenized = encoder
        .encode(&tokenizer_name, &request.text)
        .await
        .map_err(|e| ApiError::TokenizerError(e.to_string()))?;

    let result = TokenChunker::new(config).chunk(&request.text, &tokenized)?;

    Ok(Json(ChunkResponse {
        chunks: result.chunks,
        tokenizer_name: result.model_id,
        total_tokens: result.total_tokens,
    }))
}
