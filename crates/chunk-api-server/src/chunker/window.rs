use serde::Serialize;

use crate::chunker::config::{ChunkerConfig, ChunkingStrategy};
use crate::tokenizer::Tokenized;
use crate::utils::error::ChunkError;

/// One window of the token sequence.
///
/// `start_char`/`end_char` are byte offsets into the source text when the
/// tokenizer provided offsets; otherwise they are token-index bounds of the
/// window and `text` is the space-joined token strings (lossy with respect
/// to original whitespace).
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    pub text: String,
    pub tokens: Vec<String>,
    pub token_ids: Vec<u32>,
    pub start_char: usize,
    pub end_char: usize,
}

/// Result of a single chunking call.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkedResult {
    pub chunks: Vec<Chunk>,
    pub total_tokens: usize,
    pub model_id: String,
}

/// Fixed-window chunker over an already-tokenized sequence.
///
/// Stateless apart from its validated config; safe to share across tasks.
pub struct TokenChunker {
    config: ChunkerConfig,
}

impl TokenChunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Split tokenized input into ordered chunks per the configured strategy.
    pub fn chunk(&self, text: &str, input: &Tokenized) -> Result<ChunkedResult, ChunkError> {
        match self.config.strategy {
            ChunkingStrategy::Fixed => self.chunk_fixed(text, input),
        }
    }

    fn chunk_fixed(&self, text: &str, input: &Tokenized) -> Result<ChunkedResult, ChunkError> {
        let bounds = window_bounds(
            input.tokens.len(),
            self.config.max_tokens,
            self.config.overlap,
        )?;

        let chunks = bounds
            .into_iter()
            .map(|(start, end)| materialize(text, input, start, end))
            .collect();

        Ok(ChunkedResult {
            chunks,
            total_tokens: input.tokens.len(),
            model_id: self.config.model_id.clone().unwrap_or_default(),
        })
    }
}

/// Compute `[start, end)` window bounds over `n` tokens.
///
/// Without overlap the windows partition the sequence exactly. With overlap,
/// windows advance by `max_tokens - overlap` and the loop stops once an
/// emitted window reaches token n-1, so the final tokens are never dropped
/// and no empty trailing window is produced. Re-validates overlap since this
/// is callable independently of config construction.
fn window_bounds(
    n: usize,
    max_tokens: usize,
    overlap: usize,
) -> Result<Vec<(usize, usize)>, ChunkError> {
    if overlap >= max_tokens {
        return Err(ChunkError::InvalidConfig(format!(
            "overlap ({}) must be less than max_tokens ({})",
            overlap, max_tokens
        )));
    }

    let mut bounds = Vec::new();
    if n == 0 {
        return Ok(bounds);
    }

    if overlap == 0 {
        let mut i = 0;
        while i < n {
            bounds.push((i, (i + max_tokens).min(n)));
            i += max_tokens;
        }
        return Ok(bounds);
    }

    // Everything fits in one window; overlap is irrelevant.
    if n <= max_tokens {
        bounds.push((0, n));
        return Ok(bounds);
    }

    let stride = max_tokens - overlap;
    let mut i = 0;
    loop {
        bounds.push((i, (i + max_tokens).min(n)));
        if i + max_tokens >= n {
            break;
        }
        i += stride;
    }

    Ok(bounds)
}

fn materialize(text: &str, input: &Tokenized, start: usize, end: usize) -> Chunk {
    let tokens = input.tokens[start..end].to_vec();
    let token_ids = input.ids[start..end].to_vec();

    // Offsets are only usable when they parallel the token sequence.
    let offsets = input
        .offsets
        .as_ref()
        .filter(|offsets| offsets.len() == input.tokens.len());

    match offsets {
        Some(offsets) => {
            let start_char = offsets[start].0;
            let end_char = offsets[end - 1].1;
            Chunk {
                text: text[start_char..end_char].to_string(),
                tokens,
                token_ids,
                start_char,
                end_char,
            }
        }
        None => Chunk {
            text: tokens.join(" "),
            tokens,
            token_ids,
            start_char: start,
            end_char: end,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::registry::ModelLimitRegistry;

    fn tokenized(n: usize) -> Tokenized {
        Tokenized {
            tokens: (0..n).map(|i| format!("tok{}", i)).collect(),
            ids: (0..n as u32).collect(),
            offsets: None,
        }
    }

    fn chunker(max_tokens: usize, overlap: usize) -> TokenChunker {
        let config = ChunkerConfig::new(
            ChunkingStrategy::Fixed,
            Some(max_tokens),
            overlap,
            None,
            &ModelLimitRegistry::default(),
        )
        .unwrap();
        TokenChunker::new(config)
    }

    #[test]
    fn no_overlap_120_tokens_max_50_yields_50_50_20() {
        let input = tokenized(120);
        let result = chunker(50, 0).chunk("", &input).unwrap();

        let sizes: Vec<usize> = result.chunks.iter().map(|c| c.tokens.len()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert_eq!(result.total_tokens, 120);
    }

    #[test]
    fn overlap_120_tokens_max_50_overlap_10_yields_50_50_40() {
        let input = tokenized(120);
        let result = chunker(50, 10).chunk("", &input).unwrap();

        let sizes: Vec<usize> = result.chunks.iter().map(|c| c.tokens.len()).collect();
        assert_eq!(sizes, vec![50, 50, 40]);

        // windows start at 0, 40, 80 (stride 40)
        assert_eq!(result.chunks[0].tokens[0], "tok0");
        assert_eq!(result.chunks[1].tokens[0], "tok40");
        assert_eq!(result.chunks[2].tokens[0], "tok80");
    }

    #[test]
    fn no_overlap_partitions_cover_every_token_exactly_once() {
        for n in [1, 7, 49, 50, 51, 120, 500] {
            let input = tokenized(n);
            let result = chunker(50, 0).chunk("", &input).unwrap();

            let emitted: Vec<&String> = result
                .chunks
                .iter()
                .flat_map(|c| c.tokens.iter())
                .collect();
            assert_eq!(emitted.len(), n, "n={}", n);
            assert_eq!(emitted, input.tokens.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn overlap_chunks_cover_the_full_sequence() {
        for n in [1, 40, 50, 51, 120, 377] {
            let input = tokenized(n);
            let result = chunker(50, 10).chunk("", &input).unwrap();

            // more tokens emitted than exist (redundancy), never fewer
            let emitted: usize = result.chunks.iter().map(|c| c.tokens.len()).sum();
            assert!(emitted >= n, "n={}", n);

            // last chunk always ends at the final token
            let last = result.chunks.last().unwrap();
            assert_eq!(last.tokens.last().unwrap(), &format!("tok{}", n - 1));
        }
    }

    #[test]
    fn consecutive_chunks_share_exactly_overlap_tokens() {
        let input = tokenized(120);
        let result = chunker(50, 10).chunk("", &input).unwrap();

        for pair in result.chunks.windows(2) {
            let tail = &pair[0].tokens[pair[0].tokens.len() - 10..];
            let head = &pair[1].tokens[..10];
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn sequence_fitting_one_window_yields_single_chunk() {
        for n in [1, 25, 50] {
            let input = tokenized(n);
            let result = chunker(50, 10).chunk("", &input).unwrap();
            assert_eq!(result.chunks.len(), 1, "n={}", n);
            assert_eq!(result.chunks[0].tokens.len(), n);
        }
    }

    #[test]
    fn result_carries_the_configured_model_id() {
        let config = ChunkerConfig::new(
            ChunkingStrategy::Fixed,
            Some(50),
            0,
            Some("bert-base-uncased".to_string()),
            &ModelLimitRegistry::default(),
        )
        .unwrap();
        let result = TokenChunker::new(config).chunk("", &tokenized(10)).unwrap();

        assert_eq!(result.model_id, "bert-base-uncased");
    }

    #[test]
    fn empty_input_yields_zero_chunks() {
        let input = tokenized(0);
        assert!(chunker(50, 0).chunk("", &input).unwrap().chunks.is_empty());
        assert!(chunker(50, 10).chunk("", &input).unwrap().chunks.is_empty());
    }

    #[test]
    fn call_time_overlap_check_rejects_invalid_window() {
        // bypasses config validation on purpose
        let err = window_bounds(120, 50, 50).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidConfig(_)));
        let err = window_bounds(0, 50, 60).unwrap_err();
        assert!(matches!(err, ChunkError::InvalidConfig(_)));
    }

    #[test]
    fn without_offsets_text_is_space_joined_tokens() {
        let input = Tokenized {
            tokens: vec!["the".into(), "cat".into(), "sat".into()],
            ids: vec![1, 2, 3],
            offsets: None,
        };
        let result = chunker(2, 0).chunk("the cat sat", &input).unwrap();

        assert_eq!(result.chunks[0].text, "the cat");
        assert_eq!(result.chunks[1].text, "sat");
        // token-index bounds when no offsets exist
        assert_eq!(result.chunks[0].start_char, 0);
        assert_eq!(result.chunks[0].end_char, 2);
        assert_eq!(result.chunks[1].start_char, 2);
        assert_eq!(result.chunks[1].end_char, 3);
    }

    #[test]
    fn with_offsets_text_is_sliced_from_the_source() {
        let text = "the cat sat";
        let input = Tokenized {
            tokens: vec!["the".into(), "cat".into(), "sat".into()],
            ids: vec![1, 2, 3],
            offsets: Some(vec![(0, 3), (4, 7), (8, 11)]),
        };
        let result = chunker(2, 0).chunk(text, &input).unwrap();

        assert_eq!(result.chunks[0].text, "the cat");
        assert_eq!(result.chunks[0].start_char, 0);
        assert_eq!(result.chunks[0].end_char, 7);
        assert_eq!(result.chunks[1].text, "sat");
        assert_eq!(result.chunks[1].start_char, 8);
        assert_eq!(result.chunks[1].end_char, 11);
    }

    #[test]
    fn offsets_compose_with_overlap() {
        let text = "a bb ccc dddd";
        let input = Tokenized {
            tokens: vec!["a".into(), "bb".into(), "ccc".into(), "dddd".into()],
            ids: vec![1, 2, 3, 4],
            offsets: Some(vec![(0, 1), (2, 4), (5, 8), (9, 13)]),
        };
        let result = chunker(2, 1).chunk(text, &input).unwrap();

        // windows: [0,2) [1,3) [2,4) - each an exact slice of the source
        assert_eq!(result.chunks.len(), 3);
        assert_eq!(result.chunks[0].text, "a bb");
        assert_eq!(result.chunks[1].text, "bb ccc");
        assert_eq!(result.chunks[2].text, "ccc dddd");
        for chunk in &result.chunks {
            assert_eq!(&text[chunk.start_char..chunk.end_char], chunk.text);
        }
    }

    #[test]
    fn mismatched_offsets_fall_back_to_token_join() {
        let input = Tokenized {
            tokens: vec!["the".into(), "cat".into()],
            ids: vec![1, 2],
            offsets: Some(vec![(0, 3)]),
        };
        let result = chunker(2, 0).chunk("the cat", &input).unwrap();
        assert_eq!(result.chunks[0].text, "the cat");
    }
}
