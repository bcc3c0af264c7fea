pub mod config;
pub mod registry;
pub mod window;

pub use config::{ChunkerConfig, ChunkingStrategy};
pub use registry::{ModelLimitRegistry, DEFAULT_MAX_TOKENS};
pub use window::{Chunk, ChunkedResult, TokenChunker};
