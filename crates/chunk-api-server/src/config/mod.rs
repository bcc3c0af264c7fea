pub mod settings;

pub use settings::{ChunkerSettings, ServerConfig, Settings};
