use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub chunker: ChunkerSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChunkerSettings {
    /// Tokenizer used when a request does not name one
    pub default_tokenizer: String,
    /// Chunk size when a request does not give one; unset means the
    /// model's registry ceiling
    #[serde(default)]
    pub default_chunk_size: Option<usize>,
    /// Overlap when a request does not give one
    #[serde(default)]
    pub default_overlap: usize,
    /// Extra model token limits merged over the built-in registry
    #[serde(default)]
    pub model_limits: HashMap<String, usize>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/settings").required(true))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}
