pub mod chunker;
pub mod config;
pub mod handlers;
pub mod tokenizer;
pub mod utils;
