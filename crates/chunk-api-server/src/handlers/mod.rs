pub mod chunk;
pub mod health;
