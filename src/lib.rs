pub mod assistant;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod llm;
pub mod registry;
pub mod terminal;
pub mod utils;

pub use error::{VoxError, VoxResult};
