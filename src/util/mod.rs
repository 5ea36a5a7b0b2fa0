//! Shared utilities

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;

pub use errors::ConfigError;
