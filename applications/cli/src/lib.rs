//! ReMusic CLI Library
//!
//! Interactive shell over the ReMusic playback core, backed by an in-memory
//! store loaded from a TOML fixture.
//!
//! This library exposes the shell components for testing purposes.

pub mod config;
pub mod error;
pub mod fixture;
pub mod shell;

// Re-export commonly used types for convenience
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use fixture::Fixture;
pub use shell::{Reply, Shell};
