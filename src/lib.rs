// Library root — exposes internals to the binary and integration tests.
// The binary entry point is src/main.rs.

pub mod bootstrap;
pub mod core;
pub mod llm;
pub mod subsystems;

pub use crate::bootstrap::logger;
pub use crate::core::{config, error};
