//! Process bootstrap helpers that run before any subsystem starts.
//!
//! - **logger** — tracing subscriber setup (stderr + optional log file).

pub mod logger;
