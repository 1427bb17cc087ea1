//! Subsystem modules for Courtside.

pub mod agents;
pub mod comms;
pub mod memory;
pub mod runtime;
