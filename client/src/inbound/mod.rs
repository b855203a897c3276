//! Inbound surfaces that drive the domain services.
//!
//! The command-line interface is the only inbound adapter: argument types,
//! console implementations of the interactive ports, and bridges from CLI
//! enums to domain enums.

pub mod cli;
