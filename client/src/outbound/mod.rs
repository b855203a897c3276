//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.
//!
//! - **http**: reqwest-backed platform gateway
//! - **session_file**: cap-std file store for the signed-in session

pub mod http;
pub mod session_file;
