//! Client library for the Livestock SPV investment platform.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities,
//! validation, and the services that drive the session and submission
//! flows; [`outbound`] provides the HTTP gateway and file-backed session
//! store adapters; [`inbound`] is the CLI surface consuming the domain
//! through its ports.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
