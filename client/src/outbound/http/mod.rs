//! HTTP outbound adapters.
//!
//! This module provides the reqwest implementation of the `PlatformGateway`
//! port together with the wire DTOs it decodes.

mod dto;
mod gateway;

pub use gateway::HttpPlatformGateway;
