//! HTTP outbound adapter.
//!
//! This module provides one reqwest implementation of both the
//! `AuthGateway` and `MediaGateway` ports.

mod dto;
mod http_gateway;

pub use http_gateway::{DEFAULT_REQUEST_TIMEOUT, GatewaySettings, HttpGateway};
