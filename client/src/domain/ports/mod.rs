//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod gateway_error;
mod media_gateway;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::AuthGateway;
pub use gateway_error::GatewayError;
#[cfg(test)]
pub use media_gateway::MockMediaGateway;
pub use media_gateway::MediaGateway;
