//! Driven port for the remote authentication endpoints.
//!
//! The session store talks to this port only, so its state machine can be
//! exercised with deterministic doubles instead of a live server.

use async_trait::async_trait;
use serde_json::Value;

use super::GatewayError;
use crate::domain::{LoginCredentials, Registration, User};

/// Remote authentication operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Probe the current session; fails when no session is active.
    async fn current_user(&self) -> Result<User, GatewayError>;

    /// Exchange credentials for a session and return its user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, GatewayError>;

    /// Create an account. The returned payload is passed through untouched.
    async fn register(&self, registration: &Registration) -> Result<Value, GatewayError>;

    /// Revoke the current session server-side.
    async fn logout(&self) -> Result<(), GatewayError>;
}
