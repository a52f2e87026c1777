//! Scriptable `AuthGateway` double that records every call.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client::domain::ports::{AuthGateway, GatewayError};
use client::domain::{LoginCredentials, Registration, Role, User};
use serde_json::{Value, json};

/// A call observed by the double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    CurrentUser,
    Login { email: String },
    Register { email: String, role: Role },
    Logout,
}

#[derive(Debug)]
struct Script {
    current_user: Result<User, GatewayError>,
    login: Result<User, GatewayError>,
    logout: Result<(), GatewayError>,
}

/// Double answering from a script; cloning shares the script and the log.
#[derive(Debug, Clone)]
pub struct RecordingAuthGateway {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<AuthCall>>>,
}

impl Default for RecordingAuthGateway {
    fn default() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                current_user: Err(GatewayError::rejected(401_u16, "Not authenticated")),
                login: Err(GatewayError::rejected(401_u16, "Invalid email or password")),
                logout: Ok(()),
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl RecordingAuthGateway {
    pub fn with_session(&self, user: User) {
        self.script.lock().expect("script lock").current_user = Ok(user);
    }

    pub fn accept_login_as(&self, user: User) {
        self.script.lock().expect("script lock").login = Ok(user);
    }

    pub fn fail_logout(&self) {
        self.script.lock().expect("script lock").logout =
            Err(GatewayError::connectivity("connection reset"));
    }

    pub fn calls(&self) -> Vec<AuthCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: AuthCall) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl AuthGateway for RecordingAuthGateway {
    async fn current_user(&self) -> Result<User, GatewayError> {
        self.record(AuthCall::CurrentUser);
        self.script.lock().expect("script lock").current_user.clone()
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, GatewayError> {
        self.record(AuthCall::Login {
            email: credentials.email().to_owned(),
        });
        self.script.lock().expect("script lock").login.clone()
    }

    async fn register(&self, registration: &Registration) -> Result<Value, GatewayError> {
        self.record(AuthCall::Register {
            email: registration.email().to_owned(),
            role: registration.role(),
        });
        Ok(json!({ "id": 40, "name": registration.name(), "role": registration.role() }))
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.record(AuthCall::Logout);
        self.script.lock().expect("script lock").logout.clone()
    }
}
