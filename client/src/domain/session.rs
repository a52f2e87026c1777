//! Authentication session store.
//!
//! One [`SessionStore`] exists per application run. It is created in the
//! `Booting` phase, probes the remote session exactly once through
//! [`SessionStore::bootstrap`], and from then on changes only through
//! [`SessionStore::login`] and [`SessionStore::logout`]. Dropping the store
//! ends its lifecycle; subscribers observe the channel closing.
//!
//! ## Race policy
//! Explicit operations outrank the bootstrap probe. Every committed login or
//! logout advances an auth epoch, and the probe only applies its user when the
//! epoch has not moved since the probe started. A bootstrap that starts after
//! the session was settled explicitly does not probe at all. A sign-in
//! response is likewise dropped when the epoch moved while it was in flight,
//! so a sign-out issued mid-request sticks. `loading` still settles to
//! `false` once, on whichever event settles the session first.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::auth::{LoginCredentials, Registration};
use super::error::{
    AuthError, LOGIN_FALLBACK_MESSAGE, REGISTER_FALLBACK_MESSAGE, SUPERSEDED_MESSAGE,
};
use super::ports::AuthGateway;
use super::user::{Role, User};

/// Notice shown on the sign-in form after a successful registration.
pub const REGISTRATION_NOTICE: &str = "Registration successful! Please sign in.";

/// Coarse session phase derived from [`SessionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// The bootstrap probe has not settled; the user must not be trusted.
    Booting,
    /// Nobody is signed in.
    Anonymous,
    /// A user is signed in.
    Authenticated(User),
}

/// Snapshot of the session published to consumers.
///
/// ## Invariants
/// - While `loading` is true, `user` is absent and must not be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    loading: bool,
}

impl SessionState {
    /// The state every store starts in.
    pub const fn booting() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Settled with nobody signed in.
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// Settled with `user` signed in.
    pub const fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// Signed-in user, once settled.
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the bootstrap probe is still pending.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Role of the signed-in user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::role)
    }

    /// Whether a creator is signed in.
    pub fn is_creator(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_creator)
    }

    /// Phase view of the snapshot.
    pub fn phase(&self) -> SessionPhase {
        match (&self.user, self.loading) {
            (_, true) => SessionPhase::Booting,
            (None, false) => SessionPhase::Anonymous,
            (Some(user), false) => SessionPhase::Authenticated(user.clone()),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::booting()
    }
}

/// Result of a successful account creation.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationReceipt {
    /// Notice for the sign-in form.
    pub notice: &'static str,
    /// Payload returned by the server.
    pub payload: Value,
}

#[derive(Debug, Default)]
struct Control {
    auth_epoch: u64,
    bootstrap_started: bool,
}

/// Single source of truth for "who is signed in".
///
/// Share it by `Arc`; every method takes `&self`.
pub struct SessionStore<G> {
    gateway: Arc<G>,
    state: watch::Sender<SessionState>,
    control: Mutex<Control>,
}

impl<G> SessionStore<G>
where
    G: AuthGateway,
{
    /// Create a store in the `Booting` phase. Call [`SessionStore::bootstrap`]
    /// once to settle it.
    pub fn new(gateway: Arc<G>) -> Self {
        let (state, _) = watch::channel(SessionState::booting());
        Self {
            gateway,
            state,
            control: Mutex::new(Control::default()),
        }
    }

    /// Create a store and run its bootstrap probe.
    pub async fn start(gateway: Arc<G>) -> Self {
        let store = Self::new(gateway);
        store.bootstrap().await;
        store
    }

    /// Current snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Probe the remote session and settle the store.
    ///
    /// Runs at most once per store; later calls return the current snapshot
    /// without probing. No probe is sent when a sign-in or sign-out has
    /// already settled the session. Any failure, including "no session", settles to
    /// anonymous and is never surfaced.
    pub async fn bootstrap(&self) -> SessionState {
        let epoch = {
            let mut control = self.control();
            if control.bootstrap_started {
                return self.state();
            }
            control.bootstrap_started = true;
            if !self.state.borrow().is_loading() {
                // An explicit sign-in or sign-out already settled the session.
                debug!("bootstrap probe skipped; session already settled");
                return self.state();
            }
            control.auth_epoch
        };

        let probe = self.gateway.current_user().await;

        let control = self.control();
        let superseded = control.auth_epoch != epoch;
        match probe {
            Ok(user) if !superseded => {
                info!(user_id = %user.id(), role = %user.role(), "session restored");
                self.state.send_replace(SessionState::authenticated(user));
            }
            Ok(_) => {
                debug!("bootstrap probe superseded by an explicit sign-in or sign-out");
                self.settle();
            }
            Err(error) => {
                debug!(error = %error, superseded, "no active session");
                if superseded {
                    self.settle();
                } else {
                    self.state.send_replace(SessionState::anonymous());
                }
            }
        }
        drop(control);
        self.state()
    }

    /// Sign in with raw form input.
    ///
    /// On failure the previous state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Invalid`] when the input fails validation (no
    /// request is sent), [`AuthError::Superseded`] when another sign-in or a
    /// sign-out committed while the request was in flight, otherwise the
    /// folded gateway failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let epoch = self.control().auth_epoch;
        let user = self.gateway.login(&credentials).await.map_err(|error| {
            debug!(error = %error, "sign-in rejected");
            AuthError::from_gateway(&error, LOGIN_FALLBACK_MESSAGE)
        })?;

        let mut control = self.control();
        if control.auth_epoch != epoch {
            drop(control);
            debug!(user_id = %user.id(), "sign-in superseded by a later session change");
            return Err(AuthError::Superseded {
                message: SUPERSEDED_MESSAGE.to_owned(),
            });
        }
        control.auth_epoch = control.auth_epoch.wrapping_add(1);
        self.state
            .send_replace(SessionState::authenticated(user.clone()));
        drop(control);
        info!(user_id = %user.id(), role = %user.role(), "signed in");
        Ok(user)
    }

    /// Create an account. The local session is never changed; callers route
    /// the user to sign in afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Invalid`] for bad input and the folded gateway
    /// failure for server-side rejections such as a duplicate email.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Option<Role>,
    ) -> Result<RegistrationReceipt, AuthError> {
        let registration = Registration::try_new(email, password, name, role)?;
        let payload = self
            .gateway
            .register(&registration)
            .await
            .map_err(|error| {
                debug!(error = %error, "registration rejected");
                AuthError::from_gateway(&error, REGISTER_FALLBACK_MESSAGE)
            })?;
        info!(role = %registration.role(), "account registered");
        Ok(RegistrationReceipt {
            notice: REGISTRATION_NOTICE,
            payload,
        })
    }

    /// Sign out. The local user is cleared before the remote revocation is
    /// attempted, and a failed revocation is only logged.
    pub async fn logout(&self) {
        {
            let mut control = self.control();
            control.auth_epoch = control.auth_epoch.wrapping_add(1);
            self.state.send_replace(SessionState::anonymous());
        }
        info!("signed out");

        if let Err(error) = self.gateway.logout().await {
            warn!(error = %error, "remote session revocation failed");
        }
    }

    fn settle(&self) {
        self.state.send_if_modified(|state| {
            if state.loading {
                state.loading = false;
                true
            } else {
                false
            }
        });
    }

    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
