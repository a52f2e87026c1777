//! Errors surfaced to the view layer.
//!
//! Gateway failures never escape the domain raw: each is folded into one of
//! these types, which always carry a message fit for display.

use thiserror::Error;

use super::auth::CredentialsValidationError;
use super::ports::GatewayError;

/// Message shown when a sign-in fails without a server explanation.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Failed to login. Please check your credentials.";
/// Message shown when a sign-up fails without a server explanation.
pub const REGISTER_FALLBACK_MESSAGE: &str = "Failed to register. Please try again.";
/// Message shown when a sign-in response arrives after a later sign-in or
/// sign-out already changed the session.
pub const SUPERSEDED_MESSAGE: &str = "Sign-in was cancelled by a newer session change.";
/// Message shown when content cannot be loaded because the API is unreachable.
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";

/// Failure of a sign-in or sign-up attempt, shown inline near the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Input failed local validation; nothing was sent.
    #[error("{message}")]
    Invalid {
        /// Display message.
        message: String,
    },
    /// The server rejected the credentials or the account details.
    #[error("{message}")]
    Rejected {
        /// Display message, the server's own when it sent one.
        message: String,
    },
    /// The server could not be reached or answered unusably.
    #[error("{message}")]
    Connectivity {
        /// Display message.
        message: String,
    },
    /// Another sign-in or a sign-out committed while this sign-in was in
    /// flight; its user was not applied.
    #[error("{message}")]
    Superseded {
        /// Display message.
        message: String,
    },
}

impl AuthError {
    /// Fold a gateway failure into an auth error, preferring the server's
    /// message. Unreachable servers get the generic connectivity message;
    /// other failures fall back to `fallback`.
    pub fn from_gateway(error: &GatewayError, fallback: &str) -> Self {
        if let Some(message) = error.server_message() {
            return Self::Rejected {
                message: message.to_owned(),
            };
        }
        match error {
            GatewayError::Rejected { .. } | GatewayError::NotFound { .. } => Self::Rejected {
                message: fallback.to_owned(),
            },
            GatewayError::Connectivity { .. } | GatewayError::Timeout { .. } => {
                Self::Connectivity {
                    message: CONNECTIVITY_MESSAGE.to_owned(),
                }
            }
            GatewayError::Decode { .. } | GatewayError::InvalidRequest { .. } => {
                Self::Connectivity {
                    message: fallback.to_owned(),
                }
            }
        }
    }

    /// Message to render next to the form.
    pub fn message(&self) -> &str {
        match self {
            Self::Invalid { message }
            | Self::Rejected { message }
            | Self::Connectivity { message }
            | Self::Superseded { message } => message.as_str(),
        }
    }

    /// Whether retrying unchanged input could succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}

impl From<CredentialsValidationError> for AuthError {
    fn from(value: CredentialsValidationError) -> Self {
        Self::Invalid {
            message: value.to_string(),
        }
    }
}

/// Failure to load remote content (a feed page, a detail record, a profile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Timeout or network failure; retrying may help.
    #[error("{message}")]
    Connectivity {
        /// Display message.
        message: String,
    },
    /// The server answered with an error or an unreadable payload.
    #[error("{message}")]
    Remote {
        /// Display message.
        message: String,
    },
}

/// Failure of a feed page fetch.
pub type FeedFetchError = LoadError;

impl LoadError {
    /// Whether retrying could succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Message to render.
    pub fn message(&self) -> &str {
        match self {
            Self::Connectivity { message } | Self::Remote { message } => message.as_str(),
        }
    }
}

impl From<GatewayError> for LoadError {
    fn from(value: GatewayError) -> Self {
        if value.is_connectivity() {
            return Self::Connectivity {
                message: CONNECTIVITY_MESSAGE.to_owned(),
            };
        }
        let message = value
            .server_message()
            .map_or_else(|| value.to_string(), str::to_owned);
        Self::Remote { message }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        GatewayError::rejected(401_u16, "Invalid email or password"),
        AuthError::Rejected { message: "Invalid email or password".to_owned() }
    )]
    #[case(
        GatewayError::rejected(401_u16, ""),
        AuthError::Rejected { message: LOGIN_FALLBACK_MESSAGE.to_owned() }
    )]
    #[case(
        GatewayError::timeout("deadline elapsed"),
        AuthError::Connectivity { message: CONNECTIVITY_MESSAGE.to_owned() }
    )]
    #[case(
        GatewayError::connectivity("connection refused"),
        AuthError::Connectivity { message: CONNECTIVITY_MESSAGE.to_owned() }
    )]
    #[case(
        GatewayError::decode("expected `user`"),
        AuthError::Connectivity { message: LOGIN_FALLBACK_MESSAGE.to_owned() }
    )]
    fn gateway_failures_become_displayable_auth_errors(
        #[case] error: GatewayError,
        #[case] expected: AuthError,
    ) {
        assert_eq!(AuthError::from_gateway(&error, LOGIN_FALLBACK_MESSAGE), expected);
    }

    #[test]
    fn validation_failures_are_invalid_auth_errors() {
        let err = AuthError::from(CredentialsValidationError::EmptyEmail);
        assert_eq!(err.message(), "email must not be empty");
        assert!(!err.is_retryable());
    }

    #[rstest]
    #[case(GatewayError::connectivity("refused"), true)]
    #[case(GatewayError::timeout("10s"), true)]
    #[case(GatewayError::rejected(500_u16, ""), false)]
    #[case(GatewayError::decode("eof"), false)]
    fn load_errors_keep_connectivity_distinct(#[case] error: GatewayError, #[case] retryable: bool) {
        assert_eq!(LoadError::from(error).is_retryable(), retryable);
    }

    #[test]
    fn connectivity_load_errors_use_generic_message() {
        let err = LoadError::from(GatewayError::timeout("operation timed out"));
        assert_eq!(err.message(), CONNECTIVITY_MESSAGE);
    }
}
