//! Sign-in and sign-up payloads.
//!
//! Values are validated locally so obviously bad input never reaches the
//! network. Passwords are held in [`Zeroizing`] buffers.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::user::Role;

/// Minimum password length accepted when creating an account.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Local validation failures for authentication payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN_LEN`].
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Display name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
}

fn normalise_email(email: &str) -> Result<String, CredentialsValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    Ok(trimmed.to_owned())
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty; whitespace is preserved as typed.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form input.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = normalise_email(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated account-creation request.
///
/// ## Invariants
/// - `email` and `name` are trimmed and non-empty.
/// - `password` has at least [`PASSWORD_MIN_LEN`] characters.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    email: String,
    password: Zeroizing<String>,
    name: String,
    role: Role,
}

impl Registration {
    /// Validate raw form input. A missing role registers a consumer.
    pub fn try_new(
        email: &str,
        password: &str,
        name: &str,
        role: Option<Role>,
    ) -> Result<Self, CredentialsValidationError> {
        let email = normalise_email(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            name: name.to_owned(),
            role: role.unwrap_or_default(),
        })
    }

    /// Account email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Requested account role.
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}
