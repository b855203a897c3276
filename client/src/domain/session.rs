//! Session, credential, and profile types.
//!
//! A [`Session`] owns both the auth token and the user profile, so the
//! "token without user" state is unrepresentable; absence of a session is
//! `Option<Session>` everywhere. Constructors validate string inputs before
//! services or adapters see them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroizing;

/// Validation errors raised by session type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValidationError {
    /// Token was empty or contained surrounding whitespace.
    InvalidToken,
}

impl fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => {
                write!(f, "auth token must be non-empty without surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// Opaque bearer token issued by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthToken(String);

impl AuthToken {
    /// Validate and construct a token from borrowed input.
    pub fn new(token: impl Into<String>) -> Result<Self, SessionValidationError> {
        let raw = token.into();
        if raw.is_empty() || raw.trim() != raw {
            return Err(SessionValidationError::InvalidToken);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for AuthToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for AuthToken {
    type Error = SessionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Server-described investor profile.
///
/// Only `full_name` is read by the client; every other field the platform
/// supplies is preserved verbatim so a save/load round-trip loses nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Name shown in the signed-in banner.
    #[serde(default)]
    pub full_name: String,
    /// Remaining server-supplied fields, kept opaque.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Build a profile carrying only a display name.
    pub fn named(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            extra: Map::new(),
        }
    }
}

/// The signed-in state: a token and the profile it belongs to.
///
/// ## Invariants
/// - Token and profile are created and destroyed together; there is no
///   representation of one without the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: AuthToken,
    user: UserProfile,
}

impl Session {
    /// Pair a token with the profile it authenticates.
    pub fn new(token: AuthToken, user: UserProfile) -> Self {
        Self { token, user }
    }

    /// Bearer token for authenticated requests.
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Profile of the signed-in investor.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }
}

/// Validation errors raised by [`LoginCredentials::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used to sign in.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Details supplied when creating an investor account.
///
/// The platform signs new accounts in when it can, returning a token and
/// profile alongside the success envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    full_name: String,
    email: String,
    password: Zeroizing<String>,
    phone: Option<String>,
}

impl RegistrationForm {
    /// Construct a registration form from raw inputs.
    pub fn try_from_parts(
        full_name: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> Result<Self, LoginValidationError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        Ok(Self {
            full_name: full_name.trim().to_owned(),
            email: credentials.email,
            password: credentials.password,
            phone: phone.map(str::trim).filter(|p| !p.is_empty()).map(str::to_owned),
        })
    }

    /// Name the account will display.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Email address for the new account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password for the new account.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Optional contact phone number.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}
