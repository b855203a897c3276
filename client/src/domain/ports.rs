//! Ports connecting the domain to the outside world.
//!
//! Outbound adapters implement these traits; services depend on the traits
//! alone. Each port owns its error type so adapters never leak transport
//! details into the domain.

use async_trait::async_trait;
use thiserror::Error;

use super::application::{ApplicationForm, InvestmentOption, ValidationReport};
use super::error::ClientError;
use super::money::NairaAmount;
use super::portfolio::{ApplicationRecord, DashboardSummary, Investment};
use super::requests::ServiceRequest;
use super::session::{LoginCredentials, RegistrationForm, Session};

/// Failure reading from or writing to the persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("session store failure: {message}")]
pub struct SessionStoreError {
    /// Description of the underlying I/O or encoding failure.
    pub message: String,
}

impl SessionStoreError {
    /// Build an error from a displayable cause.
    pub fn with_context(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reported by the platform gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The platform answered 401 and the stored session has been cleared.
    #[error("authentication expired")]
    AuthExpired,
    /// Transport, decoding, or server-reported failure.
    #[error("{message}")]
    Request {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl GatewayError {
    /// Build a request failure from a displayable message.
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }
}

/// Durable storage for the signed-in session.
///
/// Implementations must treat a missing record as signed out rather than an
/// error, and `clear` must succeed when nothing is stored.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, if any.
    ///
    /// # Errors
    /// Returns [`SessionStoreError`] when the record exists but cannot be
    /// read.
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Persist `session`, replacing any previous record.
    ///
    /// # Errors
    /// Returns [`SessionStoreError`] when the record cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the stored session.
    ///
    /// # Errors
    /// Returns [`SessionStoreError`] when an existing record cannot be
    /// removed.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Client-side view of the platform API.
///
/// Authenticated calls read the bearer token from the adapter's session
/// store; a 401 response clears that store and surfaces
/// [`GatewayError::AuthExpired`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformGateway: Send + Sync {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    /// Returns [`GatewayError::Request`] when the platform rejects the
    /// credentials or the call fails.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, GatewayError>;

    /// Create an account, returning a session when the platform signs the
    /// new account in immediately.
    ///
    /// # Errors
    /// Returns [`GatewayError::Request`] when registration is rejected or
    /// the call fails.
    async fn register(&self, form: &RegistrationForm) -> Result<Option<Session>, GatewayError>;

    /// Submit a validated investment application.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the caller is signed out, the token is
    /// stale, or the platform rejects the application.
    async fn submit_application(
        &self,
        form: &ApplicationForm,
    ) -> Result<ApplicationRecord, GatewayError>;

    /// Fetch the aggregated dashboard figures.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the caller is signed out or the call
    /// fails.
    async fn dashboard_summary(&self) -> Result<DashboardSummary, GatewayError>;

    /// Fetch the caller's investments.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the caller is signed out or the call
    /// fails.
    async fn investments(&self) -> Result<Vec<Investment>, GatewayError>;

    /// Fetch the caller's submitted applications.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the caller is signed out or the call
    /// fails.
    async fn applications(&self) -> Result<Vec<ApplicationRecord>, GatewayError>;

    /// Submit a service request against the caller's account.
    ///
    /// # Errors
    /// Returns [`GatewayError`] when the caller is signed out or the
    /// platform rejects the request.
    async fn submit_service_request(&self, request: &ServiceRequest) -> Result<(), GatewayError>;
}

/// Source of the plan amount collected after validation.
///
/// `None` means the caller declined to give a figure; the pipeline falls
/// back to the option's advertised minimum.
#[cfg_attr(test, mockall::automock)]
pub trait AmountPrompt: Send + Sync {
    /// Ask for the amount appropriate to `option`.
    fn request_amount(&self, option: InvestmentOption) -> Option<NairaAmount>;
}

/// Observer notified whenever the signed-in session changes.
pub trait SessionWatch: Send + Sync {
    /// Called with the new state after every sign-in, sign-out, or restore.
    fn session_changed(&self, session: Option<&Session>);
}

/// Watch that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSessionWatch;

impl SessionWatch for NoOpSessionWatch {
    fn session_changed(&self, _session: Option<&Session>) {}
}

/// Observer notified as a submission moves through the pipeline.
pub trait SubmissionListener: Send + Sync {
    /// The draft failed local validation; nothing was sent.
    fn validation_failed(&self, report: &ValidationReport);

    /// Validation passed and the gateway call is about to start.
    fn submit_started(&self);

    /// The platform accepted the application.
    fn submit_succeeded(&self, record: &ApplicationRecord);

    /// The gateway call failed after validation passed.
    fn submit_failed(&self, error: &ClientError);
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSubmissionListener;

impl SubmissionListener for NoOpSubmissionListener {
    fn validation_failed(&self, _report: &ValidationReport) {}

    fn submit_started(&self) {}

    fn submit_succeeded(&self, _record: &ApplicationRecord) {}

    fn submit_failed(&self, _error: &ClientError) {}
}
