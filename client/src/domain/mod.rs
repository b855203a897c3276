//! Domain entities and services for the investment client.
//!
//! Purpose: hold the strongly typed session, form, and portfolio model
//! together with the services that orchestrate them. Types are immutable
//! once constructed and document their invariants in Rustdoc; adapters
//! talk to this layer exclusively through the traits in [`ports`].

pub mod accounts;
pub mod application;
pub mod error;
pub mod money;
pub mod portfolio;
pub mod ports;
pub mod requests;
pub mod session;
pub mod submission;
pub mod validation;

pub use self::accounts::AccountService;
pub use self::application::{
    ApplicationDraft, ApplicationForm, ApplicationValidationError, FormField, FullName,
    InvestmentOption, InvestmentPlan, NationalId, PendingApplication, ValidationReport,
};
pub use self::error::ClientError;
pub use self::money::{MIN_FINANCING_MONTHLY, MIN_OUTRIGHT_AMOUNT, NairaAmount, ParseNairaError};
pub use self::portfolio::{
    ApplicationRecord, DashboardSummary, DashboardView, Investment, PortfolioService,
};
pub use self::requests::{ServiceRequest, ServiceRequestKind, ServiceRequestValidationError};
pub use self::session::{
    AuthToken, LoginCredentials, LoginValidationError, RegistrationForm, Session,
    SessionValidationError, UserProfile,
};
pub use self::submission::{SubmissionError, SubmissionPipeline, SubmissionState};

/// Convenient result alias for client service calls.
pub type ClientResult<T> = Result<T, ClientError>;
