//! DTOs for the platform API wire format.
//!
//! The platform wraps every response in a `success` envelope and reports
//! failures through a `message` field, on error statuses as well as 200s.
//! The adapter decodes into these transport DTOs first, then maps into
//! domain types in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::application::{ApplicationForm, InvestmentOption, InvestmentPlan};
use crate::domain::portfolio::{ApplicationRecord, DashboardSummary, Investment};
use crate::domain::requests::ServiceRequest;
use crate::domain::session::{
    AuthToken, LoginCredentials, RegistrationForm, Session, UserProfile,
};

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            email: credentials.email(),
            password: credentials.password(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequestDto<'a> {
    full_name: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
}

impl<'a> From<&'a RegistrationForm> for RegisterRequestDto<'a> {
    fn from(form: &'a RegistrationForm) -> Self {
        Self {
            full_name: form.full_name(),
            email: form.email(),
            password: form.password(),
            phone: form.phone(),
        }
    }
}

/// Envelope returned by `/auth/login` and `/auth/register`.
#[derive(Debug, Deserialize)]
pub(super) struct AuthResponseDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(default)]
    message: Option<String>,
}

impl AuthResponseDto {
    /// Interpret the envelope as a mandatory session.
    pub(super) fn into_session(self, fallback: &str) -> Result<Session, String> {
        match self.into_optional_session(fallback)? {
            Some(session) => Ok(session),
            None => Err("auth response is missing token or user".to_owned()),
        }
    }

    /// Interpret the envelope, tolerating a missing session.
    ///
    /// Registration may acknowledge the account without signing it in, in
    /// which case the token and user fields are absent.
    pub(super) fn into_optional_session(self, fallback: &str) -> Result<Option<Session>, String> {
        if !self.success {
            return Err(self.message_or(fallback));
        }
        match (self.token, self.user) {
            (Some(token), Some(user)) => {
                let token = AuthToken::new(token).map_err(|e| e.to_string())?;
                Ok(Some(Session::new(token, user)))
            }
            _ => Ok(None),
        }
    }

    fn message_or(self, fallback: &str) -> String {
        self.message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_owned())
    }
}

/// Application payload sent to `/applications/submit`.
///
/// Every field is present on the wire; the amount not selected by the plan
/// is serialised as `null`, and consent is implied by the financing plan.
#[derive(Debug, Serialize)]
pub(super) struct ApplicationRequestDto<'a> {
    full_name: &'a str,
    national_id: &'a str,
    employment_status: &'a str,
    location: &'a str,
    investment_option: InvestmentOption,
    investment_amount: Option<u64>,
    monthly_repayment: Option<u64>,
    credit_consent: bool,
}

impl<'a> From<&'a ApplicationForm> for ApplicationRequestDto<'a> {
    fn from(form: &'a ApplicationForm) -> Self {
        let (investment_amount, monthly_repayment, credit_consent) = match form.plan() {
            InvestmentPlan::Outright { amount } => (Some(amount.value()), None, false),
            InvestmentPlan::Financing { monthly_repayment } => {
                (None, Some(monthly_repayment.value()), true)
            }
        };
        Self {
            full_name: form.full_name().as_ref(),
            national_id: form.national_id().as_ref(),
            employment_status: form.employment_status(),
            location: form.location(),
            investment_option: form.option(),
            investment_amount,
            monthly_repayment,
            credit_consent,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SubmitResponseDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    application: Option<ApplicationRecord>,
    #[serde(default)]
    message: Option<String>,
}

impl SubmitResponseDto {
    pub(super) fn into_record(self) -> Result<ApplicationRecord, String> {
        if !self.success {
            return Err(message_or(self.message, "Submission failed"));
        }
        self.application
            .ok_or_else(|| "submission response is missing the application".to_owned())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct DashboardResponseDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    dashboard: Option<DashboardSummary>,
    #[serde(default)]
    message: Option<String>,
}

impl DashboardResponseDto {
    pub(super) fn into_summary(self) -> Result<DashboardSummary, String> {
        if !self.success {
            return Err(message_or(self.message, "Failed to load dashboard"));
        }
        self.dashboard
            .ok_or_else(|| "dashboard response is missing the summary".to_owned())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct InvestmentsResponseDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    investments: Vec<Investment>,
    #[serde(default)]
    message: Option<String>,
}

impl InvestmentsResponseDto {
    pub(super) fn into_rows(self) -> Result<Vec<Investment>, String> {
        if !self.success {
            return Err(message_or(self.message, "Failed to load investments"));
        }
        Ok(self.investments)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ApplicationsResponseDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    applications: Vec<ApplicationRecord>,
    #[serde(default)]
    message: Option<String>,
}

impl ApplicationsResponseDto {
    pub(super) fn into_rows(self) -> Result<Vec<ApplicationRecord>, String> {
        if !self.success {
            return Err(message_or(self.message, "Failed to load applications"));
        }
        Ok(self.applications)
    }
}

/// Request payload sent to `/users/requests`.
#[derive(Debug, Serialize)]
pub(super) struct ServiceRequestDto<'a> {
    #[serde(rename = "type")]
    kind: crate::domain::requests::ServiceRequestKind,
    description: &'a str,
}

impl<'a> From<&'a ServiceRequest> for ServiceRequestDto<'a> {
    fn from(request: &'a ServiceRequest) -> Self {
        Self {
            kind: request.kind(),
            description: request.description(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AckResponseDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

impl AckResponseDto {
    pub(super) fn into_ack(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(message_or(self.message, "Failed to submit request"))
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelopeDto {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Pull the server-reported message out of an error body, when it carries
/// the standard envelope.
pub(super) fn extract_error_message(body: &[u8]) -> Option<String> {
    let envelope = serde_json::from_slice::<ErrorEnvelopeDto>(body).ok()?;
    if envelope.success == Some(true) {
        return None;
    }
    envelope.message.filter(|m| !m.trim().is_empty())
}

fn message_or(message: Option<String>, fallback: &str) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}
