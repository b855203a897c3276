//! Investment application model: raw draft, validation, and the
//! submission-ready form.
//!
//! A [`ApplicationDraft`] holds whatever the caller typed. Validation either
//! produces a [`PendingApplication`] (every field checked, consent consumed)
//! or a [`ValidationReport`] naming each failed field. Attaching the plan
//! amount turns the pending application into an [`ApplicationForm`], the only
//! type the gateway will serialise.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::money::NairaAmount;
use super::validation::{format_national_id, is_present, is_valid_full_name, is_valid_national_id};

/// Validation errors raised by application field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationValidationError {
    /// Name shorter than the minimum once trimmed.
    InvalidFullName,
    /// Identifier was not exactly eleven digits.
    InvalidNationalId,
}

impl fmt::Display for ApplicationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFullName => write!(f, "full name must be at least three characters"),
            Self::InvalidNationalId => write!(f, "national ID must be exactly eleven digits"),
        }
    }
}

impl std::error::Error for ApplicationValidationError {}

/// Applicant name, trimmed and at least three characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a name from borrowed input.
    pub fn new(name: impl Into<String>) -> Result<Self, ApplicationValidationError> {
        let trimmed = name.into().trim().to_owned();
        if !is_valid_full_name(&trimmed) {
            return Err(ApplicationValidationError::InvalidFullName);
        }
        Ok(Self(trimmed))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = ApplicationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Eleven-digit national identification number.
///
/// The constructor is strict; callers holding free-form input should pass it
/// through [`format_national_id`] first, as draft validation does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Validate and construct an identifier from borrowed input.
    pub fn new(id: impl Into<String>) -> Result<Self, ApplicationValidationError> {
        let raw = id.into();
        if !is_valid_national_id(&raw) {
            return Err(ApplicationValidationError::InvalidNationalId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<NationalId> for String {
    fn from(value: NationalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for NationalId {
    type Error = ApplicationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How the applicant intends to fund the investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentOption {
    /// Full payment up front.
    Outright,
    /// Monthly repayments subject to a credit check.
    Financing,
}

impl InvestmentOption {
    /// Minimum amount the platform advertises for this option.
    pub fn minimum(self) -> NairaAmount {
        match self {
            Self::Outright => super::money::MIN_OUTRIGHT_AMOUNT,
            Self::Financing => super::money::MIN_FINANCING_MONTHLY,
        }
    }

    /// Wire value used by the platform API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outright => "outright",
            Self::Financing => "financing",
        }
    }
}

impl fmt::Display for InvestmentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form fields a validation failure can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Applicant name.
    FullName,
    /// National identification number.
    NationalId,
    /// Employment status selection.
    EmploymentStatus,
    /// Applicant location.
    Location,
    /// Outright or financing choice.
    InvestmentOption,
    /// Credit-check consent for financing.
    CreditConsent,
}

impl FormField {
    /// Human-readable field label for error reporting.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "full name",
            Self::NationalId => "national ID",
            Self::EmploymentStatus => "employment status",
            Self::Location => "location",
            Self::InvestmentOption => "investment option",
            Self::CreditConsent => "credit consent",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of draft validation when one or more fields failed.
///
/// Fields appear in the order they were checked, so messages read in the
/// same order as the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    failed: Vec<FormField>,
}

impl ValidationReport {
    fn record(&mut self, field: FormField) {
        self.failed.push(field);
    }

    /// Whether every checked field passed.
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fields that failed validation, in form order.
    pub fn failed_fields(&self) -> &[FormField] {
        &self.failed
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in &self.failed {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(field.label())?;
            first = false;
        }
        Ok(())
    }
}

/// Unvalidated application input, exactly as the caller supplied it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationDraft {
    /// Applicant name, free-form.
    pub full_name: String,
    /// National ID, free-form; digits are extracted during validation.
    pub national_id: String,
    /// Employment status selection.
    pub employment_status: String,
    /// Applicant location, free-form.
    pub location: String,
    /// Chosen funding option, if any.
    pub investment_option: Option<InvestmentOption>,
    /// Whether the applicant consented to a credit check.
    pub credit_consent: bool,
}

impl ApplicationDraft {
    /// Check every field and promote the draft when all of them pass.
    ///
    /// The national ID is normalised with [`format_national_id`] before the
    /// digit check, matching the form's input filter. Consent is only
    /// required when financing is selected; it is consumed here and does not
    /// appear on the validated application.
    ///
    /// # Errors
    /// Returns a [`ValidationReport`] listing every failed field.
    pub fn validate(&self) -> Result<PendingApplication, ValidationReport> {
        let mut report = ValidationReport::default();

        let full_name = match FullName::new(self.full_name.as_str()) {
            Ok(name) => Some(name),
            Err(_) => {
                report.record(FormField::FullName);
                None
            }
        };

        let national_id = match NationalId::new(format_national_id(&self.national_id)) {
            Ok(id) => Some(id),
            Err(_) => {
                report.record(FormField::NationalId);
                None
            }
        };

        if !is_present(&self.employment_status) {
            report.record(FormField::EmploymentStatus);
        }
        if !is_present(&self.location) {
            report.record(FormField::Location);
        }

        match self.investment_option {
            None => report.record(FormField::InvestmentOption),
            Some(InvestmentOption::Financing) if !self.credit_consent => {
                report.record(FormField::CreditConsent);
            }
            Some(_) => {}
        }

        match (full_name, national_id, self.investment_option) {
            (Some(full_name), Some(national_id), Some(option)) if report.is_valid() => {
                Ok(PendingApplication {
                    full_name,
                    national_id,
                    employment_status: self.employment_status.trim().to_owned(),
                    location: self.location.trim().to_owned(),
                    option,
                })
            }
            _ => Err(report),
        }
    }
}

/// A draft that passed validation and still needs its plan amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingApplication {
    full_name: FullName,
    national_id: NationalId,
    employment_status: String,
    location: String,
    option: InvestmentOption,
}

impl PendingApplication {
    /// Funding option the applicant chose.
    pub fn option(&self) -> InvestmentOption {
        self.option
    }

    /// Attach the plan amount and produce the submission-ready form.
    ///
    /// `amount` is the figure the applicant entered when prompted; `None`
    /// falls back to the option's advertised minimum.
    pub fn into_form(self, amount: Option<NairaAmount>) -> ApplicationForm {
        let amount = amount.unwrap_or_else(|| self.option.minimum());
        let plan = match self.option {
            InvestmentOption::Outright => InvestmentPlan::Outright { amount },
            InvestmentOption::Financing => InvestmentPlan::Financing {
                monthly_repayment: amount,
            },
        };
        ApplicationForm {
            full_name: self.full_name,
            national_id: self.national_id,
            employment_status: self.employment_status,
            location: self.location,
            plan,
        }
    }
}

/// Funding plan attached to a submission-ready application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentPlan {
    /// Pay the full amount immediately.
    Outright {
        /// Sum invested up front.
        amount: NairaAmount,
    },
    /// Spread payments monthly; implies credit-check consent.
    Financing {
        /// Amount repaid each month.
        monthly_repayment: NairaAmount,
    },
}

impl InvestmentPlan {
    /// Funding option this plan realises.
    pub fn option(self) -> InvestmentOption {
        match self {
            Self::Outright { .. } => InvestmentOption::Outright,
            Self::Financing { .. } => InvestmentOption::Financing,
        }
    }
}

/// Fully validated application ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationForm {
    full_name: FullName,
    national_id: NationalId,
    employment_status: String,
    location: String,
    plan: InvestmentPlan,
}

impl ApplicationForm {
    /// Applicant name.
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// National identification number.
    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    /// Employment status selection.
    pub fn employment_status(&self) -> &str {
        self.employment_status.as_str()
    }

    /// Applicant location.
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Funding plan with its amount.
    pub fn plan(&self) -> InvestmentPlan {
        self.plan
    }

    /// Funding option the plan realises.
    pub fn option(&self) -> InvestmentOption {
        self.plan.option()
    }
}
