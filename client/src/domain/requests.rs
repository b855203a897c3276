//! Service requests an investor can file against their account.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categories the platform accepts for a service request.
///
/// Wire values are the labels the platform expects verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRequestKind {
    /// Rebalance how the investment is allocated.
    #[serde(rename = "Asset Allocation")]
    AssetAllocation,
    /// Change who manages the herd.
    #[serde(rename = "Management Change")]
    ManagementChange,
    /// Correct or update account information.
    #[serde(rename = "Information Update")]
    InformationUpdate,
    /// Withdraw part or all of the investment.
    #[serde(rename = "Withdrawal Request")]
    Withdrawal,
}

impl ServiceRequestKind {
    /// Label used both on the wire and in user-facing output.
    pub fn label(self) -> &'static str {
        match self {
            Self::AssetAllocation => "Asset Allocation",
            Self::ManagementChange => "Management Change",
            Self::InformationUpdate => "Information Update",
            Self::Withdrawal => "Withdrawal Request",
        }
    }
}

impl fmt::Display for ServiceRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation errors raised by [`ServiceRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRequestValidationError {
    /// Description was missing or blank once trimmed.
    EmptyDescription,
}

impl fmt::Display for ServiceRequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "request description must not be empty"),
        }
    }
}

impl std::error::Error for ServiceRequestValidationError {}

/// A validated service request ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    kind: ServiceRequestKind,
    description: String,
}

impl ServiceRequest {
    /// Validate and construct a request.
    pub fn new(
        kind: ServiceRequestKind,
        description: &str,
    ) -> Result<Self, ServiceRequestValidationError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(ServiceRequestValidationError::EmptyDescription);
        }
        Ok(Self {
            kind,
            description: trimmed.to_owned(),
        })
    }

    /// Category the request files under.
    pub fn kind(&self) -> ServiceRequestKind {
        self.kind
    }

    /// What the investor is asking for.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}
