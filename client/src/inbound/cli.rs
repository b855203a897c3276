//! Command-line definition and console port implementations.

use std::io::{self, BufRead};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::domain::application::{ApplicationDraft, InvestmentOption, ValidationReport};
use crate::domain::error::ClientError;
use crate::domain::money::NairaAmount;
use crate::domain::portfolio::ApplicationRecord;
use crate::domain::ports::{AmountPrompt, SessionWatch, SubmissionListener};
use crate::domain::requests::ServiceRequestKind;
use crate::domain::session::Session;

/// `spv` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "spv",
    about = "Client for the Livestock SPV cattle investment platform",
    version
)]
pub struct Cli {
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations the client can perform against the platform.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with platform credentials.
    Login {
        /// Account email address.
        #[arg(long, value_name = "address")]
        email: String,
        /// Account password.
        #[arg(long, value_name = "password")]
        password: String,
    },
    /// Create an investor account.
    Register {
        /// Name the account will display.
        #[arg(long = "full-name", value_name = "name")]
        full_name: String,
        /// Email address for the new account.
        #[arg(long, value_name = "address")]
        email: String,
        /// Password for the new account.
        #[arg(long, value_name = "password")]
        password: String,
        /// Optional contact phone number.
        #[arg(long, value_name = "number")]
        phone: Option<String>,
    },
    /// Discard the stored session.
    Logout,
    /// Show who is signed in and where the session lives.
    Status,
    /// Submit an investment application.
    Apply(ApplyArgs),
    /// Show the dashboard summary and investments.
    Dashboard,
    /// List your investments.
    Investments,
    /// List your submitted applications.
    Applications,
    /// File a service request against your account.
    Request {
        /// Category of the request.
        #[arg(long, value_enum, value_name = "kind")]
        kind: RequestKindArg,
        /// What you are asking for.
        #[arg(long, value_name = "text")]
        description: String,
    },
}

/// `spv apply` arguments.
///
/// Fields stay optional or free-form wherever the application form leaves
/// them so; the draft validation reports problems collectively instead of
/// clap rejecting them one at a time.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Applicant full name.
    #[arg(long = "full-name", value_name = "name")]
    pub full_name: String,
    /// Eleven-digit national identification number.
    #[arg(long = "national-id", value_name = "digits")]
    pub national_id: String,
    /// Employment status.
    #[arg(long = "employment-status", value_name = "status")]
    pub employment_status: String,
    /// Applicant location.
    #[arg(long, value_name = "city")]
    pub location: String,
    /// Funding option.
    #[arg(long, value_enum, value_name = "option")]
    pub option: Option<InvestmentOptionArg>,
    /// Consent to a credit check; financing requires it.
    #[arg(long = "credit-consent")]
    pub credit_consent: bool,
    /// Plan amount in naira; prompted for interactively when omitted.
    #[arg(long, value_name = "naira")]
    pub amount: Option<NairaAmount>,
}

impl ApplyArgs {
    /// Assemble the unvalidated draft the submission pipeline consumes.
    pub fn to_draft(&self) -> ApplicationDraft {
        ApplicationDraft {
            full_name: self.full_name.clone(),
            national_id: self.national_id.clone(),
            employment_status: self.employment_status.clone(),
            location: self.location.clone(),
            investment_option: self.option.map(Into::into),
            credit_consent: self.credit_consent,
        }
    }
}

/// Funding options as command-line values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InvestmentOptionArg {
    /// Full payment up front.
    Outright,
    /// Monthly repayments subject to a credit check.
    Financing,
}

impl From<InvestmentOptionArg> for InvestmentOption {
    fn from(value: InvestmentOptionArg) -> Self {
        match value {
            InvestmentOptionArg::Outright => Self::Outright,
            InvestmentOptionArg::Financing => Self::Financing,
        }
    }
}

/// Service request categories as command-line values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestKindArg {
    /// Rebalance how the investment is allocated.
    AssetAllocation,
    /// Change who manages the herd.
    ManagementChange,
    /// Correct or update account information.
    InformationUpdate,
    /// Withdraw part or all of the investment.
    Withdrawal,
}

impl From<RequestKindArg> for ServiceRequestKind {
    fn from(value: RequestKindArg) -> Self {
        match value {
            RequestKindArg::AssetAllocation => Self::AssetAllocation,
            RequestKindArg::ManagementChange => Self::ManagementChange,
            RequestKindArg::InformationUpdate => Self::InformationUpdate,
            RequestKindArg::Withdrawal => Self::Withdrawal,
        }
    }
}

/// Amount prompt that asks on standard input.
///
/// A preset amount, supplied with `--amount`, bypasses the prompt entirely.
/// Blank or unparsable input yields `None`, which the pipeline maps to the
/// option's advertised minimum.
#[derive(Debug, Default)]
pub struct StdinAmountPrompt {
    preset: Option<NairaAmount>,
}

impl StdinAmountPrompt {
    /// Build a prompt, optionally bypassed by a preset amount.
    pub fn new(preset: Option<NairaAmount>) -> Self {
        Self { preset }
    }
}

impl AmountPrompt for StdinAmountPrompt {
    fn request_amount(&self, option: InvestmentOption) -> Option<NairaAmount> {
        if let Some(preset) = self.preset {
            return Some(preset);
        }

        let label = match option {
            InvestmentOption::Outright => "investment amount",
            InvestmentOption::Financing => "monthly repayment amount",
        };
        println!("Enter {label} (minimum {}):", option.minimum());

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return None;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<NairaAmount>() {
            Ok(amount) => Some(amount),
            Err(e) => {
                warn!(error = %e, input = trimmed, "ignoring unparsable amount");
                println!("Amount not understood; using the minimum.");
                None
            }
        }
    }
}

/// Watch that announces the signed-in identity on the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSessionWatch;

impl SessionWatch for ConsoleSessionWatch {
    fn session_changed(&self, session: Option<&Session>) {
        match session {
            Some(session) if !session.user().full_name.is_empty() => {
                println!("Signed in as {}", session.user().full_name);
            }
            Some(_) => println!("Signed in"),
            None => {}
        }
    }
}

/// Listener that narrates submission progress on the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSubmissionListener;

impl SubmissionListener for ConsoleSubmissionListener {
    fn validation_failed(&self, report: &ValidationReport) {
        println!("Please correct the following fields: {report}");
    }

    fn submit_started(&self) {
        println!("Submitting...");
    }

    fn submit_succeeded(&self, record: &ApplicationRecord) {
        match record.reference() {
            Some(reference) => println!("Application received. Reference: {reference}"),
            None => println!("Application received."),
        }
    }

    fn submit_failed(&self, error: &ClientError) {
        println!("Submission failed. Please try again. ({error})");
    }
}

#[cfg(test)]
mod tests;
