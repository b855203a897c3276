//! Portfolio read models and the dashboard service.
//!
//! The dashboard summary is the only payload the client interprets; rows in
//! the investments and applications lists are carried opaquely so the
//! platform can evolve them without breaking the client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::ClientResult;
use super::error::ClientError;
use super::money::NairaAmount;
use super::ports::{PlatformGateway, SessionStore};

/// Aggregated dashboard figures for the signed-in investor.
///
/// Missing fields default to zero so a partial payload still renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Total capital the investor has put in.
    #[serde(default)]
    pub total_invested: NairaAmount,
    /// Present valuation of the portfolio.
    #[serde(default)]
    pub current_value: NairaAmount,
    /// Returns accrued to date.
    #[serde(default)]
    pub total_returns: NairaAmount,
    /// Number of investments currently running.
    #[serde(default)]
    pub active_investments: u32,
}

/// One investment row, kept exactly as the platform sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Investment(Map<String, Value>);

impl Investment {
    /// Raw fields of the row.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// One submitted application, kept exactly as the platform sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationRecord(Map<String, Value>);

impl ApplicationRecord {
    /// Raw fields of the record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Reference shown to the applicant, when the platform supplied one.
    ///
    /// Prefers an explicit `reference` field and falls back to `id`.
    pub fn reference(&self) -> Option<String> {
        for key in ["reference", "id"] {
            match self.0.get(key) {
                Some(Value::String(s)) => return Some(s.clone()),
                Some(Value::Number(n)) => return Some(n.to_string()),
                _ => {}
            }
        }
        None
    }
}

/// Everything the dashboard renders in one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Aggregated figures across the portfolio.
    pub summary: DashboardSummary,
    /// The investor's individual investments.
    pub investments: Vec<Investment>,
}

/// Read-side service backing the dashboard and history views.
#[derive(Debug)]
pub struct PortfolioService<S, G> {
    store: Arc<S>,
    gateway: Arc<G>,
}

impl<S, G> PortfolioService<S, G>
where
    S: SessionStore,
    G: PlatformGateway,
{
    /// Build the service over a session store and gateway.
    pub fn new(store: Arc<S>, gateway: Arc<G>) -> Self {
        Self { store, gateway }
    }

    /// Load everything the dashboard needs.
    ///
    /// Refuses before any network call when no session is stored, the same
    /// way the web dashboard bounces signed-out visitors to the login page.
    ///
    /// # Errors
    /// Returns [`ClientError::AuthExpired`] when the caller is signed out
    /// and [`ClientError::Request`] for gateway failures.
    pub async fn bootstrap(&self) -> ClientResult<DashboardView> {
        if !self.signed_in() {
            return Err(ClientError::AuthExpired);
        }

        let summary = self.gateway.dashboard_summary().await?;
        let investments = self.gateway.investments().await?;
        Ok(DashboardView {
            summary,
            investments,
        })
    }

    /// Fetch the caller's investments.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the gateway call fails.
    pub async fn investments(&self) -> ClientResult<Vec<Investment>> {
        Ok(self.gateway.investments().await?)
    }

    /// Fetch the caller's submitted applications.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the gateway call fails.
    pub async fn applications(&self) -> ClientResult<Vec<ApplicationRecord>> {
        Ok(self.gateway.applications().await?)
    }

    /// An unreadable store counts as signed out rather than an error.
    fn signed_in(&self) -> bool {
        match self.store.load() {
            Ok(session) => session.is_some(),
            Err(e) => {
                warn!(error = %e, "session load failed; treating caller as signed out");
                false
            }
        }
    }
}
