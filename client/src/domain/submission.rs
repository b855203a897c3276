//! Application submission pipeline.
//!
//! Drives a draft through validation, the amount prompt, and the gateway
//! while enforcing the form lifecycle: at most one submission in flight,
//! failed submissions retryable, successful ones final. A listener hears
//! each stage so the front end can mirror progress without polling.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{info, warn};

use super::application::ApplicationDraft;
use super::error::ClientError;
use super::ports::{
    AmountPrompt, NoOpSubmissionListener, PlatformGateway, SubmissionListener,
};
use super::portfolio::ApplicationRecord;

/// Where a submission currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet, or the last attempt failed validation.
    Idle,
    /// The draft is being validated.
    Validating,
    /// The gateway call is in flight.
    Submitting,
    /// The platform accepted the application.
    Succeeded,
    /// The gateway call failed; the caller may retry.
    Failed,
}

/// Failure returned by [`SubmissionPipeline::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Another submission is still in flight.
    #[error("a submission is already in flight")]
    InFlight,
    /// The application was already accepted; submit a new draft instead.
    #[error("the application was already submitted")]
    Completed,
    /// Validation or gateway failure, carried through unchanged.
    #[error(transparent)]
    Flow(#[from] ClientError),
}

/// Coordinates one application form from draft to accepted record.
#[derive(Debug)]
pub struct SubmissionPipeline<G, P, L = NoOpSubmissionListener> {
    gateway: Arc<G>,
    prompt: Arc<P>,
    listener: Arc<L>,
    state: Mutex<SubmissionState>,
}

impl<G, P> SubmissionPipeline<G, P> {
    /// Build a pipeline that reports progress to nobody.
    pub fn with_noop_listener(gateway: Arc<G>, prompt: Arc<P>) -> Self {
        Self::new(gateway, prompt, Arc::new(NoOpSubmissionListener))
    }
}

impl<G, P, L> SubmissionPipeline<G, P, L> {
    /// Build a pipeline over a gateway, amount prompt, and listener.
    pub fn new(gateway: Arc<G>, prompt: Arc<P>, listener: Arc<L>) -> Self {
        Self {
            gateway,
            prompt,
            listener,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        *self.guard()
    }

    fn guard(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, next: SubmissionState) {
        *self.guard() = next;
    }
}

impl<G, P, L> SubmissionPipeline<G, P, L>
where
    G: PlatformGateway,
    P: AmountPrompt,
    L: SubmissionListener,
{
    /// Validate `draft`, collect the plan amount, and submit.
    ///
    /// A draft that fails validation leaves the pipeline idle and never
    /// reaches the network. A gateway failure parks the pipeline in
    /// [`SubmissionState::Failed`], from which `submit` may be called
    /// again; success is final.
    ///
    /// # Errors
    /// - [`SubmissionError::InFlight`] when another submission is running.
    /// - [`SubmissionError::Completed`] after a successful submission.
    /// - [`SubmissionError::Flow`] for validation and gateway failures.
    pub async fn submit(
        &self,
        draft: &ApplicationDraft,
    ) -> Result<ApplicationRecord, SubmissionError> {
        {
            let mut state = self.guard();
            match *state {
                SubmissionState::Validating | SubmissionState::Submitting => {
                    return Err(SubmissionError::InFlight);
                }
                SubmissionState::Succeeded => return Err(SubmissionError::Completed),
                SubmissionState::Idle | SubmissionState::Failed => {
                    *state = SubmissionState::Validating;
                }
            }
        }

        let pending = match draft.validate() {
            Ok(pending) => pending,
            Err(report) => {
                self.listener.validation_failed(&report);
                self.transition(SubmissionState::Idle);
                return Err(ClientError::Validation(report).into());
            }
        };

        let amount = self.prompt.request_amount(pending.option());
        let form = pending.into_form(amount);

        self.transition(SubmissionState::Submitting);
        self.listener.submit_started();

        match self.gateway.submit_application(&form).await {
            Ok(record) => {
                self.transition(SubmissionState::Succeeded);
                self.listener.submit_succeeded(&record);
                info!(reference = ?record.reference(), "application accepted");
                Ok(record)
            }
            Err(e) => {
                let error = ClientError::from(e);
                self.transition(SubmissionState::Failed);
                self.listener.submit_failed(&error);
                warn!(error = %error, "application submission failed");
                Err(error.into())
            }
        }
    }
}
