//! Reqwest-backed platform gateway adapter.
//!
//! This adapter owns transport details only: bearer-token injection, endpoint
//! joining, timeout and HTTP error mapping, and envelope decoding into domain
//! types. A 401 on any authenticated call clears the stored session and
//! notifies the watch before surfacing `GatewayError::AuthExpired`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::warn;

use super::dto;
use crate::domain::application::ApplicationForm;
use crate::domain::portfolio::{ApplicationRecord, DashboardSummary, Investment};
use crate::domain::ports::{
    GatewayError, NoOpSessionWatch, PlatformGateway, SessionStore, SessionWatch,
};
use crate::domain::requests::ServiceRequest;
use crate::domain::session::{AuthToken, LoginCredentials, RegistrationForm, Session};

/// Platform gateway that performs HTTP requests against one base URL.
pub struct HttpPlatformGateway<S, W = NoOpSessionWatch> {
    client: Client,
    base_url: String,
    store: Arc<S>,
    watch: Arc<W>,
}

impl<S> HttpPlatformGateway<S> {
    /// Build an adapter without a session watch.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration, store: Arc<S>) -> Result<Self, reqwest::Error> {
        Self::with_watch(base_url, timeout, store, Arc::new(NoOpSessionWatch))
    }
}

impl<S, W> HttpPlatformGateway<S, W> {
    /// Build an adapter that notifies `watch` when a 401 forces a sign out.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_watch(
        base_url: Url,
        timeout: Duration,
        store: Arc<S>,
        watch: Arc<W>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().to_owned(),
            store,
            watch,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        join_endpoint(&self.base_url, path)
    }
}

impl<S, W> HttpPlatformGateway<S, W>
where
    S: SessionStore,
    W: SessionWatch,
{
    /// An unreadable store counts as signed out rather than an error.
    fn bearer_token(&self) -> Result<AuthToken, GatewayError> {
        match self.store.load() {
            Ok(Some(session)) => Ok(session.token().clone()),
            Ok(None) => Err(GatewayError::AuthExpired),
            Err(e) => {
                warn!(error = %e, "session load failed; treating caller as signed out");
                Err(GatewayError::AuthExpired)
            }
        }
    }

    fn forced_logout(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear session after token rejection");
        }
        self.watch.session_changed(None);
    }

    /// Exchange credentials at an unauthenticated auth endpoint.
    ///
    /// The platform reports sign-in failures through the envelope body even
    /// on error statuses, so decoding is attempted before status mapping.
    async fn exchange<B: Serialize + Sync>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<dto::AuthResponseDto, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        match serde_json::from_slice::<dto::AuthResponseDto>(body.as_ref()) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(map_status_error(status, body.as_ref())),
            Err(error) => Err(decode_error(&error)),
        }
    }

    async fn get_authorized(&self, path: &str) -> Result<Vec<u8>, GatewayError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .get(self.endpoint(path))
            .bearer_auth(token.as_ref())
            .send()
            .await
            .map_err(map_transport_error)?;
        self.read_authorized(response).await
    }

    async fn post_authorized<B: Serialize + Sync>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<Vec<u8>, GatewayError> {
        let token = self.bearer_token()?;
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(token.as_ref())
            .json(payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        self.read_authorized(response).await
    }

    async fn read_authorized(&self, response: reqwest::Response) -> Result<Vec<u8>, GatewayError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::UNAUTHORIZED {
            warn!("platform rejected the stored token; signing out");
            self.forced_logout();
            return Err(GatewayError::AuthExpired);
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl<S, W> PlatformGateway for HttpPlatformGateway<S, W>
where
    S: SessionStore,
    W: SessionWatch,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, GatewayError> {
        let envelope = self
            .exchange("/auth/login", &dto::LoginRequestDto::from(credentials))
            .await?;
        envelope
            .into_session("Login failed")
            .map_err(GatewayError::request)
    }

    async fn register(&self, form: &RegistrationForm) -> Result<Option<Session>, GatewayError> {
        let envelope = self
            .exchange("/auth/register", &dto::RegisterRequestDto::from(form))
            .await?;
        envelope
            .into_optional_session("Registration failed")
            .map_err(GatewayError::request)
    }

    async fn submit_application(
        &self,
        form: &ApplicationForm,
    ) -> Result<ApplicationRecord, GatewayError> {
        let body = self
            .post_authorized("/applications/submit", &dto::ApplicationRequestDto::from(form))
            .await?;
        let envelope: dto::SubmitResponseDto = decode(&body)?;
        envelope.into_record().map_err(GatewayError::request)
    }

    async fn dashboard_summary(&self) -> Result<DashboardSummary, GatewayError> {
        let body = self.get_authorized("/investments/dashboard/summary").await?;
        let envelope: dto::DashboardResponseDto = decode(&body)?;
        envelope.into_summary().map_err(GatewayError::request)
    }

    async fn investments(&self) -> Result<Vec<Investment>, GatewayError> {
        let body = self.get_authorized("/investments").await?;
        let envelope: dto::InvestmentsResponseDto = decode(&body)?;
        envelope.into_rows().map_err(GatewayError::request)
    }

    async fn applications(&self) -> Result<Vec<ApplicationRecord>, GatewayError> {
        let body = self.get_authorized("/applications").await?;
        let envelope: dto::ApplicationsResponseDto = decode(&body)?;
        envelope.into_rows().map_err(GatewayError::request)
    }

    async fn submit_service_request(&self, request: &ServiceRequest) -> Result<(), GatewayError> {
        let body = self
            .post_authorized("/users/requests", &dto::ServiceRequestDto::from(request))
            .await?;
        let envelope: dto::AckResponseDto = decode(&body)?;
        envelope.into_ack().map_err(GatewayError::request)
    }
}

fn join_endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|error| decode_error(&error))
}

fn decode_error(error: &serde_json::Error) -> GatewayError {
    GatewayError::request(format!("invalid platform response: {error}"))
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::request(format!("request timed out: {error}"))
    } else if error.is_connect() {
        GatewayError::request(format!("connection failed: {error}"))
    } else {
        GatewayError::request(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    if let Some(message) = dto::extract_error_message(body) {
        return GatewayError::request(message);
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    GatewayError::request(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
