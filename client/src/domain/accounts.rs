//! Account lifecycle service: sign in, register, sign out, restore.
//!
//! Every path funnels through the session store so one copy of the session
//! exists, and the watch hears about every change so interested surfaces
//! stay in sync with storage.

use std::sync::Arc;

use tracing::{info, warn};

use super::ClientResult;
use super::ports::{NoOpSessionWatch, PlatformGateway, SessionStore, SessionWatch};
use super::session::{LoginCredentials, RegistrationForm, Session};

/// Orchestrates authentication against the platform and local persistence.
#[derive(Debug)]
pub struct AccountService<S, G, W = NoOpSessionWatch> {
    store: Arc<S>,
    gateway: Arc<G>,
    watch: Arc<W>,
}

impl<S, G> AccountService<S, G> {
    /// Build the service without a session watch.
    pub fn with_noop_watch(store: Arc<S>, gateway: Arc<G>) -> Self {
        Self::new(store, gateway, Arc::new(NoOpSessionWatch))
    }
}

impl<S, G, W> AccountService<S, G, W> {
    /// Build the service over a store, gateway, and watch.
    pub fn new(store: Arc<S>, gateway: Arc<G>, watch: Arc<W>) -> Self {
        Self {
            store,
            gateway,
            watch,
        }
    }
}

impl<S, G, W> AccountService<S, G, W>
where
    S: SessionStore,
    G: PlatformGateway,
    W: SessionWatch,
{
    /// Exchange credentials for a session and persist it.
    ///
    /// The watch is only notified once the session is safely stored.
    ///
    /// # Errors
    /// Returns [`crate::domain::ClientError`] when the platform rejects the
    /// credentials or the session cannot be persisted.
    pub async fn login(&self, credentials: &LoginCredentials) -> ClientResult<Session> {
        let session = self.gateway.login(credentials).await?;
        self.store.save(&session)?;
        self.watch.session_changed(Some(&session));
        info!(user = %session.user().full_name, "signed in");
        Ok(session)
    }

    /// Create an account, signing in when the platform issues a session.
    ///
    /// # Errors
    /// Returns [`crate::domain::ClientError`] when registration is rejected
    /// or an issued session cannot be persisted.
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<Option<Session>> {
        let session = self.gateway.register(form).await?;
        if let Some(session) = &session {
            self.store.save(session)?;
            self.watch.session_changed(Some(session));
            info!(user = %session.user().full_name, "registered and signed in");
        } else {
            info!("registered; account requires a separate sign in");
        }
        Ok(session)
    }

    /// Discard the stored session.
    ///
    /// # Errors
    /// Returns [`crate::domain::ClientError`] when an existing record cannot
    /// be removed.
    pub fn logout(&self) -> ClientResult<()> {
        self.store.clear()?;
        self.watch.session_changed(None);
        info!("signed out");
        Ok(())
    }

    /// Load the stored session and broadcast the result.
    ///
    /// Runs at startup before any command. An unreadable store is reported
    /// as signed out rather than failing the whole invocation.
    pub fn restore(&self) -> Option<Session> {
        let session = match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "session restore failed; starting signed out");
                None
            }
        };
        self.watch.session_changed(session.as_ref());
        session
    }
}
