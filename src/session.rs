//! Session handle: token + current user.
//!
//! An [`AuthSession`] is an explicit, cheaply cloneable handle; there
//! is no ambient global session, so tests (and a future multi-account
//! UI) can run independent sessions side by side.
//!
//! The token is read-only for every dependent component; only
//! `login`/`logout` replace it. Each replacement bumps a generation
//! counter so an operation that started under an old token can detect
//! the swap and fail with `Unauthenticated` instead of silently using
//! stale credentials.

use crate::api::types::RegisterRequest;
use crate::api::ApiClient;
use crate::error::{AuthError, SyncError, SyncResult};
use crate::events::{EventBus, StateEvent};
use crate::model::{Token, User};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Token + generation snapshot handed to dependent components.
#[derive(Debug, Clone)]
pub(crate) struct Credentials {
    pub token: Token,
    pub generation: u64,
}

struct Active {
    token: Token,
    user: User,
}

struct SessionInner {
    api: Arc<ApiClient>,
    events: EventBus,
    state: RwLock<Option<Active>>,
    /// Bumped on every login and logout.
    generation: AtomicU64,
}

/// The authenticated session for one user of the app.
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

impl AuthSession {
    pub(crate) fn new(api: Arc<ApiClient>, events: EventBus) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                api,
                events,
                state: RwLock::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Authenticate against the remote service. On success the token
    /// and user replace any prior session wholesale; on failure prior
    /// session state is untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let resp = self.inner.api.login(email, password).await?;
        let user = resp.user.clone();

        {
            let mut state = self.inner.state.write();
            *state = Some(Active {
                token: resp.token,
                user: resp.user,
            });
        }
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        tracing::info!(user_id = %user.id, "session established");
        self.inner.events.emit(StateEvent::LoggedIn { user: user.clone() });
        Ok(user)
    }

    /// Create an account, then log in with the same credentials. Any
    /// failure in either step surfaces as `RegistrationFailed` and no
    /// partial session is retained.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        firstname: &str,
        lastname: &str,
    ) -> Result<(), AuthError> {
        self.inner
            .api
            .register(&RegisterRequest {
                email,
                password,
                firstname,
                lastname,
            })
            .await
            .map_err(registration_failed)?;

        self.login(email, password)
            .await
            .map_err(registration_failed)?;
        Ok(())
    }

    /// End the session. Dependent components fail fast afterwards, and
    /// operations still in flight fail `Unauthenticated` when they next
    /// check their generation.
    pub fn logout(&self) {
        let had_session = self.inner.state.write().take().is_some();
        if had_session {
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            tracing::info!("session ended");
            self.inner.events.emit(StateEvent::LoggedOut);
        }
    }

    /// The user of the current session, if logged in.
    pub fn current_user(&self) -> Option<User> {
        self.inner.state.read().as_ref().map(|a| a.user.clone())
    }

    /// The bearer token of the current session, for callers that drive
    /// [`crate::images::ImageStore`] directly.
    pub fn token(&self) -> Option<Token> {
        self.inner.state.read().as_ref().map(|a| a.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().is_some()
    }

    /// Snapshot the token for a dependent operation. Fails fast when no
    /// session is held.
    pub(crate) fn credentials(&self) -> SyncResult<Credentials> {
        let state = self.inner.state.read();
        let active = state.as_ref().ok_or(SyncError::Unauthenticated)?;
        Ok(Credentials {
            token: active.token.clone(),
            generation: self.inner.generation.load(Ordering::SeqCst),
        })
    }

    /// Whether a snapshot taken earlier still belongs to the live
    /// session (no login/logout happened since).
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }
}

fn registration_failed(err: AuthError) -> AuthError {
    match err {
        AuthError::RegistrationFailed(msg) => AuthError::RegistrationFailed(msg),
        other => AuthError::RegistrationFailed(other.to_string()),
    }
}

// ── Tests ────────────────────────────────────────────────────────
