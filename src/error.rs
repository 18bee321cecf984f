//! Typed errors for the client core.
//!
//! Three families, matching the three kinds of remote interaction:
//! - [`AuthError`]: login / registration outcomes.
//! - [`SyncError`]: favorites / history / review synchronization.
//! - [`FetchError`]: single raw-image fetches, where `NotFound` and
//!   transport failure must stay distinguishable so callers can decide
//!   whether to drop an entry or retry.
//!
//! Nothing here is fatal to the process: every error is scoped to the
//! triggering operation and the operation is safe to re-invoke.

use thiserror::Error;

/// Result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced by login and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The remote auth endpoint rejected the credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Account creation (or the follow-up login) failed; no partial
    /// session is retained.
    #[error("registration failed: {0}")]
    RegistrationFailed(String),

    /// The auth endpoint could not be reached or returned garbage.
    #[error("network failure during authentication: {0}")]
    NetworkFailure(String),
}

/// Errors surfaced by favorites, history and review synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote store could not be reached, or replied with an
    /// unexpected status/body.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// No session token is held (not logged in, logged out, or the
    /// token was replaced while the operation was in flight).
    #[error("not authenticated")]
    Unauthenticated,

    /// A multi-entry pass failed after some entries were already merged.
    /// The merged entries remain valid; re-invoking the pass resumes
    /// from the current cache state.
    #[error("sync aborted after {merged} entries merged: {reason}")]
    PartialFailure { merged: usize, reason: String },

    /// The operation was cancelled by the caller. Distinct from
    /// `NetworkFailure` so retry policies don't fire on user intent.
    #[error("operation cancelled")]
    Cancelled,
}

impl SyncError {
    /// Whether re-invoking the failed operation can succeed without
    /// user action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncError::NetworkFailure(_) | SyncError::PartialFailure { .. }
        )
    }
}

/// Errors surfaced by single raw-image fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote store does not hold the requested image.
    #[error("image not found: {0}")]
    NotFound(String),

    /// Transport-level failure; the image may still exist remotely.
    #[error("network failure fetching image: {0}")]
    NetworkFailure(String),
}

// ── Conversions ──────────────────────────────────────────────────

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::NetworkFailure(err.to_string())
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::NetworkFailure(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::NetworkFailure(err.to_string())
    }
}

impl From<FetchError> for SyncError {
    fn from(err: FetchError) -> Self {
        SyncError::NetworkFailure(err.to_string())
    }
}

// ── Tests ────────────────────────────────────────────────────────
