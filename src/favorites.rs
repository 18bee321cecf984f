//! Favorites synchronization.
//!
//! The local set is a materialized view of the remote favorites store:
//! every mutating call (add/remove) is reconciled by a follow-up full
//! refresh, so local state is never ahead of the remote source of truth
//! for more than one round trip. Favorites are low-volume; the extra
//! round trip buys an always-consistent invariant.

use crate::api::ApiClient;
use crate::catalog::PaintCatalog;
use crate::error::{SyncError, SyncResult};
use crate::events::{EventBus, StateEvent};
use crate::model::Paint;
use crate::session::AuthSession;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Authoritative local view of the user's liked paints.
pub struct FavoritesSync {
    api: Arc<ApiClient>,
    session: AuthSession,
    catalog: Arc<PaintCatalog>,
    events: EventBus,
    /// Serializes refresh passes; a second caller waits for the first.
    refresh_lock: Mutex<()>,
    /// Replaced atomically at the end of a refresh; no observer sees a
    /// partially built list.
    paints: RwLock<Vec<Paint>>,
}

impl FavoritesSync {
    pub(crate) fn new(
        api: Arc<ApiClient>,
        session: AuthSession,
        catalog: Arc<PaintCatalog>,
        events: EventBus,
    ) -> Self {
        Self {
            api,
            session,
            catalog,
            events,
            refresh_lock: Mutex::new(()),
            paints: RwLock::new(Vec::new()),
        }
    }

    /// Discard the local set and rebuild it from the remote list,
    /// resolving each reference through the catalog. A reference the
    /// catalog cannot resolve is skipped with a warning; the rest of
    /// the refresh proceeds.
    pub async fn refresh(&self) -> SyncResult<()> {
        let _guard = self.refresh_lock.lock().await;
        let creds = self.session.credentials()?;

        let refs = self.api.favorites(&creds.token).await?;
        let mut resolved = Vec::with_capacity(refs.len());
        for fav in &refs {
            match self.catalog.get(&fav.paint_id) {
                Some(paint) => resolved.push(paint.clone()),
                None => {
                    tracing::warn!(paint_id = %fav.paint_id, "favorite references unknown paint, skipping");
                }
            }
        }

        if !self.session.is_current(creds.generation) {
            return Err(SyncError::Unauthenticated);
        }

        let count = resolved.len();
        *self.paints.write() = resolved;
        self.events.emit(StateEvent::FavoritesRefreshed { count });
        Ok(())
    }

    /// Like a paint remotely, then reconcile. If the remote call fails
    /// the local set is unchanged and the error is surfaced.
    pub async fn add(&self, paint: &Paint) -> SyncResult<()> {
        let creds = self.session.credentials()?;
        self.api.favorite_add(&creds.token, &paint.id).await?;
        self.refresh().await
    }

    /// Unlike a paint remotely, then reconcile. Same contract as
    /// [`FavoritesSync::add`].
    pub async fn remove(&self, paint: &Paint) -> SyncResult<()> {
        let creds = self.session.credentials()?;
        self.api.favorite_delete(&creds.token, &paint.id).await?;
        self.refresh().await
    }

    /// Drop the local set without touching the remote store. Used when
    /// a different user logs in on the same client.
    pub(crate) fn reset(&self) {
        self.paints.write().clear();
    }

    /// Snapshot of the current set, in remote order.
    pub fn current(&self) -> Vec<Paint> {
        self.paints.read().clone()
    }

    /// Whether a paint is currently liked (for the heart toggle).
    pub fn contains(&self, paint_id: &str) -> bool {
        self.paints.read().iter().any(|p| p.id == paint_id)
    }
}

// ── Tests ────────────────────────────────────────────────────────
