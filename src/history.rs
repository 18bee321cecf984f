//! Incrementally synchronized history cache.
//!
//! The cache maps `base_image_id -> HistoryEntry` for the current user.
//! A refresh pass lists the remote history summaries and fetches only
//! what the cache does not already hold, so sync cost is proportional
//! to the number of *new* (or revision-changed) entries, not to the
//! total history size.
//!
//! ## Consistency rules
//! - Entries are merged one at a time; a failure mid-pass keeps
//!   everything merged so far (never worse than before the call).
//! - Passes are serialized per cache; a second refresh waits for the
//!   first instead of interleaving writes.
//! - Cancellation abandons the in-flight fetch and keeps the cache
//!   valid; re-invoking the pass resumes from the current state.
//! - Rendered-variant bytes are fetched on demand and never cached;
//!   they are large and rarely viewed.

use crate::api::types::HistorySummary;
use crate::api::ApiClient;
use crate::error::{FetchError, SyncError, SyncResult};
use crate::events::{EventBus, StateEvent};
use crate::images::ImageStore;
use crate::model::{HistoryEntry, Revision};
use crate::session::{AuthSession, Credentials};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Local, incrementally updated set of history entries.
pub struct HistoryCache {
    api: Arc<ApiClient>,
    session: AuthSession,
    images: Arc<ImageStore>,
    events: EventBus,
    /// Serializes mutating passes; a second refresh waits for the first.
    refresh_lock: Mutex<()>,
    entries: RwLock<HashMap<String, Arc<HistoryEntry>>>,
}

impl HistoryCache {
    pub(crate) fn new(
        api: Arc<ApiClient>,
        session: AuthSession,
        images: Arc<ImageStore>,
        events: EventBus,
    ) -> Self {
        Self {
            api,
            session,
            images,
            events,
            refresh_lock: Mutex::new(()),
            entries: RwLock::new(HashMap::new()),
        }
    }

    // ── Refresh passes ───────────────────────────────────────────

    /// Drop everything and re-fetch the whole history. Used on login
    /// and explicit "reload all".
    pub async fn refresh_full(&self, cancel: &CancellationToken) -> SyncResult<()> {
        let _guard = self.refresh_lock.lock().await;
        let creds = self.session.credentials()?;

        self.entries.write().clear();
        self.run_pass(&creds, cancel).await.map(|_| ())
    }

    /// Fetch only history entries the cache does not already hold with
    /// an up-to-date revision. Returns the entries fetched this pass
    /// (new or replaced), in remote listing order. Idempotent with
    /// respect to already-cached entries and safe to retry.
    pub async fn refresh_incremental(
        &self,
        cancel: &CancellationToken,
    ) -> SyncResult<Vec<Arc<HistoryEntry>>> {
        let _guard = self.refresh_lock.lock().await;
        let creds = self.session.credentials()?;

        self.run_pass(&creds, cancel).await
    }

    /// One sync pass over the remote summary list. Must run under the
    /// refresh lock.
    async fn run_pass(
        &self,
        creds: &Credentials,
        cancel: &CancellationToken,
    ) -> SyncResult<Vec<Arc<HistoryEntry>>> {
        let summaries = with_cancel(cancel, self.api.history(&creds.token)).await??;

        let mut fetched = Vec::new();
        for summary in &summaries {
            let revision = Revision::of_colors(&summary.colors);
            if self.holds_revision(&summary.base_image_id, &revision) {
                continue;
            }

            let entry = match self.fetch_entry(creds, summary, revision, cancel).await {
                Ok(Some(entry)) => entry,
                // Base image the remote listed but cannot serve: drop
                // the summary and keep going.
                Ok(None) => continue,
                Err(err) => return Err(as_partial(fetched.len(), err)),
            };

            // A login/logout while we were fetching means this token no
            // longer owns the cache; do not merge under it.
            if !self.session.is_current(creds.generation) {
                return Err(SyncError::Unauthenticated);
            }

            self.entries
                .write()
                .insert(entry.base_image_id.clone(), entry.clone());
            fetched.push(entry);
        }

        tracing::debug!(added = fetched.len(), total = self.len(), "history pass complete");
        self.events.emit(StateEvent::HistoryRefreshed {
            added: fetched.len(),
        });
        Ok(fetched)
    }

    fn holds_revision(&self, base_image_id: &str, revision: &Revision) -> bool {
        self.entries
            .read()
            .get(base_image_id)
            .is_some_and(|cached| cached.revision == *revision)
    }

    /// Fetch one entry: the rendered-image id list, then the base
    /// photo bytes. `Ok(None)` means the base image 404'd.
    async fn fetch_entry(
        &self,
        creds: &Credentials,
        summary: &HistorySummary,
        revision: Revision,
        cancel: &CancellationToken,
    ) -> SyncResult<Option<Arc<HistoryEntry>>> {
        let images = with_cancel(
            cancel,
            self.api.history_images(&creds.token, &summary.base_image_id),
        )
        .await??;

        let base_image = match with_cancel(
            cancel,
            self.images.get_bytes(&creds.token, &images.original_image),
        )
        .await?
        {
            Ok(bytes) => bytes,
            Err(FetchError::NotFound(id)) => {
                tracing::warn!(base_image_id = %summary.base_image_id, image_id = %id,
                    "remote listed a base image it cannot serve, dropping entry");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let rendered_image_ids = images
            .processed_images
            .into_iter()
            .map(|p| p.processed_image_hash)
            .collect();

        Ok(Some(Arc::new(HistoryEntry {
            base_image_id: summary.base_image_id.clone(),
            revision,
            base_image,
            rendered_image_ids,
            colors: summary.colors.clone(),
        })))
    }

    // ── On-demand rendered images ────────────────────────────────

    /// Fetch the byte payloads for an entry's rendered variants, in
    /// `rendered_image_ids` order. Deliberately uncached.
    pub async fn rendered_images(
        &self,
        entry: &HistoryEntry,
        cancel: &CancellationToken,
    ) -> SyncResult<Vec<Vec<u8>>> {
        let creds = self.session.credentials()?;

        let mut payloads = Vec::with_capacity(entry.rendered_image_ids.len());
        for image_id in &entry.rendered_image_ids {
            let bytes =
                with_cancel(cancel, self.images.get_bytes(&creds.token, image_id)).await??;
            payloads.push(bytes);
        }
        Ok(payloads)
    }

    /// Drop all cached entries without a remote round trip. Used when
    /// a different user logs in on the same client.
    pub(crate) fn reset(&self) {
        self.entries.write().clear();
    }

    // ── Read access ──────────────────────────────────────────────

    /// The cached entry for a base image, if held.
    pub fn get(&self, base_image_id: &str) -> Option<Arc<HistoryEntry>> {
        self.entries.read().get(base_image_id).cloned()
    }

    pub fn contains(&self, base_image_id: &str) -> bool {
        self.entries.read().contains_key(base_image_id)
    }

    /// Snapshot of all cached entries (unordered).
    pub fn snapshot(&self) -> Vec<Arc<HistoryEntry>> {
        self.entries.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Race a future against cancellation.
async fn with_cancel<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = T>,
) -> SyncResult<T> {
    tokio::select! {
        _ = cancel.cancelled() => Err(SyncError::Cancelled),
        out = fut => Ok(out),
    }
}

/// A network failure after some entries merged becomes `PartialFailure`
/// so the caller knows the cache advanced; other errors pass through.
fn as_partial(merged: usize, err: SyncError) -> SyncError {
    match err {
        SyncError::NetworkFailure(reason) if merged > 0 => {
            SyncError::PartialFailure { merged, reason }
        }
        other => other,
    }
}

// ── Tests ────────────────────────────────────────────────────────
