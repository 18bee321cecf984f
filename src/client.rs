//! Client facade.
//!
//! Wires one [`ApiClient`], one [`AuthSession`] and the sync components
//! around a shared event bus, and owns the login → initial-sync
//! orchestration. The mobile bridge holds exactly one `Client` per
//! signed-in account.
//!
//! Initial-sync failures after a successful authentication do not fail
//! the login: auth succeeded and previously displayed data stays intact.
//! They surface as [`StateEvent::SyncFailed`] to subscribers instead.

use crate::api::ApiClient;
use crate::catalog::PaintCatalog;
use crate::config::ClientConfig;
use crate::error::{AuthError, SyncResult};
use crate::events::{EventBus, StateEvent, SyncComponent};
use crate::favorites::FavoritesSync;
use crate::history::HistoryCache;
use crate::images::ImageStore;
use crate::model::User;
use crate::reviews::ReviewService;
use crate::session::AuthSession;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Top-level handle over the client core.
pub struct Client {
    session: AuthSession,
    catalog: Arc<PaintCatalog>,
    favorites: FavoritesSync,
    history: HistoryCache,
    images: Arc<ImageStore>,
    reviews: ReviewService,
    events: EventBus,
    /// Id of the last user who logged in through this client; a switch
    /// drops the per-user caches before the initial sync.
    last_user: Mutex<Option<String>>,
}

impl Client {
    /// Build the component graph. No network traffic happens here.
    pub fn new(config: ClientConfig, catalog: PaintCatalog) -> SyncResult<Self> {
        let api = Arc::new(ApiClient::new(config)?);
        let events = EventBus::new();
        let catalog = Arc::new(catalog);
        let session = AuthSession::new(api.clone(), events.clone());
        let images = Arc::new(ImageStore::new(api.clone()));

        let favorites = FavoritesSync::new(
            api.clone(),
            session.clone(),
            catalog.clone(),
            events.clone(),
        );
        let history = HistoryCache::new(
            api.clone(),
            session.clone(),
            images.clone(),
            events.clone(),
        );
        let reviews = ReviewService::new(api, session.clone());

        Ok(Self {
            session,
            catalog,
            favorites,
            history,
            images,
            reviews,
            events,
            last_user: Mutex::new(None),
        })
    }

    // ── Session flow ─────────────────────────────────────────────

    /// Authenticate, then run the initial favorites + history sync.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.session.login(email, password).await?;
        self.after_login(&user).await;
        Ok(user)
    }

    /// Create an account and log in with the same credentials.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        firstname: &str,
        lastname: &str,
    ) -> Result<User, AuthError> {
        self.session
            .register(email, password, firstname, lastname)
            .await?;
        let user = self
            .session
            .current_user()
            .ok_or_else(|| AuthError::RegistrationFailed("session not established".into()))?;
        self.after_login(&user).await;
        Ok(user)
    }

    /// End the session. Cached data stays in memory until the next
    /// login decides whether it belongs to the same user.
    pub fn logout(&self) {
        self.session.logout();
    }

    async fn after_login(&self, user: &User) {
        let switched = {
            let mut last = self.last_user.lock();
            let switched = last.as_deref() != Some(user.id.as_str());
            *last = Some(user.id.clone());
            switched
        };
        if switched {
            self.favorites.reset();
            self.history.reset();
        }

        // Sequential awaits in this one task; on an empty cache the
        // incremental history pass is a full fetch.
        if let Err(err) = self.favorites.refresh().await {
            tracing::warn!(error = %err, "initial favorites sync failed");
            self.events.emit(StateEvent::SyncFailed {
                component: SyncComponent::Favorites,
                reason: err.to_string(),
            });
        }
        if let Err(err) = self
            .history
            .refresh_incremental(&CancellationToken::new())
            .await
        {
            tracing::warn!(error = %err, "initial history sync failed");
            self.events.emit(StateEvent::SyncFailed {
                component: SyncComponent::History,
                reason: err.to_string(),
            });
        }
    }

    // ── Component access ─────────────────────────────────────────

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn favorites(&self) -> &FavoritesSync {
        &self.favorites
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn reviews(&self) -> &ReviewService {
        &self.reviews
    }

    pub fn catalog(&self) -> &PaintCatalog {
        &self.catalog
    }

    /// Subscribe to state-change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }
}

// ── Tests ────────────────────────────────────────────────────────
