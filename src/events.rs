//! State-change events for reactive UIs.
//!
//! The cache and session components publish [`StateEvent`]s on a
//! broadcast bus; any UI framework (or test) subscribes without the
//! core knowing about it. Events are serializable so mobile bridges can
//! forward them across the FFI boundary as JSON.

use crate::model::User;
use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 64;

/// Which sync component an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncComponent {
    Favorites,
    History,
}

/// A state change observable by the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// A session was established; `user` is the new session owner.
    LoggedIn { user: User },
    /// The session ended; dependent data should be treated as stale.
    LoggedOut,
    /// The favorites set was replaced with a fresh remote snapshot.
    FavoritesRefreshed { count: usize },
    /// A history pass completed; `added` entries were fetched.
    HistoryRefreshed { added: usize },
    /// A background sync failed; previously displayed data is intact.
    SyncFailed {
        component: SyncComponent,
        reason: String,
    },
}

/// Broadcast bus shared by one client's components.
#[derive(Clone)]
pub(crate) struct EventBus {
    tx: broadcast::Sender<StateEvent>,
}

impl EventBus {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Subscribe to state changes. Slow subscribers miss (not block)
    /// events once their buffer overflows.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. A bus with no subscribers is fine.
    pub(crate) fn emit(&self, event: StateEvent) {
        let _ = self.tx.send(event);
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(StateEvent::FavoritesRefreshed { count: 4 });

        match rx.recv().await.unwrap() {
            StateEvent::FavoritesRefreshed { count } => assert_eq!(count, 4),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn emit_without_subscribers_does_not_panic() {
        let bus = EventBus::new();
        bus.emit(StateEvent::LoggedOut);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&StateEvent::SyncFailed {
            component: SyncComponent::History,
            reason: "network failure".into(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"sync_failed""#));
        assert!(json.contains(r#""component":"history""#));
    }
}
