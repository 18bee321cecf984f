#![forbid(unsafe_code)]

//! Chroma client core.
//!
//! Session, favorites and history-cache synchronization for the Chroma
//! paint-visualizer app. The mobile shells (Android/iOS bridges) link
//! against this crate and drive it through [`Client`]; screen layout,
//! camera capture and the recoloring pipeline live elsewhere.
//!
//! ## Architecture
//! - [`client::Client`]: facade that wires one HTTP client, one
//!   [`session::AuthSession`] and the sync components around a shared
//!   event bus.
//! - [`favorites::FavoritesSync`]: local view of liked paints,
//!   reconciled by full refresh after every mutation.
//! - [`history::HistoryCache`]: incrementally synced map of history
//!   entries (base photo + rendered variants); fetch cost scales with
//!   what is *new*, not with total history size.
//! - [`images::ImageStore`]: raw byte fetches, no policy.
//! - [`reviews::ReviewService`]: uncached review round trips.
//! - [`events`]: broadcast [`StateEvent`]s for any UI framework.
//!
//! All remote failures surface as the typed errors in [`error`];
//! nothing here is fatal to the process and every operation is safe to
//! retry.

pub(crate) mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod favorites;
pub mod history;
pub mod images;
pub mod model;
pub mod reviews;
pub mod session;

pub use catalog::PaintCatalog;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{AuthError, FetchError, SyncError, SyncResult};
pub use events::{StateEvent, SyncComponent};
pub use model::{HistoryEntry, Hsl, Paint, PaintColor, Review, Revision, Rgb, Token, User};
pub use session::AuthSession;
