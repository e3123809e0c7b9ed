//! Platform wiring: which storage and identity implementations back the
//! stores on each target.
//!
//! - **Web** (WASM + `web` feature): `localStorage` persistence and the
//!   Google popup flow.
//! - **Everything else** (native unit tests, tooling): in-memory storage and
//!   an identity provider that refuses to sign in.

use std::sync::Arc;

use api::ApiClient;
use store::{JournalStore, SessionStore, TagKind, TagStore, TradeStore};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformIdentity = store::GoogleIdentity;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformIdentity = store::UnsupportedIdentity;

pub type AppSessionStore = SessionStore<PlatformIdentity, ApiClient, PlatformStorage>;
pub type AppTradeStore = TradeStore<ApiClient>;
pub type AppTagStore = TagStore<ApiClient>;
pub type AppJournalStore = JournalStore<ApiClient>;

/// The session store for this platform. Constructed once by
/// [`SessionProvider`](crate::SessionProvider).
pub fn make_session() -> Arc<AppSessionStore> {
    Arc::new(SessionStore::new(
        PlatformIdentity::default(),
        ApiClient::new(),
        PlatformStorage::default(),
    ))
}

pub fn make_trades() -> Arc<AppTradeStore> {
    Arc::new(TradeStore::new(ApiClient::new()))
}

pub fn make_tags(kind: TagKind) -> Arc<AppTagStore> {
    Arc::new(TagStore::new(kind, ApiClient::new()))
}

pub fn make_journal() -> Arc<AppJournalStore> {
    Arc::new(JournalStore::new(ApiClient::new()))
}
