//! # store crate — client-side state for the Trade Journal
//!
//! Holds everything between the UI and the REST client: the session store
//! (authentication state machine plus durable persistence), one resource
//! store per collection (trades, tags, day journal), and the seams they are
//! built on: [`Backend`] for the remote store, [`KeyValueStore`] for durable
//! local storage, [`IdentityProvider`] for interactive sign-in. Each seam has
//! an in-memory implementation so every store is testable without a browser
//! or a network.

pub mod backend;
pub mod identity;
pub mod journal;
pub mod session;
pub mod storage;
pub mod tags;
pub mod trades;

pub use backend::{Backend, MemoryBackend, TagKind};
pub use identity::{IdentityError, IdentityProvider, UnsupportedIdentity};
pub use journal::JournalStore;
pub use session::{
    Session, SessionError, SessionStore, AUTH_TOKEN_KEY, AUTH_USER_KEY, DEMO_MODE_KEY,
};
pub use storage::{KeyValueStore, MemoryStore};
pub use tags::TagStore;
pub use trades::TradeStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod google;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use google::{GoogleIdentity, IdentityConfig};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;
