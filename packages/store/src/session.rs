//! # SessionStore — the authentication state machine
//!
//! Owns everything about the signed-in user: the application token, the
//! profile, the in-flight flag and the last error. One instance is
//! constructed at process start and threaded through the UI; it is the sole
//! reader and writer of durable storage, so the route guard and every view
//! consult the same in-memory state.
//!
//! ## States and transitions
//!
//! | From | Operation | To |
//! |------|-----------|----|
//! | anonymous | [`login`](SessionStore::login) — popup sign-in, then token exchange | authenticated |
//! | anonymous | [`demo_login`](SessionStore::demo_login) — local bypass, no network | authenticated (demo) |
//! | authenticated | [`logout`](SessionStore::logout) — provider sign-out unless demo | anonymous |
//! | anonymous | [`load_from_storage`](SessionStore::load_from_storage) — at startup, when both keys exist | authenticated |
//!
//! A failed `login` records a sanitized message in [`Session::error`] and
//! re-throws, leaving the session anonymous. `logout` always tears the local
//! session down, even when the provider-side sign-out fails.
//!
//! ## Persistence
//!
//! Three storage keys: [`AUTH_TOKEN_KEY`], [`AUTH_USER_KEY`] (JSON-serialized
//! profile) and [`DEMO_MODE_KEY`] (`"true"` or absent). Written on
//! login/demo-login, cleared on logout, read once at startup.
//!
//! ## Concurrency
//!
//! The browser event loop serializes everything; the internal mutex is never
//! held across an await. Two overlapping `login` calls race last-writer-wins,
//! and nothing here is cancellable; navigating away does not abort an
//! in-flight exchange.

use std::sync::Mutex;

use api::models::UserProfile;
use api::ApiError;
use thiserror::Error;

use crate::backend::Backend;
use crate::identity::{IdentityError, IdentityProvider};
use crate::storage::KeyValueStore;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const AUTH_USER_KEY: &str = "auth_user";
pub const DEMO_MODE_KEY: &str = "demo_mode";

const DEMO_EMAIL: &str = "demo@tradejournal.com";

const CONNECTIVITY_KEYWORDS: [&str; 5] =
    ["network", "timeout", "unavailable", "connection", "fetch"];
const CONNECTIVITY_MESSAGE: &str = "Connection error. Check your internet and try again.";

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
    pub demo: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Login/logout failure, re-thrown to the caller after the sanitized message
/// has been recorded in the session state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Map failures that smell like connectivity problems to a generic message;
/// anything else is surfaced verbatim.
pub fn sanitize_login_error(message: &str) -> String {
    let lowered = message.to_lowercase();
    if CONNECTIVITY_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        CONNECTIVITY_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

/// The session store. Generic over its three collaborators so the state
/// machine runs identically in the browser and in unit tests.
pub struct SessionStore<I, B, S> {
    identity: I,
    backend: B,
    storage: S,
    state: Mutex<Session>,
}

impl<I, B, S> SessionStore<I, B, S>
where
    I: IdentityProvider,
    B: Backend,
    S: KeyValueStore,
{
    pub fn new(identity: I, backend: B, storage: S) -> Self {
        Self {
            identity,
            backend,
            storage,
            state: Mutex::new(Session::default()),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.lock().unwrap().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().token.is_some()
    }

    /// Restore a persisted session. Only flips to authenticated when both the
    /// token and a parseable profile are present; anything less is treated as
    /// no session at all.
    pub fn load_from_storage(&self) {
        let token = self.storage.get(AUTH_TOKEN_KEY);
        let raw_user = self.storage.get(AUTH_USER_KEY);
        let demo = self.storage.get(DEMO_MODE_KEY).as_deref() == Some("true");

        if let (Some(token), Some(raw)) = (token, raw_user) {
            match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => {
                    let mut state = self.state.lock().unwrap();
                    state.token = Some(token);
                    state.user = Some(user);
                    state.demo = demo;
                }
                Err(err) => {
                    tracing::warn!("discarding stored profile: {err}");
                }
            }
        }
    }

    /// Interactive sign-in: identity-provider popup, then token exchange.
    ///
    /// On success the token and profile are held in memory and persisted. On
    /// failure the sanitized message lands in [`Session::error`] and the
    /// original error is returned so the caller can react too.
    pub async fn login(&self) -> Result<UserProfile, SessionError> {
        {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
        }

        let result = self.login_flow().await;

        let mut state = self.state.lock().unwrap();
        state.loading = false;
        if let Err(ref err) = result {
            state.error = Some(sanitize_login_error(&err.to_string()));
        }
        result
    }

    async fn login_flow(&self) -> Result<UserProfile, SessionError> {
        let id_token = self.identity.sign_in().await?;
        let exchange = self.backend.exchange_identity_token(&id_token).await?;

        let profile = exchange.user.clone();
        {
            let mut state = self.state.lock().unwrap();
            state.token = Some(exchange.access_token.clone());
            state.user = Some(profile.clone());
            state.demo = false;
        }

        let raw = serde_json::to_string(&profile).map_err(ApiError::from)?;
        self.storage.set(AUTH_TOKEN_KEY, &exchange.access_token);
        self.storage.set(AUTH_USER_KEY, &raw);
        self.storage.remove(DEMO_MODE_KEY);

        Ok(profile)
    }

    /// Local-only bypass: a synthesized token and a fixed profile, persisted
    /// with the demo marker. Never touches the identity provider or the
    /// backend.
    pub fn demo_login(&self) -> UserProfile {
        let token = format!("demo_token_{}", current_timestamp_ms());
        let profile = UserProfile {
            id: "demo-user".to_string(),
            email: DEMO_EMAIL.to_string(),
            name: Some("Demo Trader".to_string()),
            picture: None,
        };

        {
            let mut state = self.state.lock().unwrap();
            state.token = Some(token.clone());
            state.user = Some(profile.clone());
            state.demo = true;
            state.error = None;
        }

        self.storage.set(AUTH_TOKEN_KEY, &token);
        if let Ok(raw) = serde_json::to_string(&profile) {
            self.storage.set(AUTH_USER_KEY, &raw);
        }
        self.storage.set(DEMO_MODE_KEY, "true");

        profile
    }

    /// Sign out. The provider is only contacted for real sessions; the local
    /// session and all three storage keys are cleared either way.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let demo = {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.demo
        };

        let result = if demo {
            Ok(())
        } else {
            self.identity
                .sign_out()
                .await
                .map_err(SessionError::Identity)
        };

        {
            let mut state = self.state.lock().unwrap();
            state.token = None;
            state.user = None;
            state.demo = false;
            state.loading = false;
            if let Err(ref err) = result {
                state.error = Some(err.to_string());
            }
        }

        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(AUTH_USER_KEY);
        self.storage.remove(DEMO_MODE_KEY);

        result
    }

    /// Drop the last error without touching the authentication state.
    pub fn clear_error(&self) {
        self.state.lock().unwrap().error = None;
    }
}

fn current_timestamp_ms() -> u64 {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Identity double that hands out a fixed token and counts sign-outs.
    #[derive(Clone, Default)]
    struct FakeIdentity {
        sign_outs: Arc<AtomicUsize>,
    }

    impl IdentityProvider for FakeIdentity {
        async fn sign_in(&self) -> Result<String, IdentityError> {
            Ok("id-token-1".to_string())
        }

        async fn sign_out(&self) -> Result<(), IdentityError> {
            self.sign_outs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Identity double whose sign-in always fails with the given message.
    struct BrokenIdentity(&'static str);

    impl IdentityProvider for BrokenIdentity {
        async fn sign_in(&self) -> Result<String, IdentityError> {
            Err(IdentityError(self.0.to_string()))
        }

        async fn sign_out(&self) -> Result<(), IdentityError> {
            Err(IdentityError(self.0.to_string()))
        }
    }

    fn store_with(
        identity: FakeIdentity,
        storage: MemoryStore,
    ) -> SessionStore<FakeIdentity, MemoryBackend, MemoryStore> {
        SessionStore::new(identity, MemoryBackend::new(), storage)
    }

    #[tokio::test]
    async fn login_persists_token_and_profile() {
        let storage = MemoryStore::new();
        let store = store_with(FakeIdentity::default(), storage.clone());

        let profile = store.login().await.unwrap();
        assert_eq!(profile.email, "trader@example.com");

        let session = store.snapshot();
        assert!(session.is_authenticated());
        assert!(!session.loading);
        assert!(session.error.is_none());
        assert!(!session.demo);

        assert_eq!(storage.get(AUTH_TOKEN_KEY).as_deref(), Some("access-id-token-1"));
        let raw = storage.get(AUTH_USER_KEY).unwrap();
        let stored: UserProfile = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, profile);
        assert!(storage.get(DEMO_MODE_KEY).is_none());
    }

    #[tokio::test]
    async fn failed_login_records_sanitized_error_and_rethrows() {
        let storage = MemoryStore::new();
        let store = SessionStore::new(
            BrokenIdentity("Network request failed"),
            MemoryBackend::new(),
            storage.clone(),
        );

        let err = store.login().await.unwrap_err();
        assert!(err.to_string().contains("Network request failed"));

        let session = store.snapshot();
        assert!(!session.is_authenticated());
        assert!(!session.loading);
        assert_eq!(session.error.as_deref(), Some(CONNECTIVITY_MESSAGE));
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn non_connectivity_errors_surface_verbatim() {
        let store = SessionStore::new(
            BrokenIdentity("popup closed by user"),
            MemoryBackend::new(),
            MemoryStore::new(),
        );

        store.login().await.unwrap_err();
        assert_eq!(
            store.snapshot().error.as_deref(),
            Some("popup closed by user")
        );
    }

    #[tokio::test]
    async fn demo_login_is_local_only() {
        let storage = MemoryStore::new();
        let store = store_with(FakeIdentity::default(), storage.clone());

        let profile = store.demo_login();
        assert_eq!(profile.email, DEMO_EMAIL);

        let session = store.snapshot();
        assert!(session.is_authenticated());
        assert!(session.demo);
        assert!(session.token.as_deref().unwrap().starts_with("demo_token_"));

        assert_eq!(storage.get(DEMO_MODE_KEY).as_deref(), Some("true"));
        let stored: UserProfile =
            serde_json::from_str(&storage.get(AUTH_USER_KEY).unwrap()).unwrap();
        assert_eq!(stored.email, DEMO_EMAIL);
    }

    #[tokio::test]
    async fn logout_after_demo_skips_provider_sign_out() {
        let identity = FakeIdentity::default();
        let storage = MemoryStore::new();
        let store = store_with(identity.clone(), storage.clone());

        store.demo_login();
        store.logout().await.unwrap();

        assert_eq!(identity.sign_outs.load(Ordering::SeqCst), 0);
        assert!(!store.is_authenticated());
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());
        assert!(storage.get(AUTH_USER_KEY).is_none());
        assert!(storage.get(DEMO_MODE_KEY).is_none());
    }

    #[tokio::test]
    async fn logout_clears_storage_for_real_sessions() {
        let identity = FakeIdentity::default();
        let storage = MemoryStore::new();
        let store = store_with(identity.clone(), storage.clone());

        store.login().await.unwrap();
        store.logout().await.unwrap();

        assert_eq!(identity.sign_outs.load(Ordering::SeqCst), 1);
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());
        assert!(storage.get(AUTH_USER_KEY).is_none());
        assert!(storage.get(DEMO_MODE_KEY).is_none());
    }

    #[tokio::test]
    async fn logout_tears_down_even_when_sign_out_fails() {
        let storage = MemoryStore::new();
        let store = SessionStore::new(
            BrokenIdentity("unavailable"),
            MemoryBackend::new(),
            storage.clone(),
        );
        // Seed a restored (non-demo) session.
        storage.set(AUTH_TOKEN_KEY, "tok1");
        storage.set(AUTH_USER_KEY, r#"{"id":"u1"}"#);
        store.load_from_storage();
        assert!(store.is_authenticated());

        let err = store.logout().await;
        assert!(err.is_err());
        assert!(!store.is_authenticated());
        assert!(storage.get(AUTH_TOKEN_KEY).is_none());
        assert!(storage.get(AUTH_USER_KEY).is_none());
    }

    #[test]
    fn load_from_storage_requires_both_keys() {
        let storage = MemoryStore::new();
        storage.set(AUTH_TOKEN_KEY, "tok1");
        let store = store_with(FakeIdentity::default(), storage.clone());
        store.load_from_storage();
        assert!(!store.is_authenticated());

        storage.set(AUTH_USER_KEY, r#"{"id":"u1","email":"u1@example.com"}"#);
        let store = store_with(FakeIdentity::default(), storage);
        store.load_from_storage();
        let session = store.snapshot();
        assert!(session.is_authenticated());
        assert_eq!(session.user.unwrap().id, "u1");
    }

    #[test]
    fn corrupt_stored_profile_stays_anonymous() {
        let storage = MemoryStore::new();
        storage.set(AUTH_TOKEN_KEY, "tok1");
        storage.set(AUTH_USER_KEY, "{not json");
        let store = store_with(FakeIdentity::default(), storage);
        store.load_from_storage();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn load_from_storage_restores_demo_flag() {
        let storage = MemoryStore::new();
        storage.set(AUTH_TOKEN_KEY, "demo_token_1");
        storage.set(AUTH_USER_KEY, r#"{"id":"demo-user"}"#);
        storage.set(DEMO_MODE_KEY, "true");
        let store = store_with(FakeIdentity::default(), storage);
        store.load_from_storage();
        assert!(store.snapshot().demo);
    }

    #[test]
    fn clear_error_keeps_authentication_state() {
        let store = store_with(FakeIdentity::default(), MemoryStore::new());
        store.demo_login();
        store.state.lock().unwrap().error = Some("boom".to_string());

        store.clear_error();
        let session = store.snapshot();
        assert!(session.error.is_none());
        assert!(session.is_authenticated());
    }

    #[test]
    fn sanitizer_matches_connectivity_keywords_case_insensitively() {
        for message in [
            "Firebase: Network error",
            "TIMEOUT while contacting server",
            "service unavailable",
            "lost Connection",
            "Failed to fetch",
        ] {
            assert_eq!(sanitize_login_error(message), CONNECTIVITY_MESSAGE);
        }
        assert_eq!(
            sanitize_login_error("invalid credentials"),
            "invalid credentials"
        );
    }
}
