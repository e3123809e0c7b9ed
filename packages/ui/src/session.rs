//! Session context and hooks for the UI.

use std::sync::Arc;

use api::models::UserProfile;
use dioxus::prelude::*;
use store::{Session, SessionError};

use crate::platform::{make_session, AppSessionStore};

/// Get the current session state. The signal updates on login and logout.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the action handle bound to the store created by [`SessionProvider`].
pub fn use_session_actions() -> SessionActions {
    use_context::<SessionActions>()
}

/// Session operations that keep the context signal in sync with the store.
#[derive(Clone)]
pub struct SessionActions {
    store: Arc<AppSessionStore>,
    state: Signal<Session>,
}

impl SessionActions {
    fn sync(&mut self) {
        self.state.set(self.store.snapshot());
    }

    pub async fn login(&mut self) -> Result<UserProfile, SessionError> {
        let result = self.store.login().await;
        self.sync();
        result
    }

    pub fn demo_login(&mut self) -> UserProfile {
        let profile = self.store.demo_login();
        self.sync();
        profile
    }

    pub async fn logout(&mut self) -> Result<(), SessionError> {
        let result = self.store.logout().await;
        self.sync();
        result
    }

    pub fn clear_error(&mut self) {
        self.store.clear_error();
        self.sync();
    }
}

/// Provider component that owns the session store for the whole app.
///
/// Restores any persisted session synchronously, before children render, so
/// the route guard's first decision already sees the restored state.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let store = use_hook(|| {
        let store = make_session();
        store.load_from_storage();
        store
    });

    let state = use_signal({
        let store = store.clone();
        move || store.snapshot()
    });
    use_context_provider(|| state);
    use_context_provider(|| SessionActions { store, state });

    rsx! {
        {children}
    }
}

/// Button that runs the interactive sign-in flow.
#[component]
pub fn LoginButton(
    #[props(default = "Continue with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let actions = use_session_actions();
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let mut actions = actions.clone();
        async move {
            loading.set(true);
            if let Err(err) = actions.login().await {
                tracing::error!("sign-in failed: {err}");
            }
            loading.set(false);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            if loading() {
                "Signing in..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button for the local demo bypass: no popup, no network.
#[component]
pub fn DemoLoginButton(
    #[props(default = "Try the demo".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let actions = use_session_actions();

    let onclick = move |_| {
        let mut actions = actions.clone();
        actions.demo_login();
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

/// Button that signs the current user out and returns to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let actions = use_session_actions();

    let onclick = move |_| {
        let mut actions = actions.clone();
        async move {
            if let Err(err) = actions.logout().await {
                tracing::error!("sign-out failed: {err}");
            }
            // The local session is gone either way.
            #[cfg(target_arch = "wasm32")]
            {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
