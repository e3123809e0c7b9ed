//! Login page: provider sign-in, demo bypass, and the last auth error.

use dioxus::prelude::*;
use ui::{use_session, use_session_actions, DemoLoginButton, LoginButton};

#[component]
pub fn Login() -> Element {
    let session = use_session();
    let actions = use_session_actions();

    rsx! {
        div {
            class: "login-container",

            h1 { class: "login-title", "Trade Journal" }
            p {
                class: "login-subtitle",
                "Record your trades, emotions and confirmations."
            }

            if let Some(error) = session().error {
                div {
                    class: "login-error",
                    span { "{error}" }
                    button {
                        class: "login-error-dismiss",
                        onclick: {
                            let actions = actions.clone();
                            move |_| {
                                let mut actions = actions.clone();
                                actions.clear_error();
                            }
                        },
                        "\u{2715}"
                    }
                }
            }

            div {
                class: "login-buttons",
                LoginButton { class: "login-btn google-btn" }
                DemoLoginButton { class: "login-btn demo-btn" }
            }

            p {
                class: "login-hint",
                "The demo skips sign-in entirely. No account needed."
            }
        }
    }
}
