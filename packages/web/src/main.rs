use dioxus::prelude::*;

use ui::{use_session, LogoutButton, SessionProvider};
use views::{Dashboard, Journal, Login};

mod guard;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/journal")]
    Journal {},
}

impl Route {
    /// Routes reachable only with a session.
    fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard {} | Route::Journal {})
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const IDENTITY_JS: Asset = asset!("/assets/identity.js");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Script { src: IDENTITY_JS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the dashboard; the guard takes it from there.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

/// Layout that applies the navigation guard on every route change and renders
/// the top bar for signed-in users.
#[component]
fn Shell() -> Element {
    let route = use_route::<Route>();
    let session = use_session();
    let navigator = use_navigator();

    match guard::check(&route, session().is_authenticated()) {
        guard::Outcome::RedirectToLogin => {
            navigator.replace(Route::Login {});
            rsx! {}
        }
        guard::Outcome::RedirectToDashboard => {
            navigator.replace(Route::Dashboard {});
            rsx! {}
        }
        guard::Outcome::Allow => rsx! {
            if session().is_authenticated() && !matches!(route, Route::Login {}) {
                header {
                    class: "topbar",
                    span { class: "topbar-brand", "Trade Journal" }
                    nav {
                        class: "topbar-links",
                        Link { to: Route::Dashboard {}, "Dashboard" }
                        Link { to: Route::Journal {}, "Journal" }
                    }
                    span {
                        class: "topbar-user",
                        if let Some(user) = session().user {
                            span { class: "topbar-user-name", "{user.display_name()}" }
                        }
                        if session().demo {
                            span { class: "topbar-demo-badge", "demo" }
                        }
                        LogoutButton { class: "topbar-logout" }
                    }
                }
            }
            main {
                class: "content",
                Outlet::<Route> {}
            }
        },
    }
}
