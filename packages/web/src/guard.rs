//! Navigation guard.
//!
//! A pure function of the target route and the in-memory session. The
//! session store is the only reader of durable storage, so there is exactly
//! one source of truth for "is someone signed in". Evaluated by the `Shell`
//! layout on every navigation.

use crate::Route;

/// What the router should do with an attempted navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

pub fn check(route: &Route, authenticated: bool) -> Outcome {
    if route.requires_auth() && !authenticated {
        Outcome::RedirectToLogin
    } else if matches!(route, Route::Login {}) && authenticated {
        Outcome::RedirectToDashboard
    } else {
        Outcome::Allow
    }
}
