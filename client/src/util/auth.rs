//! Shared route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior based on the
//! session store: protected pages bounce to `/login`, auth pages bounce an
//! already-signed-in user home.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes::AppRoute;
use crate::state::session::SessionStore;

/// Where a guarded page should send the user, if anywhere.
#[must_use]
pub fn guard_redirect(session: &SessionStore, requires_session: bool) -> Option<AppRoute> {
    match (requires_session, session.is_authenticated()) {
        (true, false) => Some(AppRoute::Login),
        (false, true) => Some(AppRoute::Home),
        _ => None,
    }
}

/// Redirect once on mount according to [`guard_redirect`].
pub fn install_guard<F>(session: SessionStore, requires_session: bool, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(route) = guard_redirect(&session, requires_session) {
            navigate(route.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
