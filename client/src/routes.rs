//! Navigation targets the auth flow can route to.

use std::time::Duration;

/// Application routes touched by the auth screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Landing page after login.
    Home,
    Login,
    Signup,
}

impl AppRoute {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
        }
    }
}

/// A request to navigate, optionally after a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: AppRoute,
    pub delay: Option<Duration>,
}

impl Navigation {
    #[must_use]
    pub fn now(to: AppRoute) -> Self {
        Self { to, delay: None }
    }

    #[must_use]
    pub fn after(to: AppRoute, delay: Duration) -> Self {
        Self { to, delay: Some(delay) }
    }
}
