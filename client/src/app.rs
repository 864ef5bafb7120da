//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::FlowConfig;
use crate::net::api::BrowserAuthApi;
use crate::pages::{home::HomePage, login::LoginPage, signup::SignupPage};
use crate::state::session::SessionStore;
use crate::submit::SubmissionController;
use crate::util::storage::LocalStorage;

/// Controller type the screens pull from context.
pub type AuthController = SubmissionController<BrowserAuthApi>;

/// Wire the session store and controller for the browser.
#[must_use]
pub fn browser_controller(config: FlowConfig) -> AuthController {
    let session = SessionStore::restore(Arc::new(LocalStorage), config.storage_key.clone());
    let api = Arc::new(BrowserAuthApi::new(config.api_base_url.clone()));
    SubmissionController::new(api, session, config)
}

/// Root application component.
///
/// Provides the auth controller (and through it the session store) and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(browser_controller(FlowConfig::default()));

    view! {
        <Title text="Appointments"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
            </Routes>
        </Router>
    }
}
