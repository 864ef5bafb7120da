//! Landing page after login. Guards on the session and offers sign-out.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AuthController;
use crate::routes::AppRoute;
use crate::util::auth::install_guard;

/// Display name from the session payload, falling back to a neutral label.
pub(crate) fn greeting_name(record: Option<&crate::net::types::SessionRecord>) -> String {
    record
        .and_then(|r| r.get("name"))
        .and_then(serde_json::Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("there")
        .to_owned()
}

#[component]
pub fn HomePage() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let navigate = use_navigate();
    let session = controller.session().clone();
    install_guard(session.clone(), true, navigate.clone());

    let name = greeting_name(session.get().as_ref());

    let on_logout = move |_| {
        if let Err(e) = session.clear() {
            log::error!("logout failed: {e}");
            return;
        }
        navigate(AppRoute::Login.path(), NavigateOptions::default());
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>{format!("Hello, {name}")}</h1>
                <button class="auth-button" type="button" on:click=on_logout>
                    "Sign out"
                </button>
            </header>
        </div>
    }
}
