//! Login page: email + password against the auth endpoint.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use tokio_util::sync::CancellationToken;

use crate::app::AuthController;
use crate::components::toast::ToastBanner;
use crate::form::LoginForm;
use crate::routes::AppRoute;
use crate::state::toast::ToastState;
use crate::util::auth::install_guard;
use crate::validate::LoginField;

/// Label for the submit button.
pub(crate) fn submit_label(submitting: bool) -> &'static str {
    if submitting { "Signing in..." } else { "Sign In" }
}

/// Submit is enabled only for a valid form with nothing in flight.
pub(crate) fn can_submit(form: &LoginForm, submitting: bool) -> bool {
    form.is_valid() && !submitting
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let navigate = use_navigate();
    install_guard(controller.session().clone(), false, navigate.clone());

    let form = RwSignal::new(LoginForm::login(controller.config().policy.clone()));
    let toast = RwSignal::new(ToastState::default());
    let submitting = RwSignal::new(false);

    // Drop any in-flight login when the page unmounts.
    let cancel = CancellationToken::new();
    on_cleanup({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let Ok(credentials) = form.with_untracked(LoginForm::try_submit) else {
            return;
        };
        toast.update(ToastState::reset);
        submitting.set(true);

        #[cfg(feature = "csr")]
        {
            let controller = controller.clone();
            let cancel = cancel.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = controller.login(&credentials, &cancel).await;
                if cancel.is_cancelled() {
                    return;
                }
                submitting.set(false);
                toast.update(|t| outcome.apply_toast(t));
                if let Some(nav) = outcome.navigation() {
                    navigate(nav.to.path(), leptos_router::NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&controller, &cancel, &navigate, credentials);
            submitting.set(false);
        }
    };

    let error_for = move |field: LoginField| form.with(|f| f.display_error(field).map(str::to_owned));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Welcome back"</h1>
                <p class="auth-card__subtitle">"Sign in to manage your appointments"</p>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    <input
                        class="auth-input"
                        type="email"
                        name=LoginField::Email.as_str()
                        placeholder="you@example.com"
                        prop:value=move || form.with(|f| f.value(LoginField::Email).to_owned())
                        on:input=move |ev| form.update(|f| f.set_field(LoginField::Email, event_target_value(&ev)))
                        on:blur=move |_| form.update(|f| f.blur(LoginField::Email))
                    />
                    {move || error_for(LoginField::Email).map(|msg| view! { <p class="auth-error">{msg}</p> })}
                    <input
                        class="auth-input"
                        type="password"
                        name=LoginField::Password.as_str()
                        placeholder="Password"
                        prop:value=move || form.with(|f| f.value(LoginField::Password).to_owned())
                        on:input=move |ev| form.update(|f| f.set_field(LoginField::Password, event_target_value(&ev)))
                        on:blur=move |_| form.update(|f| f.blur(LoginField::Password))
                    />
                    {move || error_for(LoginField::Password).map(|msg| view! { <p class="auth-error">{msg}</p> })}
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || !form.with(|f| can_submit(f, submitting.get()))
                    >
                        {move || submit_label(submitting.get())}
                    </button>
                </form>
                <ToastBanner toast=toast/>
                <p class="auth-card__footer">
                    "No account yet? "
                    <A href=AppRoute::Signup.path()>"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
