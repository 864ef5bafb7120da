//! Signup page: name, email, phone, password.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use tokio_util::sync::CancellationToken;

use crate::app::AuthController;
use crate::components::toast::ToastBanner;
use crate::form::SignupForm;
use crate::routes::AppRoute;
use crate::state::toast::ToastState;
use crate::util::auth::install_guard;
use crate::validate::SignupField;

pub(crate) fn submit_label(submitting: bool) -> &'static str {
    if submitting { "Creating account..." } else { "Create Account" }
}

pub(crate) fn can_submit(form: &SignupForm, submitting: bool) -> bool {
    form.is_valid() && !submitting
}

/// Input `type` attribute per field.
pub(crate) fn input_type(field: SignupField) -> &'static str {
    match field {
        SignupField::Name => "text",
        SignupField::Email => "email",
        SignupField::PhoneNumber => "tel",
        SignupField::Password => "password",
    }
}

fn placeholder(field: SignupField) -> &'static str {
    match field {
        SignupField::Name => "Full name",
        SignupField::Email => "you@example.com",
        SignupField::PhoneNumber => "+15551234567",
        SignupField::Password => "Password",
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let navigate = use_navigate();
    install_guard(controller.session().clone(), false, navigate.clone());

    let form = RwSignal::new(SignupForm::signup(controller.config().policy.clone()));
    let toast = RwSignal::new(ToastState::default());
    let submitting = RwSignal::new(false);

    // Drop any in-flight signup and the pending redirect when the page unmounts.
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
        let Ok(registration) = form.with_untracked(SignupForm::try_submit) else {
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
                let outcome = controller.signup(&registration, &cancel).await;
                if cancel.is_cancelled() {
                    return;
                }
                submitting.set(false);
                toast.update(|t| outcome.apply_toast(t));
                let Some(nav) = outcome.navigation() else {
                    return;
                };
                if let Some(delay) = nav.delay {
                    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                    gloo_timers::future::TimeoutFuture::new(millis).await;
                    if cancel.is_cancelled() {
                        return;
                    }
                }
                navigate(nav.to.path(), leptos_router::NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&controller, &cancel, &navigate, registration);
            submitting.set(false);
        }
    };

    let field_view = move |field: SignupField| {
        view! {
            <input
                class="auth-input"
                type=input_type(field)
                name=field.as_str()
                placeholder=placeholder(field)
                prop:value=move || form.with(|f| f.value(field).to_owned())
                on:input=move |ev| form.update(|f| f.set_field(field, event_target_value(&ev)))
                on:blur=move |_| form.update(|f| f.blur(field))
            />
            {move || {
                form.with(|f| f.display_error(field).map(str::to_owned))
                    .map(|msg| view! { <p class="auth-error">{msg}</p> })
            }}
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <p class="auth-card__subtitle">"Book and track appointments in one place"</p>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    {SignupField::ALL.iter().map(|field| field_view(*field)).collect_view()}
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
                    "Already registered? "
                    <A href=AppRoute::Login.path()>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
