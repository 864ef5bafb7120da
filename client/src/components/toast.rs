//! Dismissible notification banner bound to a screen's [`ToastState`].

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

pub(crate) fn toast_class(kind: ToastKind) -> String {
    format!("toast toast--{}", kind.as_str())
}

#[component]
pub fn ToastBanner(toast: RwSignal<ToastState>) -> impl IntoView {
    view! {
        <Show when=move || toast.with(|t| t.visible)>
            <div class=move || toast_class(toast.with(|t| t.kind)) role="status">
                <span class="toast__message">{move || toast.with(|t| t.message.clone())}</span>
                <button
                    class="toast__dismiss"
                    type="button"
                    aria-label="Dismiss"
                    on:click=move |_| toast.update(ToastState::dismiss)
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
