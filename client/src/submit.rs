//! Submission controller for the login and signup flows.
//!
//! DESIGN
//! ======
//! `Idle -> Submitting -> {SuccessNavigate | SuccessDelayedNavigate | Error} -> Idle`.
//! Each submit is a future the screen awaits. The controller validates, calls
//! the endpoint at most once per submit, writes the session on login
//! success, and hands back a [`SubmitOutcome`] for the screen to apply.
//!
//! A submit that arrives while another is outstanding is dropped, not
//! queued. The in-flight flag is released by a guard, so it also resets when
//! the future is dropped or the submit is cancelled.
//!
//! ERROR HANDLING
//! ==============
//! Server rejections surface their message verbatim. Everything else
//! (transport, malformed replies, session persistence) shows one generic
//! message; the cause goes to the log only.

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::{Either, select};
use tokio_util::sync::CancellationToken;

use crate::config::FlowConfig;
use crate::net::api::{AuthApi, TransportError};
use crate::net::types::{ApiErrorBody, Credentials, LoginResponse, Registration, SignupResponse, error_message};
use crate::routes::{AppRoute, Navigation};
use crate::state::session::{SessionError, SessionStore};
use crate::state::toast::{Toast, ToastState};
use crate::validate::{FieldErrors, LoginField, SignupField, validate_credentials, validate_registration};

/// Shown for every failure that is not a server rejection.
pub const GENERIC_ERROR: &str = "Something went wrong";
pub const SIGNUP_SUCCESS: &str = "User Successfully Created";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The server rejected the request with a message for the user.
    #[error("rejected by server: {0}")]
    Application(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The reply parsed but broke the envelope contract.
    #[error("malformed response: {0}")]
    Malformed(&'static str),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl SubmitError {
    /// Text for the notification channel.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Application(message) => message,
            Self::Transport(_) | Self::Malformed(_) | Self::Session(_) => GENERIC_ERROR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

/// What a submit produced, for the screen to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome<F> {
    /// Validation failed; no request was sent.
    Rejected(FieldErrors<F>),
    /// Another submit was outstanding; this one was dropped.
    Ignored,
    /// The cancel token fired before the reply arrived.
    Cancelled,
    /// Login succeeded and the session is stored.
    SuccessNavigate { navigation: Navigation },
    /// Signup succeeded; announce it, then navigate after the delay.
    SuccessDelayedNavigate { toast: Toast, navigation: Navigation },
    Error { toast: Toast },
}

impl<F> SubmitOutcome<F> {
    #[must_use]
    pub fn toast(&self) -> Option<&Toast> {
        match self {
            Self::SuccessDelayedNavigate { toast, .. } | Self::Error { toast } => Some(toast),
            Self::Rejected(_) | Self::Ignored | Self::Cancelled | Self::SuccessNavigate { .. } => None,
        }
    }

    #[must_use]
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::SuccessNavigate { navigation } | Self::SuccessDelayedNavigate { navigation, .. } => Some(*navigation),
            Self::Rejected(_) | Self::Ignored | Self::Cancelled | Self::Error { .. } => None,
        }
    }

    /// Show this outcome's notification, if it has one.
    pub fn apply_toast(&self, state: &mut ToastState) {
        if let Some(toast) = self.toast() {
            state.show_toast(toast.clone());
        }
    }

    fn from_result(flow: &str, result: Result<Self, SubmitError>) -> Self {
        result.unwrap_or_else(|err| {
            log_failure(flow, &err);
            Self::Error { toast: Toast::error(err.user_message()) }
        })
    }
}

/// Drives login and signup submissions against an [`AuthApi`].
pub struct SubmissionController<A: ?Sized> {
    api: Arc<A>,
    session: SessionStore,
    config: FlowConfig,
    in_flight: Arc<AtomicBool>,
}

impl<A: ?Sized> Clone for SubmissionController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: self.session.clone(),
            config: self.config.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<A: AuthApi + ?Sized> SubmissionController<A> {
    #[must_use]
    pub fn new(api: Arc<A>, session: SessionStore, config: FlowConfig) -> Self {
        Self { api, session, config, in_flight: Arc::new(AtomicBool::new(false)) }
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        if self.is_submitting() { SubmitPhase::Submitting } else { SubmitPhase::Idle }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Submit credentials (trimmed first); on success the session is stored and the outcome
    /// navigates home.
    pub async fn login(&self, credentials: &Credentials, cancel: &CancellationToken) -> SubmitOutcome<LoginField> {
        let credentials = &credentials.normalized();
        let errors = validate_credentials(credentials, &self.config.policy);
        if !errors.is_empty() {
            return SubmitOutcome::Rejected(errors);
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            log::debug!("login already in flight; dropping submit");
            return SubmitOutcome::Ignored;
        };
        let Some(reply) = until_cancelled(self.api.login(credentials), cancel).await else {
            log::info!("login cancelled");
            return SubmitOutcome::Cancelled;
        };
        SubmitOutcome::from_result("login", self.finish_login(reply))
    }

    /// Submit a registration (trimmed first); on success the outcome announces it and
    /// navigates to login after the configured delay.
    pub async fn signup(&self, registration: &Registration, cancel: &CancellationToken) -> SubmitOutcome<SignupField> {
        let registration = &registration.normalized();
        let errors = validate_registration(registration, &self.config.policy);
        if !errors.is_empty() {
            return SubmitOutcome::Rejected(errors);
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            log::debug!("signup already in flight; dropping submit");
            return SubmitOutcome::Ignored;
        };
        let Some(reply) = until_cancelled(self.api.signup(registration), cancel).await else {
            log::info!("signup cancelled");
            return SubmitOutcome::Cancelled;
        };
        SubmitOutcome::from_result("signup", self.finish_signup(reply))
    }

    fn finish_login(
        &self,
        reply: Result<LoginResponse, TransportError>,
    ) -> Result<SubmitOutcome<LoginField>, SubmitError> {
        let response = reply?;
        if !response.status {
            return Err(rejection(response.error.as_ref()));
        }
        let record = response.data.ok_or(SubmitError::Malformed("login succeeded without session data"))?;
        self.session.set(record)?;
        log::info!("login succeeded");
        Ok(SubmitOutcome::SuccessNavigate { navigation: Navigation::now(AppRoute::Home) })
    }

    fn finish_signup(
        &self,
        reply: Result<SignupResponse, TransportError>,
    ) -> Result<SubmitOutcome<SignupField>, SubmitError> {
        let response = reply?;
        if !response.status {
            return Err(rejection(response.error.as_ref()));
        }
        log::info!("signup succeeded");
        Ok(SubmitOutcome::SuccessDelayedNavigate {
            toast: Toast::success(SIGNUP_SUCCESS),
            navigation: Navigation::after(AppRoute::Login, self.config.signup_redirect_delay),
        })
    }
}

fn rejection(error: Option<&ApiErrorBody>) -> SubmitError {
    match error_message(error) {
        Some(message) => SubmitError::Application(message.to_owned()),
        None => SubmitError::Malformed("rejection without message"),
    }
}

fn log_failure(flow: &str, err: &SubmitError) {
    match err {
        SubmitError::Application(message) => log::info!("{flow} rejected: {message}"),
        SubmitError::Transport(cause) => log::error!("{flow} transport failure: {cause:?}"),
        SubmitError::Malformed(what) => log::error!("{flow} malformed response: {what}"),
        SubmitError::Session(cause) => log::error!("{flow} session not persisted: {cause}"),
    }
}

/// Holds the in-flight flag for the duration of one submit.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Run `fut` unless `cancel` fires first.
async fn until_cancelled<T>(fut: impl Future<Output = T>, cancel: &CancellationToken) -> Option<T> {
    if cancel.is_cancelled() {
        return None;
    }
    let fut = std::pin::pin!(fut);
    let cancelled = std::pin::pin!(cancel.cancelled());
    match select(fut, cancelled).await {
        Either::Left((out, _)) => Some(out),
        Either::Right(((), _)) => None,
    }
}
