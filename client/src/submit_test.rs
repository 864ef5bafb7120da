use super::*;
use crate::state::toast::ToastKind;
use crate::util::storage::{MemoryStorage, SessionStorage, StorageError};
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;
use tokio::sync::Notify;

// =============================================================
// Helpers
// =============================================================

/// Scripted endpoint. `Ok` replies are envelope JSON; `Err` is a transport
/// failure with that cause.
struct MockApi {
    reply: Result<serde_json::Value, String>,
    gate: Option<Arc<Notify>>,
    login_calls: AtomicUsize,
    signup_calls: AtomicUsize,
    /// JSON body of the most recent request.
    sent: Mutex<Option<serde_json::Value>>,
}

impl MockApi {
    fn replying(reply: serde_json::Value) -> Self {
        Self {
            reply: Ok(reply),
            gate: None,
            login_calls: AtomicUsize::new(0),
            signup_calls: AtomicUsize::new(0),
            sent: Mutex::new(None),
        }
    }

    fn failing(cause: &str) -> Self {
        Self { reply: Err(cause.to_owned()), ..Self::replying(serde_json::Value::Null) }
    }

    fn record(&self, body: &impl serde::Serialize) {
        *self.sent.lock().unwrap() = serde_json::to_value(body).ok();
    }

    fn sent(&self) -> Option<serde_json::Value> {
        self.sent.lock().unwrap().clone()
    }

    /// Hold every reply until `gate` is notified.
    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    async fn respond<T: serde::de::DeserializeOwned>(&self) -> Result<T, TransportError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Ok(value) => serde_json::from_value(value.clone()).map_err(|e| TransportError::Parse(e.to_string())),
            Err(cause) => Err(TransportError::Request(cause.clone())),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.record(credentials);
        self.respond().await
    }

    async fn signup(&self, registration: &Registration) -> Result<SignupResponse, TransportError> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);
        self.record(registration);
        self.respond().await
    }
}

struct BrokenStorage;

impl SessionStorage for BrokenStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

fn controller(api: MockApi) -> (SubmissionController<MockApi>, Arc<MockApi>) {
    let api = Arc::new(api);
    let session = SessionStore::new(Arc::new(MemoryStorage::new()), "user");
    (SubmissionController::new(api.clone(), session, FlowConfig::default()), api)
}

fn credentials() -> Credentials {
    Credentials { email: "ada@example.com".to_owned(), password: "hunter22".to_owned() }
}

fn registration() -> Registration {
    Registration {
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        phone_number: "+15551234567".to_owned(),
        password: "hunter22".to_owned(),
    }
}

// =============================================================
// Validation gate
// =============================================================

#[tokio::test]
async fn invalid_login_is_rejected_without_a_call() {
    let (ctl, api) = controller(MockApi::replying(serde_json::json!({"status": true, "data": {}})));
    let creds = Credentials { email: String::new(), password: "hunter22".to_owned() };

    let outcome = ctl.login(&creds, &CancellationToken::new()).await;

    match outcome {
        SubmitOutcome::Rejected(errors) => assert!(errors.contains_key(&LoginField::Email)),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctl.phase(), SubmitPhase::Idle);
}

#[tokio::test]
async fn invalid_signup_is_rejected_without_a_call() {
    let (ctl, api) = controller(MockApi::replying(serde_json::json!({"status": true})));
    let mut reg = registration();
    reg.phone_number = "+1".to_owned();

    let outcome = ctl.signup(&reg, &CancellationToken::new()).await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.contains_key(&SignupField::PhoneNumber)));
    assert_eq!(api.signup_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn padded_signup_from_form_is_sent_trimmed() {
    let (ctl, api) = controller(MockApi::replying(serde_json::json!({"status": true})));
    let mut form = crate::form::SignupForm::signup(ctl.config().policy.clone());
    form.set_field(SignupField::Name, "Ada");
    form.set_field(SignupField::Email, " ada@example.com ");
    form.set_field(SignupField::PhoneNumber, " +15551234567 ");
    form.set_field(SignupField::Password, "hunter22");
    let record = form.try_submit().unwrap();

    let outcome = ctl.signup(&record, &CancellationToken::new()).await;

    assert!(matches!(outcome, SubmitOutcome::SuccessDelayedNavigate { .. }));
    assert_eq!(
        api.sent(),
        Some(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phoneNumber": "+15551234567",
            "password": "hunter22",
        }))
    );
}

#[tokio::test]
async fn controller_trims_padded_login_it_is_handed_directly() {
    let (ctl, api) =
        controller(MockApi::replying(serde_json::json!({"status": true, "data": {"token": "abc"}})));
    let creds = Credentials { email: "  ada@example.com\t".to_owned(), password: "hunter22".to_owned() };

    let outcome = ctl.login(&creds, &CancellationToken::new()).await;

    assert!(matches!(outcome, SubmitOutcome::SuccessNavigate { .. }));
    assert_eq!(api.sent(), Some(serde_json::json!({"email": "ada@example.com", "password": "hunter22"})));
}

// =============================================================
// Login
// =============================================================

#[tokio::test]
async fn login_success_stores_session_and_navigates_home_once() {
    let (ctl, api) = controller(MockApi::replying(serde_json::json!({"status": true, "data": {"token": "abc"}})));

    let outcome = ctl.login(&credentials(), &CancellationToken::new()).await;

    assert_eq!(outcome, SubmitOutcome::SuccessNavigate { navigation: Navigation::now(AppRoute::Home) });
    assert_eq!(outcome.navigation().map(|n| n.to.path()), Some("/"));
    assert_eq!(outcome.toast(), None);
    assert_eq!(ctl.session().get().and_then(|r| r.token().map(str::to_owned)), Some("abc".to_owned()));
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
    assert!(!ctl.is_submitting());
}

#[tokio::test]
async fn login_rejection_surfaces_server_message() {
    let (ctl, _api) =
        controller(MockApi::replying(serde_json::json!({"status": false, "error": {"message": "Invalid credentials"}})));

    let outcome = ctl.login(&credentials(), &CancellationToken::new()).await;

    let mut toast = ToastState::default();
    outcome.apply_toast(&mut toast);
    assert_eq!(toast.message, "Invalid credentials");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(outcome.navigation(), None);
    assert!(!ctl.session().is_authenticated());
}

#[tokio::test]
async fn login_success_without_data_is_generic_error() {
    let (ctl, _api) = controller(MockApi::replying(serde_json::json!({"status": true})));

    let outcome = ctl.login(&credentials(), &CancellationToken::new()).await;

    assert_eq!(outcome, SubmitOutcome::Error { toast: Toast::error(GENERIC_ERROR) });
    assert!(!ctl.session().is_authenticated());
}

#[tokio::test]
async fn login_with_unwritable_storage_does_not_navigate() {
    let api = Arc::new(MockApi::replying(serde_json::json!({"status": true, "data": {"token": "abc"}})));
    let session = SessionStore::new(Arc::new(BrokenStorage), "user");
    let ctl = SubmissionController::new(api, session, FlowConfig::default());

    let outcome = ctl.login(&credentials(), &CancellationToken::new()).await;

    assert_eq!(outcome, SubmitOutcome::Error { toast: Toast::error(GENERIC_ERROR) });
    assert!(!ctl.session().is_authenticated());
}

#[tokio::test]
async fn transport_failure_shows_generic_message() {
    let (ctl, _api) = controller(MockApi::failing("connection refused"));

    let outcome = ctl.login(&credentials(), &CancellationToken::new()).await;

    let mut toast = ToastState::default();
    outcome.apply_toast(&mut toast);
    assert_eq!(toast.message, "Something went wrong");
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.visible);
    assert!(!ctl.is_submitting());
}

// =============================================================
// Signup
// =============================================================

#[tokio::test]
async fn signup_success_announces_and_delays_navigation() {
    let (ctl, _api) = controller(MockApi::replying(serde_json::json!({"status": true})));

    let outcome = ctl.signup(&registration(), &CancellationToken::new()).await;

    assert_eq!(
        outcome,
        SubmitOutcome::SuccessDelayedNavigate {
            toast: Toast::success(SIGNUP_SUCCESS),
            navigation: Navigation::after(AppRoute::Login, Duration::from_millis(1500)),
        }
    );
    assert!(!ctl.session().is_authenticated());
}

#[tokio::test]
async fn signup_rejection_shows_server_message_without_navigation() {
    let (ctl, _api) =
        controller(MockApi::replying(serde_json::json!({"status": false, "error": {"message": "User exists"}})));

    let outcome = ctl.signup(&registration(), &CancellationToken::new()).await;

    let mut toast = ToastState::default();
    outcome.apply_toast(&mut toast);
    assert_eq!(toast.message, "User exists");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(outcome.navigation(), None);
}

#[tokio::test]
async fn signup_rejection_without_message_is_generic() {
    let (ctl, _api) = controller(MockApi::replying(serde_json::json!({"status": false})));

    let outcome = ctl.signup(&registration(), &CancellationToken::new()).await;

    assert_eq!(outcome.toast(), Some(&Toast::error(GENERIC_ERROR)));
}

// =============================================================
// Re-entry and cancellation
// =============================================================

#[tokio::test]
async fn second_submit_while_pending_is_dropped() {
    let gate = Arc::new(Notify::new());
    let (ctl, api) = controller(
        MockApi::replying(serde_json::json!({"status": true, "data": {"token": "abc"}})).gated(gate.clone()),
    );
    let token = CancellationToken::new();
    let creds = credentials();

    let first = ctl.login(&creds, &token);
    let second = async {
        let outcome = ctl.login(&creds, &token).await;
        assert_eq!(ctl.phase(), SubmitPhase::Submitting);
        gate.notify_one();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert!(matches!(first, SubmitOutcome::SuccessNavigate { .. }));
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ctl.phase(), SubmitPhase::Idle);
}

#[tokio::test]
async fn submit_after_completion_is_accepted_again() {
    let (ctl, api) = controller(MockApi::failing("timeout"));
    let token = CancellationToken::new();

    ctl.login(&credentials(), &token).await;
    ctl.login(&credentials(), &token).await;

    assert_eq!(api.login_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cancel_while_pending_returns_to_idle_without_side_effects() {
    let gate = Arc::new(Notify::new());
    let (ctl, api) = controller(
        MockApi::replying(serde_json::json!({"status": true, "data": {"token": "abc"}})).gated(gate),
    );
    let token = CancellationToken::new();
    let creds = credentials();

    let (outcome, ()) = tokio::join!(ctl.login(&creds, &token), async { token.cancel() });

    assert_eq!(outcome, SubmitOutcome::Cancelled);
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
    assert!(!ctl.session().is_authenticated());
    assert!(!ctl.is_submitting());
}

#[tokio::test]
async fn already_cancelled_token_skips_the_call() {
    let (ctl, api) = controller(MockApi::replying(serde_json::json!({"status": true})));
    let token = CancellationToken::new();
    token.cancel();

    let outcome = ctl.signup(&registration(), &token).await;

    assert_eq!(outcome, SubmitOutcome::Cancelled);
    assert_eq!(api.signup_calls.load(Ordering::SeqCst), 0);
}

// =============================================================
// Error taxonomy
// =============================================================

#[test]
fn only_application_errors_reach_the_user_verbatim() {
    assert_eq!(SubmitError::Application("User exists".to_owned()).user_message(), "User exists");
    assert_eq!(SubmitError::Transport(TransportError::Unavailable).user_message(), GENERIC_ERROR);
    assert_eq!(SubmitError::Malformed("x").user_message(), GENERIC_ERROR);
}
