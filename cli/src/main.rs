mod file_store;
mod http;

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

use appt_client::config::FlowConfig;
use appt_client::net::types::{Credentials, Registration};
use appt_client::state::session::{SessionError, SessionStore};
use appt_client::submit::{SubmissionController, SubmitOutcome};
use appt_client::validate::{DEFAULT_MIN_LENGTH, FieldErrors, LoginField, SignupField, ValidationPolicy};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::file_store::FileStorage;
use crate::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, HttpAuthApi, HttpTimeouts};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid input")]
    Invalid,
    #[error("{0}")]
    Failed(String),
    #[error("cancelled")]
    Cancelled,
    #[error("a submission is already in progress")]
    Busy,
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "appt-cli", about = "Sign in to or register with the appointment service")]
struct Cli {
    #[arg(long, env = "APPT_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "APPT_SESSION_DIR", default_value = ".appt")]
    session_dir: PathBuf,

    #[arg(long, env = "APPT_MIN_PASSWORD_LENGTH", default_value_t = DEFAULT_MIN_LENGTH)]
    min_password_length: usize,

    #[arg(long, env = "APPT_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "APPT_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login(LoginArgs),
    /// Create an account.
    Signup(SignupArgs),
    /// Print the stored session.
    Whoami,
    /// Remove the stored session.
    Logout,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "APPT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long, help = "Digits with optional leading +country code, e.g. +15551234567")]
    phone: String,

    #[arg(long, env = "APPT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = FlowConfig::default()
        .with_api_base_url(cli.base_url.as_str())
        .with_policy(ValidationPolicy::default().with_min_length(cli.min_password_length));
    let timeouts = HttpTimeouts { request_secs: cli.request_timeout_secs, connect_secs: cli.connect_timeout_secs };
    let storage = FileStorage::new(cli.session_dir);
    tracing::debug!(session_dir = %storage.dir().display(), "using session storage");
    let session = SessionStore::restore(Arc::new(storage), config.storage_key.clone());

    match cli.command {
        Command::Whoami => run_whoami(&session),
        Command::Logout => run_logout(&session),
        Command::Login(args) => run_login(&build_controller(session, config, timeouts)?, args).await,
        Command::Signup(args) => run_signup(&build_controller(session, config, timeouts)?, args).await,
    }
}

fn build_controller(
    session: SessionStore,
    config: FlowConfig,
    timeouts: HttpTimeouts,
) -> Result<SubmissionController<HttpAuthApi>, CliError> {
    let api = HttpAuthApi::new(config.api_base_url.clone(), timeouts)?;
    tracing::debug!(base_url = %config.api_base_url, "auth endpoint configured");
    Ok(SubmissionController::new(Arc::new(api), session, config))
}

/// Cancel `token` on Ctrl-C.
fn cancel_on_interrupt() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received; cancelling submission");
            trigger.cancel();
        }
    });
    token
}

async fn run_login(controller: &SubmissionController<HttpAuthApi>, args: LoginArgs) -> Result<(), CliError> {
    let credentials = Credentials { email: args.email, password: args.password };
    let cancel = cancel_on_interrupt();
    let outcome = controller.login(&credentials, &cancel).await;
    report(&outcome, LoginField::as_str)?;
    println!("signed in");
    Ok(())
}

async fn run_signup(controller: &SubmissionController<HttpAuthApi>, args: SignupArgs) -> Result<(), CliError> {
    let registration = Registration {
        name: args.name,
        email: args.email,
        phone_number: args.phone,
        password: args.password,
    };
    let cancel = cancel_on_interrupt();
    let outcome = controller.signup(&registration, &cancel).await;
    report(&outcome, SignupField::as_str)?;
    if let Some(toast) = outcome.toast() {
        println!("{}", toast.message);
    }
    println!("next: appt-cli login --email {}", registration.email);
    Ok(())
}

/// Map a non-success outcome to an error, printing field errors to stderr.
fn report<F>(outcome: &SubmitOutcome<F>, field_name: impl Fn(F) -> &'static str) -> Result<(), CliError>
where
    F: Copy + Ord + Debug,
{
    match outcome {
        SubmitOutcome::SuccessNavigate { .. } | SubmitOutcome::SuccessDelayedNavigate { .. } => Ok(()),
        SubmitOutcome::Rejected(errors) => {
            print_field_errors(errors, field_name);
            Err(CliError::Invalid)
        }
        SubmitOutcome::Ignored => Err(CliError::Busy),
        SubmitOutcome::Cancelled => Err(CliError::Cancelled),
        SubmitOutcome::Error { toast } => Err(CliError::Failed(toast.message.clone())),
    }
}

fn print_field_errors<F: Copy + Ord>(errors: &FieldErrors<F>, field_name: impl Fn(F) -> &'static str) {
    for (field, message) in errors {
        eprintln!("{}: {message}", field_name(*field));
    }
}

fn run_whoami(session: &SessionStore) -> Result<(), CliError> {
    match session.get() {
        Some(record) => println!("{}", serde_json::to_string_pretty(record.as_value())?),
        None => println!("not signed in"),
    }
    Ok(())
}

fn run_logout(session: &SessionStore) -> Result<(), CliError> {
    session.clear()?;
    println!("signed out");
    Ok(())
}
