//! Auth endpoint seam and the browser transport.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: the browser transport reports `Unavailable`; native callers
//! (the CLI, tests) provide their own [`AuthApi`] implementation.
//!
//! ERROR HANDLING
//! ==============
//! Transports only report *transport* failures. A well-formed `status: false`
//! envelope is a successful call as far as this layer is concerned; the
//! submission controller decides what it means for the user.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Credentials, LoginResponse, Registration, SignupResponse};
use serde::de::DeserializeOwned;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SIGNUP_PATH: &str = "/api/auth/signup";

/// Failures below the application protocol: the request never produced a
/// usable response envelope.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// Non-success status with a body that is not a response envelope.
    #[error("unexpected response status {status}")]
    Status { status: u16, body: String },

    /// Success status but the body did not parse as a response envelope.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// No transport is available in this build.
    #[error("transport not available")]
    Unavailable,
}

/// Remote login/signup calls. Enables mocking in tests.
///
/// Futures are not `Send`: browser transports hold JS handles across awaits.
#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// Submit credentials to the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response envelope was received.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError>;

    /// Submit a registration to the signup endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response envelope was received.
    async fn signup(&self, registration: &Registration) -> Result<SignupResponse, TransportError>;
}

/// Join a base URL (possibly empty for same-origin) and an endpoint path.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Parse a response body into an envelope.
///
/// The body is tried first regardless of status, since servers commonly reply
/// `4xx` with `{"status": false, ...}`. Only an unparseable body is an error.
///
/// # Errors
///
/// [`TransportError::Status`] for an unparseable non-2xx body,
/// [`TransportError::Parse`] for an unparseable 2xx body.
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, TransportError> {
    match serde_json::from_str::<T>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !(200..300).contains(&status) => Err(TransportError::Status { status, body: body.to_owned() }),
        Err(e) => Err(TransportError::Parse(e.to_string())),
    }
}

/// [`AuthApi`] over the browser `fetch` API.
#[derive(Clone, Debug, Default)]
pub struct BrowserAuthApi {
    base_url: String,
}

impl BrowserAuthApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    #[cfg(feature = "csr")]
    async fn post<B: serde::Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, TransportError> {
        let url = endpoint(&self.base_url, path);
        let resp = gloo_net::http::Request::post(&url)
            .json(body)
            .map_err(|e| TransportError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| TransportError::Request(e.to_string()))?;
        parse_envelope(status, &text)
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for BrowserAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            self.post(LOGIN_PATH, credentials).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.base_url, credentials);
            Err(TransportError::Unavailable)
        }
    }

    async fn signup(&self, registration: &Registration) -> Result<SignupResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            self.post(SIGNUP_PATH, registration).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.base_url, registration);
            Err(TransportError::Unavailable)
        }
    }
}
