//! Auth flow configuration with browser-friendly defaults.

use std::time::Duration;

use crate::state::session::SESSION_KEY;
use crate::validate::ValidationPolicy;

pub const DEFAULT_SIGNUP_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowConfig {
    /// Prefix for endpoint paths; empty means same-origin.
    pub api_base_url: String,
    /// Durable storage key for the session record.
    pub storage_key: String,
    /// Pause between signup success and the redirect to `/login`.
    pub signup_redirect_delay: Duration,
    pub policy: ValidationPolicy,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            storage_key: SESSION_KEY.to_owned(),
            signup_redirect_delay: DEFAULT_SIGNUP_REDIRECT_DELAY,
            policy: ValidationPolicy::default(),
        }
    }
}

impl FlowConfig {
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_signup_redirect_delay(mut self, delay: Duration) -> Self {
        self.signup_redirect_delay = delay;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
