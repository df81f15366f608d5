//! Client configuration: credentials, target environment and host selection.

use anyhow::{Result, bail};
use base64::prelude::*;
use std::fmt;

/// Production API host.
pub const PRODUCTION_HOST: &str = "https://api.escrow.com";

/// Sandbox API host.
pub const SANDBOX_HOST: &str = "https://api.escrow-sandbox.com";

/// API version segment placed between the host and every endpoint path.
pub const API_VERSION: &str = "2017-09-01";

/// Which Escrow deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    pub fn host(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_HOST,
            Environment::Production => PRODUCTION_HOST,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Account email and API key used for Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    api_key: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let api_key = api_key.into();
        if email.trim().is_empty() {
            bail!("Missing account email. Set ESCROW_EMAIL or pass --email.");
        }
        if api_key.trim().is_empty() {
            bail!("Missing API key. Set ESCROW_API_KEY or pass --api-key.");
        }
        Ok(Self { email, api_key })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Value for the `Authorization` header: `Basic base64(email:api_key)`.
    pub fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.email, self.api_key);
        format!("Basic {}", BASE64_STANDARD.encode(raw))
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_key(&self) -> String {
        let count = self.api_key.chars().count();
        let visible: String = self.api_key.chars().skip(count.saturating_sub(4)).collect();
        format!("*********{}", visible)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &self.masked_key())
            .finish()
    }
}

/// Everything needed to build a client. Immutable once built.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub environment: Environment,
    /// Replaces the environment's host, e.g. to point at a local mock server.
    pub api_url: Option<String>,
}

impl Config {
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            environment,
            api_url: None,
        }
    }

    /// Builds a config from optional raw inputs, failing when a credential is
    /// absent or blank.
    pub fn from_parts(
        email: Option<String>,
        api_key: Option<String>,
        sandbox: bool,
        api_url: Option<String>,
    ) -> Result<Self> {
        let Some(email) = email else {
            bail!("Missing account email. Set ESCROW_EMAIL or pass --email.");
        };
        let Some(api_key) = api_key else {
            bail!("Missing API key. Set ESCROW_API_KEY or pass --api-key.");
        };
        let credentials = Credentials::new(email, api_key)?;
        Ok(Self::new(credentials, Environment::from_sandbox_flag(sandbox)).with_api_url(api_url))
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        self.api_url = api_url.map(|url| url.trim_end_matches('/').to_string());
        self
    }

    /// Host all requests go to, without a trailing slash.
    pub fn host(&self) -> &str {
        match &self.api_url {
            Some(url) => url.as_str(),
            None => self.environment.host(),
        }
    }
}
