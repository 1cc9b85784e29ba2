use crate::error::ConfigError;
use crate::VERIFY_URL_GOOGLE;
use serde::Deserialize;
use std::path::Path;
use url::Url;


/// Settings shared by both verifier variants.
///
/// A `Config` is checked once, when a verifier is built from it. After that
/// the verifier owns an immutable copy.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Shared key between the site and the provider. Required.
    pub secret: String,
    /// Endpoint to verify against. `VERIFY_URL_GOOGLE` when unset.
    #[serde(default)]
    pub verify_url: Option<String>,
    /// HTTP client to send requests with. Timeouts, proxies and TLS
    /// settings come from here; a default client is built when unset.
    #[serde(skip)]
    pub client: Option<reqwest::Client>,
}

/// A validated `Config`.
pub(crate) struct Settings {
    pub(crate) secret: String,
    pub(crate) verify_url: String,
    pub(crate) client: Option<reqwest::Client>,
}

impl Config {
    pub fn new<S: Into<String>>(secret: S) -> Self {
        Self {
            secret: secret.into(),
            verify_url: None,
            client: None,
        }
    }

    pub fn with_verify_url<S: Into<String>>(mut self, url: S) -> Self {
        self.verify_url = Some(url.into());
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub(crate) fn resolve(self) -> Result<Settings, ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let verify_url = match self.verify_url {
            Some(url) if !url.is_empty() => url,
            _ => VERIFY_URL_GOOGLE.to_string(),
        };
        Url::parse(&verify_url)?;

        Ok(Settings {
            secret: self.secret,
            verify_url,
            client: self.client,
        })
    }
}
