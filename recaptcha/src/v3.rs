use crate::config::{Config, Settings};
use crate::error::{ConfigError, Error};
use crate::request::{siteverify, HttpRequester, Requester};
use crate::ErrorCode;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};


/// The answer to a reCAPTCHA v3 verification request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseV3 {
    /// Whether the token was valid for this site.
    #[serde(default)]
    pub success: bool,
    /// When the challenge was loaded.
    #[serde(default)]
    pub challenge_ts: Option<DateTime<FixedOffset>>,
    /// Hostname of the site where the challenge was solved.
    #[serde(default)]
    pub hostname: String,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
    /// Likelihood that the request came from a human, from 0.0 to 1.0.
    #[serde(default)]
    pub score: f64,
    /// Action name given to the widget when the token was generated.
    #[serde(default)]
    pub action: String,
}

impl ResponseV3 {
    /// The error codes this crate knows about, in the order reported.
    pub fn known_error_codes(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.error_codes.iter().filter_map(|code| ErrorCode::from_code(code))
    }
}

/// Verifies reCAPTCHA v3 tokens.
pub struct VerifierV3<R = HttpRequester> {
    requester: R,
    secret: String,
    verify_url: String,
}

impl VerifierV3 {
    /// Builds a verifier that sends requests over HTTP, using the client from
    /// `config` if one was given.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let mut settings = config.resolve()?;
        let requester = HttpRequester::with_client(settings.client.take().unwrap_or_default());
        Ok(Self::from_settings(settings, requester))
    }
}

impl<R: Requester> VerifierV3<R> {
    /// Builds a verifier around a custom `Requester`. Any client in `config`
    /// is ignored.
    pub fn with_requester(config: Config, requester: R) -> Result<Self, ConfigError> {
        Ok(Self::from_settings(config.resolve()?, requester))
    }

    fn from_settings(settings: Settings, requester: R) -> Self {
        Self {
            requester,
            secret: settings.secret,
            verify_url: settings.verify_url,
        }
    }

    pub fn verify_url(&self) -> &str {
        &self.verify_url
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Verifies `token` and returns the provider's score for it. Deciding
    /// which scores to accept is up to the caller.
    pub async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<ResponseV3, Error> {
        siteverify(&self.requester, &self.verify_url, &self.secret, token, remote_ip).await
    }
}
