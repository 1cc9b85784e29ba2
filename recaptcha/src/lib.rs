//! Server-side verification of reCAPTCHA tokens.
//!
//! Two protocol variants are supported. [`VerifierV2`] checks checkbox and
//! invisible challenges and reports a plain success flag, while
//! [`VerifierV3`] additionally reports the risk score and action label
//! computed by the provider. Both send a single request per call through a
//! [`Requester`], which defaults to [`HttpRequester`].
//!
//! Judging a V3 score is left to the caller: the adapter returns whatever
//! the remote service reported.



use std::fmt;

pub mod config;
pub mod error;
#[cfg(feature = "server-warp")]
pub mod filter;
pub mod request;
pub mod v2;
pub mod v3;

pub use crate::config::Config;
pub use crate::error::{ConfigError, Error, TransportError};
pub use crate::request::{HttpRequester, Requester};
pub use crate::v2::{ResponseV2, VerifierV2};
pub use crate::v3::{ResponseV3, VerifierV3};

/// Default endpoint used to verify tokens.
pub const VERIFY_URL_GOOGLE: &str = "https://www.google.com/recaptcha/api/siteverify";
/// Endpoint for deployments that cannot reach `www.google.com`.
pub const VERIFY_URL_GLOBAL: &str = "https://www.recaptcha.net/recaptcha/api/siteverify";

pub const FIELD_SECRET: &str = "secret";
pub const FIELD_RESPONSE: &str = "response";
pub const FIELD_REMOTE_IP: &str = "remoteip";
/// Name of the form field the client-side widget submits the token in.
pub const FORM_FIELD_TOKEN: &str = "g-recaptcha-response";

/// Error codes documented by the verification service.
///
/// Responses carry the raw strings; this is a typed view over the ones
/// that are known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MissingSecret,
    InvalidSecret,
    MissingResponse,
    InvalidResponse,
    BadRequest,
    /// The token is no longer valid: either too old or already used.
    TimeoutOrDuplicate,
}

impl ErrorCode {
    pub fn from_code(code: &str) -> Option<Self> {
        let code = match code {
            "missing-input-secret" => Self::MissingSecret,
            "invalid-input-secret" => Self::InvalidSecret,
            "missing-input-response" => Self::MissingResponse,
            "invalid-input-response" => Self::InvalidResponse,
            "bad-request" => Self::BadRequest,
            "timeout-or-duplicate" => Self::TimeoutOrDuplicate,
            _ => return None,
        };
        Some(code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingSecret => "missing-input-secret",
            Self::InvalidSecret => "invalid-input-secret",
            Self::MissingResponse => "missing-input-response",
            Self::InvalidResponse => "invalid-input-response",
            Self::BadRequest => "bad-request",
            Self::TimeoutOrDuplicate => "timeout-or-duplicate",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
