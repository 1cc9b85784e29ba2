use std::error::Error as StdError;
use std::fmt;
use std::io;


/// Problems found while building a verifier. These surface at setup time,
/// never while serving a request.
#[derive(Debug)]
pub enum ConfigError {
    EmptySecret,
    InvalidVerifyUrl(url::ParseError),
    Io(io::Error),
    Toml(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "recaptcha: empty secret"),
            Self::InvalidVerifyUrl(err) => write!(f, "recaptcha: invalid verify URL: {}", err),
            Self::Io(err) => write!(f, "recaptcha: could not read config: {}", err),
            Self::Toml(err) => write!(f, "recaptcha: could not parse config: {}", err),
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::EmptySecret => None,
            Self::InvalidVerifyUrl(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Toml(err) => Some(err),
        }
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidVerifyUrl(err)
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

/// The outbound call could not be completed or its body could not be read.
#[derive(Debug)]
pub struct TransportError {
    context: String,
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new<C, E>(context: C, source: E) -> Self
    where
        C: Into<String>,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }

    /// What the requester was doing when it failed.
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}

/// Errors returned by `verify`.
#[derive(Debug)]
pub enum Error {
    /// The token was empty; no request was made.
    EmptyToken,
    Transport(TransportError),
    /// The service answered with something other than the expected JSON.
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "empty token"),
            Self::Transport(err) => write!(f, "request reCAPTCHA server: {}", err),
            Self::Decode(err) => write!(f, "unmarshal response body: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::EmptyToken => None,
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
