//! warp glue. Requires `features = "server-warp"`.
//!
//! The configuration is checked when the filter is built, so a bad secret
//! stops the server before it accepts a single request. Every request then
//! receives a handle to the same verifier.

use crate::config::Config;
use crate::error::ConfigError;
use crate::v2::VerifierV2;
use crate::v3::VerifierV3;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;


/// Hands every request a clone of `verifier`.
pub fn with_verifier<V>(verifier: Arc<V>) -> impl Filter<Extract = (Arc<V>,), Error = Infallible> + Clone
where
    V: Send + Sync + 'static,
{
    warp::any().map(move || Arc::clone(&verifier))
}

/// Builds a reCAPTCHA v2 verifier from `config` and returns a filter that
/// extracts it.
pub fn v2(
    config: Config,
) -> Result<impl Filter<Extract = (Arc<VerifierV2>,), Error = Infallible> + Clone, ConfigError> {
    let verifier = VerifierV2::new(config)?;
    Ok(with_verifier(Arc::new(verifier)))
}

/// Builds a reCAPTCHA v3 verifier from `config` and returns a filter that
/// extracts it.
pub fn v3(
    config: Config,
) -> Result<impl Filter<Extract = (Arc<VerifierV3>,), Error = Infallible> + Clone, ConfigError> {
    let verifier = VerifierV3::new(config)?;
    Ok(with_verifier(Arc::new(verifier)))
}
