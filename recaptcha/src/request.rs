use crate::error::{Error, TransportError};
use crate::{FIELD_REMOTE_IP, FIELD_RESPONSE, FIELD_SECRET};
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use serde::de::DeserializeOwned;


/// Sends a token to the verification endpoint.
///
/// Implementations make exactly one attempt per call and hand back the raw
/// response body. Status codes and body contents are the caller's concern.
#[async_trait]
pub trait Requester: Send + Sync {
    async fn request(
        &self,
        url: &str,
        secret: &str,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<Bytes, TransportError>;
}

/// The default `Requester`: a form-encoded POST over `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct HttpRequester {
    client: reqwest::Client,
}

impl HttpRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing client. `reqwest::Client` is reference counted, so
    /// clones share one connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Requester for HttpRequester {
    async fn request(
        &self,
        url: &str,
        secret: &str,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<Bytes, TransportError> {
        let params = form_params(secret, token, remote_ip);
        debug!("verifying reCAPTCHA token against {}", url);

        let response = self
            .client
            .post(url)
            .form(&params)
            .send()
            .await
            .map_err(|err| TransportError::new(format!("request {:?}", url), err))?;

        response
            .bytes()
            .await
            .map_err(|err| TransportError::new("read response body", err))
    }
}

fn form_params<'a>(
    secret: &'a str,
    token: &'a str,
    remote_ip: Option<&'a str>,
) -> Vec<(&'static str, &'a str)> {
    let mut params = vec![(FIELD_SECRET, secret), (FIELD_RESPONSE, token)];
    if let Some(ip) = remote_ip {
        params.push((FIELD_REMOTE_IP, ip));
    }
    params
}

/// Checks the token, sends it through `requester` and decodes the body into
/// the variant's response type.
pub(crate) async fn siteverify<R, T>(
    requester: &R,
    url: &str,
    secret: &str,
    token: &str,
    remote_ip: Option<&str>,
) -> Result<T, Error>
where
    R: Requester + ?Sized,
    T: DeserializeOwned,
{
    if token.is_empty() {
        return Err(Error::EmptyToken);
    }

    let body = requester.request(url, secret, token, remote_ip).await?;
    Ok(serde_json::from_slice(&body)?)
}
