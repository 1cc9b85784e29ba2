use recaptcha::{Config, Error, HttpRequester, Requester, VerifierV2, VerifierV3};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use warp::http::StatusCode;
use warp::Filter;

mod utils {
    use super::*;

    pub const SECRET: &str = "test-secret";
    pub const TOKEN: &str = "valid-token";

    pub type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Starts a fake verification endpoint on an ephemeral port. It answers
    /// every form POST with `body` and records the submitted fields.
    pub fn start_server(status: StatusCode, body: &'static str) -> (String, Received) {
        let received = Received::default();
        let sink = Arc::clone(&received);

        let route = warp::post()
            .and(warp::path("siteverify"))
            .and(warp::path::end())
            .and(warp::body::form())
            .map(move |form: HashMap<String, String>| {
                sink.lock().expect("mutex poisoned").push(form);
                let reply = warp::reply::with_header(body, "content-type", "application/json");
                warp::reply::with_status(reply, status)
            });

        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        (format!("http://{}/siteverify", addr), received)
    }

    /// A URL nothing is listening on.
    pub fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        let addr = listener.local_addr().expect("listener has an address");
        drop(listener);
        format!("http://{}/siteverify", addr)
    }

    pub fn config(url: &str) -> Config {
        Config::new(SECRET).with_verify_url(url)
    }
}

#[tokio::test]
async fn v2_sends_secret_and_token() {
    let (url, received) = utils::start_server(StatusCode::OK, r#"{"success": true}"#);
    let v2 = VerifierV2::new(utils::config(&url)).expect("config is valid");

    let response = v2.verify(utils::TOKEN, None).await
        .expect("verify should not fail");
    assert!(response.success);

    let received = received.lock().expect("mutex poisoned");
    assert_eq!(received.len(), 1);
    let form = &received[0];
    assert_eq!(form.get("secret").map(String::as_str), Some(utils::SECRET));
    assert_eq!(form.get("response").map(String::as_str), Some(utils::TOKEN));
    assert_eq!(form.get("remoteip"), None);
}

#[tokio::test]
async fn v2_sends_remote_ip() {
    let (url, received) = utils::start_server(StatusCode::OK, r#"{"success": true}"#);
    let v2 = VerifierV2::new(utils::config(&url)).expect("config is valid");

    v2.verify(utils::TOKEN, Some("127.0.0.1")).await
        .expect("verify should not fail");

    let received = received.lock().expect("mutex poisoned");
    assert_eq!(received[0].get("remoteip").map(String::as_str), Some("127.0.0.1"));
}

#[tokio::test]
async fn v3_reports_score_and_action() {
    let (url, _) = utils::start_server(
        StatusCode::OK,
        r#"{"success": true, "challenge_ts": "2022-03-04T05:06:07Z", "hostname": "localhost", "score": 0.9, "action": "submit"}"#,
    );
    let client = reqwest::Client::builder()
        .build()
        .expect("client should build");
    let v3 = VerifierV3::new(utils::config(&url).with_client(client)).expect("config is valid");

    let response = v3.verify(utils::TOKEN, None).await
        .expect("verify should not fail");
    assert!(response.success);
    assert!((response.score - 0.9).abs() < f64::EPSILON);
    assert_eq!(response.action, "submit");
    assert_eq!(response.hostname, "localhost");
}

#[tokio::test]
async fn status_code_is_not_inspected() {
    let (url, _) = utils::start_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"success": false, "error-codes": ["bad-request"]}"#,
    );
    let v2 = VerifierV2::new(utils::config(&url)).expect("config is valid");

    let response = v2.verify(utils::TOKEN, None).await
        .expect("verify should not fail");
    assert!(!response.success);
    assert_eq!(response.error_codes, vec!["bad-request".to_string()]);
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (url, _) = utils::start_server(StatusCode::OK, "not json");
    let v3 = VerifierV3::new(utils::config(&url)).expect("config is valid");

    let result = v3.verify(utils::TOKEN, None).await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let url = utils::closed_url();
    let v2 = VerifierV2::new(utils::config(&url)).expect("config is valid");

    let result = v2.verify(utils::TOKEN, None).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn requester_returns_raw_body() {
    let (url, _) = utils::start_server(StatusCode::OK, r#"{"success": true}"#);
    let requester = HttpRequester::new();

    let body = requester.request(&url, utils::SECRET, utils::TOKEN, None).await
        .expect("request should not fail");
    assert_eq!(&body[..], br#"{"success": true}"#);
}

#[tokio::test]
async fn requester_names_failed_url() {
    let url = utils::closed_url();
    let requester = HttpRequester::new();

    let err = requester.request(&url, utils::SECRET, utils::TOKEN, None).await
        .expect_err("request should fail");
    assert!(err.context().contains(&url));
}
