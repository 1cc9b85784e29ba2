use log::{error, info, warn};
use recaptcha::filter;
use recaptcha::{Config, ConfigError, Requester, VerifierV3, FORM_FIELD_TOKEN};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use structopt::StructOpt;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};


#[derive(Debug, StructOpt)]
#[structopt(name = "recaptcha_demo", about = "Serves a form protected by reCAPTCHA v3")]
struct Args {
    /// The reCAPTCHA site key, embedded in the served page
    #[structopt(long)]
    site_key: String,
    /// The reCAPTCHA secret key. Overrides the config file.
    #[structopt(long)]
    secret_key: Option<String>,
    /// Endpoint to verify tokens against. Overrides the config file.
    #[structopt(long)]
    verify_url: Option<String>,
    /// TOML file with `secret` and optionally `verify_url`
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(long, default_value = "127.0.0.1:2830")]
    addr: SocketAddr,
}

fn load_config(args: &Args) -> Result<Config, ConfigError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(String::new()),
    };

    if let Some(secret) = &args.secret_key {
        config.secret = secret.clone();
    }
    if let Some(url) = &args.verify_url {
        config.verify_url = Some(url.clone());
    }

    Ok(config)
}

fn render_page(site_key: &str) -> String {
    format!(
        r#"<html>
<head>
	<script src="https://www.google.com/recaptcha/api.js"></script>
</head>
<body>
	<script>
		function onSubmit(token) {{
			document.getElementById("demo-form").submit();
		}}
	</script>
	<form id="demo-form" method="POST">
		<button class="g-recaptcha"
			data-sitekey="{}"
			data-callback='onSubmit'
			data-action='submit'>Submit</button>
	</form>
</body>
</html>
"#,
        site_key
    )
}

fn routes<R>(
    site_key: &str,
    verifier: Arc<VerifierV3<R>>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone
where
    R: Requester + 'static,
{
    let page = render_page(site_key);
    let index = warp::get()
        .and(warp::path::end())
        .map(move || warp::reply::html(page.clone()));

    let verify = warp::post()
        .and(warp::path::end())
        .and(warp::body::form())
        .and(warp::addr::remote())
        .and(filter::with_verifier(verifier))
        .and_then(submit::<R>);

    index.or(verify)
}

async fn submit<R>(
    form: HashMap<String, String>,
    remote: Option<SocketAddr>,
    verifier: Arc<VerifierV3<R>>,
) -> Result<impl Reply, Rejection>
where
    R: Requester + 'static,
{
    let token = form.get(FORM_FIELD_TOKEN).map(String::as_str).unwrap_or_default();
    let remote_ip = remote.map(|addr| addr.ip().to_string());

    let reply = match verifier.verify(token, remote_ip.as_deref()).await {
        Err(err) => {
            warn!("could not verify submission: {}", err);
            warp::reply::with_status(err.to_string(), StatusCode::BAD_REQUEST)
        }
        Ok(response) if !response.success => {
            info!("rejected submission: {:?}", response.error_codes);
            warp::reply::with_status(
                format!("Verification failed, error codes {:?}", response.error_codes),
                StatusCode::BAD_REQUEST,
            )
        }
        Ok(response) => {
            info!("verified action {:?} with score {}", response.action, response.score);
            warp::reply::with_status("Verified!".to_string(), StatusCode::OK)
        }
    };

    Ok(reply)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let verifier = match load_config(&args).and_then(VerifierV3::new) {
        Ok(verifier) => Arc::new(verifier),
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    info!("verifying against {}", verifier.verify_url());
    info!("listening on http://{}", args.addr);
    warp::serve(routes(&args.site_key, verifier)).run(args.addr).await;
}
