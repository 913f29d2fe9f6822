use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    config,
    error::Error,
    info,
    management::TokenManager,
    server::start_api_server,
    spotify::Session,
    success,
    types::{Credentials, PkceToken, Token, TokenResponse},
    utils, warning,
};

const AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Builds a [`Session`] for the given client identity.
///
/// Makes sure the token cache directory exists, then uses the cached token
/// (refreshing it when close to expiry). Without a cached token the
/// interactive authorization flow runs first.
pub async fn connect(credentials: &Credentials) -> Result<Session, Error> {
    TokenManager::ensure_cache_dir().await?;

    let access_token = match TokenManager::load().await {
        Ok(mut manager) => manager.get_valid_token(credentials).await,
        Err(e) => {
            tracing::debug!("no usable token cache: {}", e);
            info!("No cached token found, starting authorization.");
            authorize(credentials).await?.access_token
        }
    };

    Session::new(access_token)
}

/// Runs the authorization-code flow and persists the resulting token.
///
/// A temporary callback server is bound to the redirect URI while the user
/// approves access in the browser. Gives up after two minutes.
pub async fn authorize(credentials: &Credentials) -> Result<Token, Error> {
    let (addr, callback_path) = config::callback_target(&credentials.redirect_uri)?;

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        state: state.clone(),
        token: None,
        error: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let server_credentials = credentials.clone();
    let server = tokio::spawn(async move {
        start_api_server(addr, callback_path, server_credentials, server_state).await
    });

    let auth_url = authorization_url(credentials, &code_challenge, &state)?;

    // Open the authorization URL in the default browser
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("If the browser did not open, navigate to:\n{}", auth_url);
    }

    let outcome = wait_for_token(&shared_state, &server).await;
    server.abort();

    let token = outcome?;
    TokenManager::new(token.clone()).persist().await?;
    success!("Authentication successful!");
    Ok(token)
}

fn authorization_url(
    credentials: &Credentials,
    code_challenge: &str,
    state: &str,
) -> Result<Url, Error> {
    let scope = config::spotify_scope();
    Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("state", state),
            ("scope", scope.as_str()),
            ("show_dialog", "false"),
        ],
    )
    .map_err(|e| Error::Auth(format!("invalid authorization URL: {}", e)))
}

async fn wait_for_token(
    shared_state: &Arc<Mutex<Option<PkceToken>>>,
    server: &tokio::task::JoinHandle<Result<(), Error>>,
) -> Result<Token, Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    let result = loop {
        if start.elapsed() >= AUTHORIZATION_TIMEOUT {
            break Err(Error::Auth("timed out waiting for the callback".to_string()));
        }
        if server.is_finished() {
            break Err(Error::Auth(
                "callback server stopped (is the redirect port already in use?)".to_string(),
            ));
        }

        {
            let lock = shared_state.lock().await;
            if let Some(pkce) = lock.as_ref() {
                if let Some(token) = &pkce.token {
                    break Ok(token.clone());
                }
                if let Some(error) = &pkce.error {
                    break Err(Error::Auth(error.clone()));
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    };

    pb.finish_and_clear();
    result
}

/// Exchanges an authorization code for a token.
pub async fn exchange_code(
    credentials: &Credentials,
    code: &str,
    verifier: &str,
) -> Result<Token, Error> {
    let response = request_token(
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ],
    )
    .await?;

    let refresh_token = response
        .refresh_token
        .ok_or_else(|| Error::Auth("token response lacks a refresh token".to_string()))?;

    Ok(Token {
        access_token: response.access_token,
        refresh_token,
        scope: response.scope,
        expires_in: response.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Trades a refresh token for a fresh access token. Spotify may omit the
/// refresh token in the answer, in which case the old one stays valid.
pub async fn refresh_token(credentials: &Credentials, refresh_token: &str) -> Result<Token, Error> {
    let response = request_token(
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await?;

    Ok(Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .unwrap_or_else(|| refresh_token.to_string()),
        scope: response.scope,
        expires_in: response.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

async fn request_token(
    credentials: &Credentials,
    form: &[(&str, &str)],
) -> Result<TokenResponse, Error> {
    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(form)
        .send()
        .await
        .map_err(|e| Error::Auth(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth(format!(
            "token endpoint answered {}: {}",
            status, body
        )));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Error::Auth(e.to_string()))
}
