use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    spotify,
    types::{Credentials, PkceToken},
    warning,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
    Extension(credentials): Extension<Credentials>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    if let Some(error) = params.get("error") {
        pkce_state.error = Some(format!("authorization denied: {}", error));
        return Html("<h4>Authorization denied.</h4>");
    }

    if params.get("state") != Some(&pkce_state.state) {
        pkce_state.error = Some("state mismatch in OAuth callback".to_string());
        return Html("<h4>Invalid state parameter.</h4>");
    }

    let Some(code) = params.get("code") else {
        pkce_state.error = Some("callback carried no authorization code".to_string());
        return Html("<h4>Missing authorization code.</h4>");
    };

    let verifier = pkce_state.code_verifier.clone();
    match spotify::auth::exchange_code(&credentials, code, &verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pkce_state.error = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
