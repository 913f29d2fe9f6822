use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use crate::{
    api,
    error::Error,
    types::{Credentials, PkceToken},
};

/// Serves the OAuth callback on `addr` at `path` until the task is aborted.
pub async fn start_api_server(
    addr: SocketAddr,
    path: String,
    credentials: Credentials,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<(), Error> {
    let path = if path.is_empty() { "/".to_string() } else { path };
    let app = Router::new()
        .route(&path, get(api::callback))
        .layer(Extension(state))
        .layer(Extension(credentials));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Auth(format!("cannot listen on {}: {}", addr, e)))?;
    tracing::debug!("callback server listening on {}{}", addr, path);

    axum::serve(listener, app).await?;
    Ok(())
}
