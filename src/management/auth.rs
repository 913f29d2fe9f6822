use std::path::PathBuf;

use chrono::Utc;

use crate::{config, error::Error, spotify, types::Credentials, types::Token, warning};

/// Seconds before expiry at which a cached token is refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, Error> {
        let content = async_fs::read_to_string(Self::token_path()).await?;
        let token: Token = serde_json::from_str(&content).map_err(|e| {
            Error::Auth(format!(
                "cannot parse token cache {}: {}",
                Self::token_path().display(),
                e
            ))
        })?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), Error> {
        Self::ensure_cache_dir().await?;

        let json = serde_json::to_string_pretty(&self.token)
            .map_err(|e| Error::Auth(format!("cannot serialize token: {}", e)))?;
        async_fs::write(Self::token_path(), json).await?;
        Ok(())
    }

    pub async fn ensure_cache_dir() -> Result<(), Error> {
        if let Some(parent) = Self::token_path().parent() {
            async_fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire. A failed refresh keeps the cached token; Spotify will
    /// then answer 401 and the user is told to re-authenticate.
    pub async fn get_valid_token(&mut self, credentials: &Credentials) -> String {
        if self.is_expired() {
            tracing::debug!("cached token expired, refreshing");
            match spotify::auth::refresh_token(credentials, &self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn token_path() -> PathBuf {
        config::token_cache_path()
    }
}
