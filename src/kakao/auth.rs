use serde::Deserialize;
use tracing::{debug, info};

use super::KakaoClient;
use crate::credentials::{Credential, CredentialStore};
use crate::error::{AppError, Result};

/// Token endpoint reply. A missing field means "keep the current file".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// Write whichever tokens came back. Returns how many files were rewritten.
    pub fn persist(&self, store: &dyn CredentialStore) -> Result<usize> {
        let mut written = 0;
        if let Some(token) = self.access_token.as_deref().filter(|t| !t.is_empty()) {
            store.set(Credential::AccessToken, token)?;
            written += 1;
        }
        if let Some(token) = self.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            store.set(Credential::RefreshToken, token)?;
            written += 1;
        }
        Ok(written)
    }
}

impl KakaoClient {
    /// Rotate the access token using the stored refresh token.
    ///
    /// Returns `Ok(false)` without any request when no refresh token is stored.
    pub async fn refresh(&self, store: &dyn CredentialStore) -> Result<bool> {
        let Some(refresh_token) = store.get(Credential::RefreshToken) else {
            debug!("no refresh token stored, skipping refresh");
            return Ok(false);
        };

        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token.as_str()),
        ];
        let tokens = self.token_request(&form).await?;
        let written = tokens.persist(store)?;
        info!(
            access_token = tokens.access_token.is_some(),
            refresh_token = tokens.refresh_token.is_some(),
            written,
            "token refreshed"
        );
        Ok(true)
    }

    /// Exchange the one-time authorization code for a token pair.
    pub async fn authorize(&self, store: &dyn CredentialStore) -> Result<TokenResponse> {
        let code = store
            .get(Credential::Code)
            .ok_or(AppError::MissingCredential(Credential::Code.file_name()))?;

        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code.as_str()),
        ];
        let tokens = self.token_request(&form).await?;
        let written = tokens.persist(store)?;
        info!(written, "authorization code exchanged");
        Ok(tokens)
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .http
            .post(self.auth_url("/oauth/token"))
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::TokenError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::TokenError(e.to_string()))?;
        if !status.is_success() {
            return Err(AppError::TokenError(format!("HTTP {}: {}", status, body)));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::TokenError(format!("unreadable token response: {}", e)))
    }
}
