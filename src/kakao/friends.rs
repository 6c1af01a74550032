use serde::Deserialize;

use super::KakaoClient;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Friend {
    pub uuid: String,
    #[serde(default)]
    pub profile_nickname: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Deserialize)]
struct FriendsPage {
    #[serde(default)]
    elements: Vec<Friend>,
}

impl KakaoClient {
    /// Friends that have agreed to receive messages from this app.
    pub async fn friends(&self, access_token: &str) -> Result<Vec<Friend>> {
        let response = self
            .http
            .get(self.api_url("/v1/api/talk/friends"))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let page: FriendsPage = response.json().await?;
        Ok(page.elements)
    }
}
