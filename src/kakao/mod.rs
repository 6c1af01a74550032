//! Kakao REST collaborators: OAuth token rotation, keyword address search,
//! friend listing and the "send default template" message endpoints.

pub mod auth;
pub mod friends;
pub mod local;
pub mod message;

use reqwest::Client;
use crate::config::KakaoConfig;

pub use auth::TokenResponse;
pub use friends::Friend;
pub use message::{LocationTemplate, Target};

pub struct KakaoClient {
    http: Client,
    config: KakaoConfig,
}

impl KakaoClient {
    pub fn new(http: Client, config: KakaoConfig) -> Self {
        KakaoClient { http, config }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}{}", self.config.auth_base.trim_end_matches('/'), path)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn local_url(&self, path: &str) -> String {
        format!("{}{}", self.config.local_base.trim_end_matches('/'), path)
    }
}
