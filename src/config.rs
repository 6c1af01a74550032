use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_URL: &str = "https://www.somoim.co.kr/478b6c1e-2924-11ef-977b-0a4bff98db511";
pub const DEFAULT_TITLE_FILTER: &str = "정기모임";
const DEFAULT_CLIENT_ID: &str = "299313409980678e0dcfe9e06e1f6bf0";
const DEFAULT_REDIRECT_URI: &str = "https://example.com/oauth";

/// Who receives the "slots open" message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientSource {
    /// Always send a memo to the token owner.
    SelfNote,
    /// Broadcast to the ids in the `uuids` file, or self-note when it is empty.
    List,
}

impl FromStr for RecipientSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self" | "memo" => Ok(RecipientSource::SelfNote),
            "list" | "friends" => Ok(RecipientSource::List),
            other => Err(AppError::ConfigError(format!("Invalid recipient source: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub title_filter: String,
    pub recipient_source: RecipientSource,
}

/// Base URLs and app identity for the messaging platform.
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub auth_base: String,
    pub api_base: String,
    pub local_base: String,
}

impl Default for KakaoConfig {
    fn default() -> Self {
        KakaoConfig {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_base: "https://kauth.kakao.com".to_string(),
            api_base: "https://kapi.kakao.com".to_string(),
            local_base: "https://dapi.kakao.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub pipeline: PipelineConfig,
    pub credentials_dir: PathBuf,
    pub snapshot_path: PathBuf,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    pub kakao: KakaoConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let url = env::var("SOMOIM_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let title_filter =
            env::var("TITLE_FILTER").unwrap_or_else(|_| DEFAULT_TITLE_FILTER.to_string());
        let recipient_source = env::var("RECIPIENT_SOURCE")
            .unwrap_or_else(|_| "list".to_string())
            .parse::<RecipientSource>()?;

        let credentials_dir =
            PathBuf::from(env::var("CREDENTIALS_DIR").unwrap_or_else(|_| ".".to_string()));
        let snapshot_path = PathBuf::from(
            env::var("SNAPSHOT_PATH").unwrap_or_else(|_| "scraped_data.json".to_string()),
        );

        let poll_interval = Duration::from_secs(secs_var("POLL_INTERVAL_SECS", 10)?);
        let http_timeout = Duration::from_secs(secs_var("HTTP_TIMEOUT_SECS", 10)?);

        let defaults = KakaoConfig::default();
        let kakao = KakaoConfig {
            client_id: env::var("KAKAO_CLIENT_ID").unwrap_or(defaults.client_id),
            redirect_uri: env::var("KAKAO_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            auth_base: env::var("KAKAO_AUTH_BASE").unwrap_or(defaults.auth_base),
            api_base: env::var("KAKAO_API_BASE").unwrap_or(defaults.api_base),
            local_base: env::var("KAKAO_LOCAL_BASE").unwrap_or(defaults.local_base),
        };

        Ok(Config {
            url,
            pipeline: PipelineConfig {
                title_filter,
                recipient_source,
            },
            credentials_dir,
            snapshot_path,
            poll_interval,
            http_timeout,
            kakao,
        })
    }
}

fn secs_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
