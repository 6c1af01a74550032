use serde::Serialize;
use tracing::{info, warn};

use super::KakaoClient;
use crate::credentials::{Credential, Credentials, RecipientSet};
use crate::decide::OpenSchedule;
use crate::error::{AppError, Result};

const IMAGE_URL: &str = "https://d228e474i2d5yf.cloudfront.net/478b6c1e-2924-11ef-977b-0a4bff98db511s.png";
const IMAGE_WIDTH: u32 = 800;
const IMAGE_HEIGHT: u32 = 400;
const WEB_URL: &str = "https://developers.kakao.com";
const MOBILE_WEB_URL: &str = "https://developers.kakao.com/mobile";

const MEMO_PATH: &str = "/v2/api/talk/memo/default/send";
const FRIENDS_PATH: &str = "/v1/api/talk/friends/message/default/send";

#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub web_url: &'static str,
    pub mobile_web_url: &'static str,
    pub android_execution_params: &'static str,
    pub ios_execution_params: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub title: String,
    pub description: String,
    pub image_url: &'static str,
    pub image_width: u32,
    pub image_height: u32,
    pub link: Link,
}

/// The `location` default template.
#[derive(Debug, Clone, Serialize)]
pub struct LocationTemplate {
    pub object_type: &'static str,
    pub content: Content,
    pub address: String,
    pub address_title: String,
}

impl LocationTemplate {
    pub fn for_schedule(open: &OpenSchedule<'_>, address: Option<&str>) -> Self {
        let schedule = open.schedule;
        LocationTemplate {
            object_type: "location",
            content: Content {
                title: schedule.title.clone(),
                description: description(&schedule.place, open.remaining),
                image_url: IMAGE_URL,
                image_width: IMAGE_WIDTH,
                image_height: IMAGE_HEIGHT,
                link: Link {
                    web_url: WEB_URL,
                    mobile_web_url: MOBILE_WEB_URL,
                    android_execution_params: "platform=android",
                    ios_execution_params: "platform=ios",
                },
            },
            address: address.unwrap_or_default().to_string(),
            address_title: schedule.place.clone(),
        }
    }
}

pub fn description(place: &str, remaining: u32) -> String {
    format!("장소: {}\n남은 인원: {}", place, remaining)
}

/// Where a message goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    SelfNote,
    Friends(&'a RecipientSet),
}

impl<'a> Target<'a> {
    pub fn from_recipients(recipients: Option<&'a RecipientSet>) -> Self {
        match recipients {
            Some(set) if !set.ids().is_empty() => Target::Friends(set),
            _ => Target::SelfNote,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Target::SelfNote => MEMO_PATH,
            Target::Friends(_) => FRIENDS_PATH,
        }
    }
}

impl KakaoClient {
    /// Send one "slots open" message for `open`.
    ///
    /// Only HTTP 200 counts as delivered. The address is looked up first and
    /// left empty when the lookup fails.
    pub async fn notify(
        &self,
        open: &OpenSchedule<'_>,
        credentials: &Credentials,
        recipients: Option<&RecipientSet>,
    ) -> Result<()> {
        let access_token = credentials
            .access_token
            .as_deref()
            .ok_or(AppError::MissingCredential(Credential::AccessToken.file_name()))?;

        let address = self.resolve_address(&open.schedule.place).await;
        let template = LocationTemplate::for_schedule(open, address.as_deref());
        let target = Target::from_recipients(recipients);
        self.send_template(&template, access_token, target).await
    }

    pub async fn send_template(
        &self,
        template: &LocationTemplate,
        access_token: &str,
        target: Target<'_>,
    ) -> Result<()> {
        let mut form = vec![("template_object", serde_json::to_string(template)?)];
        if let Target::Friends(set) = target {
            form.push(("receiver_uuids", serde_json::to_string(set.ids())?));
        }

        let response = self
            .http
            .post(self.api_url(target.path()))
            .bearer_auth(access_token)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "message request failed");
                AppError::NotifyError {
                    status: None,
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status != reqwest::StatusCode::OK {
            warn!(status = status.as_u16(), body = %body, "message rejected");
            return Err(AppError::NotifyError {
                status: Some(status.as_u16()),
                reason: body,
            });
        }

        info!(title = %template.content.title, body = %body, "message sent");
        Ok(())
    }
}
