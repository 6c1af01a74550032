use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Attendance counts as shown on the page. `max >= current` is not guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub current: u32,
    pub max: u32,
}

impl Capacity {
    /// `max - current`; negative on malformed pages.
    pub fn remaining(&self) -> i64 {
        i64::from(self.max) - i64::from(self.current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub title: String,
    pub date: String,
    pub place: String,
    pub cost: String,
    pub people: Capacity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
}

/// Outcome of one fetch+extract pass. Exactly one of `parsed` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub fetched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedPage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResult {
    pub fn parsed(url: &str, status_code: u16, parsed: ParsedPage) -> Self {
        ScrapeResult {
            url: url.to_string(),
            status_code: Some(status_code),
            fetched_at: Utc::now(),
            parsed: Some(parsed),
            error: None,
        }
    }

    pub fn failed(url: &str, status_code: Option<u16>, error: String, at: DateTime<Utc>) -> Self {
        ScrapeResult {
            url: url.to_string(),
            status_code,
            fetched_at: at,
            parsed: None,
            error: Some(error),
        }
    }

    pub fn schedules(&self) -> &[Schedule] {
        self.parsed.as_ref().map(|p| p.schedules.as_slice()).unwrap_or(&[])
    }
}
