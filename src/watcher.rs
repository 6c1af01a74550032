//! The poll loop: refresh → fetch → extract → decide → notify → sleep.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::{Config, PipelineConfig, RecipientSource};
use crate::credentials::{Credential, CredentialStore, Credentials, FileStore, RecipientSet};
use crate::decide::select;
use crate::error::{AppError, Result};
use crate::extract::{Extractor, SomoimExtractor};
use crate::fetch::{build_client, fetch_page};
use crate::kakao::KakaoClient;
use crate::models::ScrapeResult;
use crate::snapshot::write_snapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Refreshing,
    Fetching,
    Extracting,
    Deciding,
    Notifying,
}

/// What one cycle did, and the phase it stopped in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub stopped_at: Phase,
    pub refreshed: bool,
    pub fetched: bool,
    pub matched: usize,
    pub notified: usize,
    pub failed: usize,
}

pub struct Watcher<S, E> {
    url: String,
    pipeline: PipelineConfig,
    snapshot_path: PathBuf,
    poll_interval: Duration,
    http: Client,
    kakao: KakaoClient,
    store: S,
    extractor: E,
}

impl Watcher<FileStore, SomoimExtractor> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = FileStore::new(config.credentials_dir.clone());
        Watcher::new(config, store, SomoimExtractor::default())
    }
}

impl<S: CredentialStore, E: Extractor> Watcher<S, E> {
    pub fn new(config: &Config, store: S, extractor: E) -> Result<Self> {
        let http = build_client(config.http_timeout)?;
        Ok(Watcher {
            url: config.url.clone(),
            pipeline: config.pipeline.clone(),
            snapshot_path: config.snapshot_path.clone(),
            poll_interval: config.poll_interval,
            kakao: KakaoClient::new(http.clone(), config.kakao.clone()),
            http,
            store,
            extractor,
        })
    }

    /// Run cycles forever, sleeping `poll_interval` between them.
    pub async fn run(&self) {
        info!(url = %self.url, filter = %self.pipeline.title_filter, "watching");
        loop {
            let report = self.run_cycle().await;
            info!(
                stopped_at = ?report.stopped_at,
                matched = report.matched,
                notified = report.notified,
                failed = report.failed,
                "cycle finished"
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        match self.kakao.refresh(&self.store).await {
            Ok(refreshed) => report.refreshed = refreshed,
            Err(e) => warn!(error = %e, "token refresh failed"),
        }

        report.stopped_at = Phase::Fetching;
        let page = match fetch_page(&self.http, &self.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "fetch failed, skipping to sleep");
                self.save(&failed_result(&self.url, e));
                return report;
            }
        };
        report.fetched = true;

        report.stopped_at = Phase::Extracting;
        let parsed = self.extractor.extract(&page.body);
        let result = ScrapeResult::parsed(&self.url, page.status_code, parsed);
        self.save(&result);

        report.stopped_at = Phase::Deciding;
        let open = select(result.schedules(), &self.pipeline.title_filter);
        report.matched = open.len();
        if open.is_empty() {
            debug!("no schedule with open slots");
            return report;
        }

        report.stopped_at = Phase::Notifying;
        let credentials = Credentials::load(&self.store);
        if credentials.access_token.is_none() {
            let e = AppError::MissingCredential(Credential::AccessToken.file_name());
            warn!(error = %e, "cannot notify");
            return report;
        }

        let recipients = match self.pipeline.recipient_source {
            RecipientSource::SelfNote => None,
            RecipientSource::List => RecipientSet::load(&self.store),
        };

        for schedule in &open {
            match self.kakao.notify(schedule, &credentials, recipients.as_ref()).await {
                Ok(()) => report.notified += 1,
                Err(e) => {
                    warn!(title = %schedule.schedule.title, error = %e, "notify failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn save(&self, result: &ScrapeResult) {
        if let Err(e) = write_snapshot(&self.snapshot_path, result) {
            warn!(path = %self.snapshot_path.display(), error = %e, "snapshot write failed");
        }
    }
}

fn failed_result(url: &str, error: AppError) -> ScrapeResult {
    match error {
        AppError::FetchError { status, reason, at, .. } => {
            ScrapeResult::failed(url, status, reason, at)
        }
        other => ScrapeResult::failed(url, None, other.to_string(), Utc::now()),
    }
}
