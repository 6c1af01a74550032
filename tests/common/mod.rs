#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use somoim_watch::config::{Config, KakaoConfig, PipelineConfig, RecipientSource};

pub fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("somoim_watch_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

/// Config whose page URL and Kakao hosts all point at `base`.
pub fn test_config(base: &str, dir: &PathBuf, recipient_source: RecipientSource) -> Config {
    Config {
        url: format!("{}/group", base),
        pipeline: PipelineConfig {
            title_filter: "정기모임".to_string(),
            recipient_source,
        },
        credentials_dir: dir.clone(),
        snapshot_path: dir.join("scraped_data.json"),
        poll_interval: Duration::from_millis(10),
        http_timeout: Duration::from_secs(5),
        kakao: KakaoConfig {
            client_id: "test-client".to_string(),
            redirect_uri: "https://example.com/oauth".to_string(),
            auth_base: base.to_string(),
            api_base: base.to_string(),
            local_base: base.to_string(),
        },
    }
}

/// One schedule card in the positional layout the extractor expects.
pub fn schedule_block(title: &str, place: &str, current: u32, max: u32) -> String {
    format!(
        r#"<div><div><img src="t.png"></div><div>
             <h3>{title}</h3>
             <div><p>6월 15일(토) 오후 7:00</p></div>
             <div><p>{place}</p></div>
             <div><p>10,000원</p></div>
             <div><span><span>{current}</span><span>/</span><span>{max}</span></span></div>
           </div></div>"#
    )
}

pub fn group_page(blocks: &[String]) -> String {
    format!(
        r#"<html><body><div><div><div><main><div><div><div><div>
             <section><h1>핫스윙</h1><p>멤버 42명</p></section>
             <section><div>{}</div></section>
           </div></div></div></div></main></div></div></div></body></html>"#,
        blocks.concat()
    )
}
