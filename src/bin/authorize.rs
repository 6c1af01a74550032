//! Exchange the `code` file for a fresh token pair.

use somoim_watch::{
    config::Config,
    credentials::FileStore,
    fetch::build_client,
    init_logging,
    kakao::KakaoClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::load()?;
    let store = FileStore::new(config.credentials_dir.clone());
    let kakao = KakaoClient::new(build_client(config.http_timeout)?, config.kakao.clone());

    let tokens = kakao.authorize(&store).await?;
    println!(
        "access_token: {}, refresh_token: {}",
        if tokens.access_token.is_some() { "saved" } else { "not returned" },
        if tokens.refresh_token.is_some() { "saved" } else { "not returned" },
    );

    Ok(())
}
