//! Print the friends that can receive messages, one `uuid<TAB>nickname` per line.

use somoim_watch::{
    config::Config,
    credentials::{Credential, CredentialStore, FileStore},
    error::AppError,
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

    if let Err(e) = kakao.refresh(&store).await {
        tracing::warn!(error = %e, "token refresh failed, trying stored access token");
    }
    let access_token = store
        .get(Credential::AccessToken)
        .ok_or(AppError::MissingCredential(Credential::AccessToken.file_name()))?;

    for friend in kakao.friends(&access_token).await? {
        println!("{}\t{}", friend.uuid, friend.profile_nickname.as_deref().unwrap_or("-"));
    }

    Ok(())
}
