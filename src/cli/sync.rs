use crate::{
    config::SyncConfig,
    remote::{config::GithubApiConfig, github::GithubApiClient, s3::S3Store},
    sync::UserSync,
    trace,
};
use clap::{crate_version, Parser};
use eyre::Context;
use std::path::PathBuf;
use tracing::*;

/// Fetch GitHub user snapshots and upload them to object storage
#[derive(Debug, Parser)]
#[command(version)]
pub struct Command {
    /// GitHub usernames to sync
    #[arg(required = true, value_name = "USERNAME")]
    usernames: Vec<String>,

    #[arg(long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    /// Directory for per-run log files
    #[arg(long, value_name = "PATH", default_value = "logs")]
    log_dir: PathBuf,
}

impl Command {
    /// Execute `sync` command
    pub async fn execute(self) -> eyre::Result<()> {
        let log_path = trace::init(&self.log_dir)?;
        info!(target: "sync::cli", "github-user-sync {} starting", crate_version!());
        debug!(target: "sync::cli", log = %log_path.display(), "Logging initialized");

        let config = self.load_config()?;
        info!(target: "sync::cli", path = %self.config.display(), "Configuration loaded");

        let github = GithubApiClient::new(GithubApiConfig {
            base_url: config.github_base_url.clone(),
            token: config.github_token.clone(),
            timeout: config.timeout,
        })?;

        let store = match config.s3_bucket_name.clone() {
            Some(bucket) => {
                info!(target: "sync::cli", %bucket, "Connecting to object storage");
                Some(S3Store::new(config.s3_region.clone(), config.s3_endpoint.clone(), bucket).await)
            }
            None => {
                warn!(target: "sync::cli", "No s3_bucket_name configured, snapshots will not be uploaded");
                None
            }
        };

        let sync = UserSync::new(github, store);
        for username in &self.usernames {
            if let Err(err) = sync.sync_user(username).await {
                error!(target: "sync::cli", %username, %err, "Failed to sync user");
            }
        }

        info!(target: "sync::cli", "Sync finished");
        Ok(())
    }

    fn load_config(&self) -> eyre::Result<SyncConfig> {
        let mut config =
            confy::load_path::<SyncConfig>(&self.config).wrap_err("Could not load config")?;
        if config.github_token.is_empty() {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                config.github_token = token;
            }
        }
        config.validate()?;
        Ok(config)
    }
}
