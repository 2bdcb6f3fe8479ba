use serde::{Deserialize, Serialize};

/// File-backed settings. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the GitHub REST API, e.g. `https://api.github.com/`.
    /// Endpoints are appended to it verbatim.
    pub github_base_url: String,
    /// Personal access token attached to every API request.
    pub github_token: String,
    /// Target bucket for snapshot uploads. Uploads are skipped when unset.
    #[serde(default)]
    pub s3_bucket_name: Option<String>,
    #[serde(default)]
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible stores.
    #[serde(default)]
    pub s3_endpoint: Option<String>,
    /// Request timeout in seconds. Transport defaults apply when unset.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl SyncConfig {
    pub fn validate(&self) -> eyre::Result<()> {
        if self.github_base_url.is_empty() {
            eyre::bail!("missing required configuration key: github_base_url");
        }
        if self.github_token.is_empty() {
            eyre::bail!("missing required configuration key: github_token (or set GITHUB_TOKEN)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            concat!(
                "github_base_url = \"https://api.github.com/\"\n",
                "github_token = \"abc\"\n",
                "s3_bucket_name = \"user-snapshots\"\n",
            ),
        )
        .unwrap();

        let config: SyncConfig = confy::load_path(&path).unwrap();
        config.validate().unwrap();
        assert_eq!(config.github_base_url, "https://api.github.com/");
        assert_eq!(config.s3_bucket_name.as_deref(), Some("user-snapshots"));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn partial_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "github_base_url = \"https://api.github.com/\"\n").unwrap();

        assert!(confy::load_path::<SyncConfig>(&path).is_err());
    }

    #[test]
    fn missing_token_fails_validation() {
        let config = SyncConfig {
            github_base_url: "https://api.github.com/".to_owned(),
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("github_token"));
    }

    #[test]
    fn missing_base_url_fails_validation() {
        let config = SyncConfig { github_token: "abc".to_owned(), ..Default::default() };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("github_base_url"));
    }
}
