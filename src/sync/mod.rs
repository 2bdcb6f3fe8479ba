use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Read access to the user data provider.
#[async_trait]
pub trait UserSource {
    /// Fetches the user's profile, forwarded as-is.
    async fn user_details(&self, username: &str) -> eyre::Result<Value>;

    /// Fetches the user's repository list, forwarded as-is.
    /// Only the first page the provider returns.
    async fn user_repos(&self, username: &str) -> eyre::Result<Value>;
}

/// Durable write access to the snapshot store.
#[async_trait]
pub trait SnapshotStore {
    /// Unconditionally replaces the object at `key`.
    async fn save(&self, key: &str, content: &[u8]) -> eyre::Result<()>;
}

pub fn details_key(username: &str) -> String {
    format!("{username}_details.json")
}

pub fn repos_key(username: &str) -> String {
    format!("{username}_repos.json")
}

/// Drives one unit of work per username: fetch the profile and repository
/// list from the source, then store both snapshots.
pub struct UserSync<S, T> {
    source: S,
    store: Option<T>,
}

impl<S: UserSource, T: SnapshotStore> UserSync<S, T> {
    pub fn new(source: S, store: Option<T>) -> Self {
        Self { source, store }
    }

    /// Fetch user details -> fetch user repos -> upload both.
    ///
    /// A failed fetch aborts the sequence, so no snapshot is written for
    /// data that was never received. Without a configured store the run is
    /// fetch-only.
    pub async fn sync_user(&self, username: &str) -> eyre::Result<()> {
        let details = self.source.user_details(username).await?;
        let repos = self.source.user_repos(username).await?;

        match &self.store {
            Some(store) => {
                store.save(&details_key(username), serde_json::to_string(&details)?.as_bytes()).await?;
                store.save(&repos_key(username), serde_json::to_string(&repos)?.as_bytes()).await?;
                info!(target: "sync", %username, "User details and repositories uploaded");
            }
            None => {
                info!(target: "sync", %username, "No snapshot store configured, skipping upload");
            }
        }

        Ok(())
    }
}
