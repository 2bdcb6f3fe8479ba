use serde::Deserialize;

/// Error body returned by the GitHub API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}
