#[derive(Debug, Clone)]
pub struct GithubApiConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Option<u64>,
}
