use std::time::Duration;

use async_trait::async_trait;
use eyre::Context;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, Method,
};
use serde_json::Value;

use crate::{
    remote::{config::GithubApiConfig, github::models::ApiError},
    sync::UserSource,
};

static USER_AGENT: &str = "github-user-sync";

/// Authenticated read-only client for the GitHub REST API.
#[derive(Debug)]
pub struct GithubApiClient {
    client: Client,
    base_url: String,
}

impl GithubApiClient {
    // Header entries
    const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
    const API_VERSION: &str = "2022-11-28";
    const ACCEPT_APPLICATION_CONTENT: &str = "application/vnd.github+json";

    pub fn new(config: GithubApiConfig) -> eyre::Result<Self> {
        let GithubApiConfig { base_url, token, timeout } = config;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(Self::ACCEPT_APPLICATION_CONTENT));
        headers.insert(Self::API_VERSION_HEADER, HeaderValue::from_static(Self::API_VERSION));

        let mut auth = HeaderValue::from_str(&format!("token {token}"))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let mut builder = Client::builder().user_agent(USER_AGENT).default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self { client: builder.build()?, base_url })
    }

    /// Sends a request to `base_url` + `endpoint` and decodes the JSON body.
    ///
    /// The endpoint is appended to the base URL verbatim. Non-2xx responses
    /// surface the message from the API error body.
    async fn fetch(&self, method: Method, endpoint: &str) -> eyre::Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::trace!(target: "remote::github", %url, "Sending request");

        let response = match self.client.request(method, &url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(target: "remote::github", %url, %err, "Error sending request");
                return Err(err).wrap_err_with(|| format!("request to {url} failed"));
            }
        };

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .json::<ApiError>()
                .await
                .map(|err| err.message)
                .unwrap_or_else(|_| "unknown error".to_owned());
            tracing::error!(target: "remote::github", %url, %status, %message, "Request failed");
            eyre::bail!("request to {url} failed with status {status}: {message}")
        }
    }
}

#[async_trait]
impl UserSource for GithubApiClient {
    async fn user_details(&self, username: &str) -> eyre::Result<Value> {
        tracing::info!(target: "remote::github", %username, "Fetching user details");
        self.fetch(Method::GET, &format!("users/{username}")).await
    }

    async fn user_repos(&self, username: &str) -> eyre::Result<Value> {
        tracing::info!(target: "remote::github", %username, "Fetching user repositories");
        self.fetch(Method::GET, &format!("users/{username}/repos")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    /// Serves a single canned HTTP response on a loopback port.
    fn spawn_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/")
    }

    fn test_client(base_url: String) -> GithubApiClient {
        GithubApiClient::new(GithubApiConfig {
            base_url,
            token: "test-token".to_owned(),
            timeout: None,
        })
        .expect("failed to create client")
    }

    #[tokio::test]
    async fn user_details_returns_decoded_body() {
        let base_url = spawn_server("200 OK", r#"{"login":"octocat","id":1}"#);
        let client = test_client(base_url);

        let details = client.user_details("octocat").await.unwrap();
        assert_eq!(details, serde_json::json!({"login": "octocat", "id": 1}));
    }

    #[tokio::test]
    async fn user_repos_returns_decoded_body() {
        let base_url = spawn_server("200 OK", r#"[{"name":"hello-world","fork":false}]"#);
        let client = test_client(base_url);

        let repos = client.user_repos("octocat").await.unwrap();
        assert_eq!(repos, serde_json::json!([{"name": "hello-world", "fork": false}]));
    }

    #[tokio::test]
    async fn non_success_status_surfaces_api_message() {
        let base_url = spawn_server("404 Not Found", r#"{"message":"Not Found"}"#);
        let client = test_client(base_url);

        let err = client.user_details("missing").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("Not Found"));
    }

    #[tokio::test]
    async fn connection_error_mentions_request() {
        // Bind and drop to get a port with nothing listening on it.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = test_client(format!("http://127.0.0.1:{port}/"));

        let err = client.user_details("octocat").await.unwrap_err();
        assert!(err.to_string().contains("request"));
    }
}
