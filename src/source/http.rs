//! HTTP implementation of [`PostApi`] using reqwest.
//!
//! Talks to any JSONPlaceholder-compatible server:
//!
//! - `GET {base}/posts` returns a JSON array of posts
//! - `GET {base}/posts/{id}/comments` returns a JSON array of comments

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{FetchError, PostApi};
use crate::data::{Comment, Post};

/// Public API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Posts API client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    description: String,
}

impl HttpApi {
    /// Create a new builder for configuring the client.
    pub fn builder() -> HttpApiBuilder {
        HttpApiBuilder::default()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn comments_url(&self, post_id: u64) -> String {
        format!("{}/posts/{}/comments", self.base_url, post_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PostApi for HttpApi {
    async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.get_json(&self.posts_url()).await
    }

    async fn fetch_comments(&self, post_id: u64) -> Result<Vec<Comment>, FetchError> {
        self.get_json(&self.comments_url(post_id)).await
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`HttpApi`].
#[derive(Debug, Default)]
pub struct HttpApiBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpApiBuilder {
    /// Set the API root (default: [`DEFAULT_BASE_URL`]).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a per-request timeout. Requests never time out unless this is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpApi, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let description = format!("http: {}", base_url);

        Ok(HttpApi {
            client,
            base_url,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned response and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut read = 0;
            loop {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    #[test]
    fn test_builder_defaults() {
        let api = HttpApi::builder().build().unwrap();
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
        assert_eq!(api.description(), "http: https://jsonplaceholder.typicode.com");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let api = HttpApi::builder()
            .base_url("http://localhost:3000/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.posts_url(), "http://localhost:3000/posts");
        assert_eq!(api.comments_url(42), "http://localhost:3000/posts/42/comments");
    }

    #[tokio::test]
    async fn test_fetch_posts_success() {
        let base = serve_once(
            "200 OK",
            r#"[{"userId":1,"id":1,"title":"Hello World","body":"b"},{"userId":1,"id":2,"title":"Goodbye","body":"b"}]"#,
        )
        .await;
        let api = HttpApi::builder().base_url(base).build().unwrap();

        let posts = api.fetch_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Hello World");
        assert_eq!(posts[1].id, 2);
    }

    #[tokio::test]
    async fn test_fetch_comments_success() {
        let base = serve_once(
            "200 OK",
            r#"[{"postId":3,"id":11,"name":"n","email":"a@b.c","body":"hi"}]"#,
        )
        .await;
        let api = HttpApi::builder().base_url(base).build().unwrap();

        let comments = api.fetch_comments(3).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, 3);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let base = serve_once("500 Internal Server Error", "oops").await;
        let api = HttpApi::builder().base_url(base).build().unwrap();

        let err = api.fetch_posts().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let base = serve_once("200 OK", "not json").await;
        let api = HttpApi::builder().base_url(base).build().unwrap();

        let err = api.fetch_posts().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
