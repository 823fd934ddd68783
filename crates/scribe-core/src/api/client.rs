//! API client for communicating with the articles REST service.
//!
//! This module provides the `ApiClient` struct for logging in and for the
//! CRUD operations on the articles collection. An `ApiClient` is either
//! unauthenticated (as used for login) or carries a token captured at
//! construction time via [`ApiClient::with_token`]; that clone attaches the
//! token as the `Authorization` header on every request it issues.

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::models::{
    ArticleDraft, ArticleResponse, ArticlesResponse, LoginResponse, MessageResponse,
};

use super::ApiError;

/// API client for the articles service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new unauthenticated API client.
    ///
    /// No timeout is configured: a request stays pending until the server
    /// answers or the connection drops.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Create a new ApiClient carrying the given token, sharing the
    /// connection pool. Every request issued by the returned client sends
    /// the token as its `Authorization` header.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The service expects the raw token as the header value, no scheme
    /// prefix. With no token set the header is omitted entirely rather than
    /// sent empty.
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(header::AUTHORIZATION, header::HeaderValue::from_str(token)?);
        }
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send PUT request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Operations =====

    /// Authenticate and return the token plus the service's greeting.
    /// Login goes out unauthenticated regardless of any token on this client.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url("/login");
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .context("Failed to parse login response")
    }

    /// Fetch the full articles collection.
    pub async fn fetch_articles(&self) -> Result<ArticlesResponse> {
        debug!("Fetching articles");
        self.get("/articles").await
    }

    /// Create a new article.
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<ArticleResponse> {
        debug!(title = %draft.title, "Creating article");
        self.post("/articles", draft).await
    }

    /// Update an existing article.
    pub async fn update_article(
        &self,
        article_id: i64,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse> {
        debug!(article_id, "Updating article");
        self.put(&format!("/articles/{}", article_id), draft).await
    }

    /// Delete an article.
    pub async fn delete_article(&self, article_id: i64) -> Result<MessageResponse> {
        debug!(article_id, "Deleting article");
        self.delete(&format!("/articles/{}", article_id)).await
    }
}
