use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{traits::BookApi, types::book::BookRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response. The message is already human readable: the
    /// server's `message`/`error` field when the body carried one,
    /// otherwise synthesized from the status line.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

/// Shape of an error body when the server bothers to send one.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error:   Option<String>,
}

/// Builds the error for a non-2xx response, preferring a server-supplied
/// message over the synthesized status line.
fn resolve_error(status: StatusCode, body: &str) -> ApiError {
    let fallback = format!(
        "HTTP {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .trim_end()
    .to_string();
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.or(parsed.error).unwrap_or(fallback),
        Err(_) => fallback,
    };
    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}

/// Interprets a list response body. 204 and an empty body both mean
/// "no books yet", not an error.
fn parse_list_body(status: StatusCode, body: &str) -> Result<Vec<BookRecord>, ApiError> {
    if !status.is_success() {
        return Err(resolve_error(status, body));
    }
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Ok(vec![]);
    }
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| ApiError::Decode(e.to_string()))
}

/// reqwest-backed client for the book service. No timeout is set; an
/// unresolved request simply leaves the collection in its loading state.
pub struct HttpApi {
    client:   reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// The base URL is normalized to end in a slash, so the list endpoint
    /// is `{base}books` and item endpoints are `{base}{isbn}`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}books", self.base_url)
    }

    fn create_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, isbn: &str) -> String {
        format!("{}{}", self.base_url, isbn)
    }

    async fn expect_success(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<(), ApiError> {
        let response = response.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        debug!("<- {status}");
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(resolve_error(status, &body))
        }
    }
}

impl BookApi for HttpApi {
    async fn list(&self) -> Result<Vec<BookRecord>, ApiError> {
        let url = self.collection_url();
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        debug!("<- {status}");
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        parse_list_body(status, &body)
    }

    async fn create(&self, book: &BookRecord) -> Result<(), ApiError> {
        let url = self.create_url();
        debug!("POST {url}");
        Self::expect_success(self.client.post(url).json(book).send().await).await
    }

    async fn update(&self, isbn: &str, book: &BookRecord) -> Result<(), ApiError> {
        let url = self.item_url(isbn);
        debug!("PUT {url}");
        Self::expect_success(self.client.put(&url).json(book).send().await).await
    }

    async fn delete(&self, isbn: &str) -> Result<(), ApiError> {
        let url = self.item_url(isbn);
        debug!("DELETE {url}");
        Self::expect_success(self.client.delete(&url).send().await).await
    }
}
