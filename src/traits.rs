use anyhow::Result;

use crate::{api::ApiError, types::book::BookRecord};

/// REST surface of the book service. The sync controller only ever talks
/// to this trait, so tests can drive it with a scripted in-memory fake and
/// assert on exactly which calls were made.
#[allow(async_fn_in_trait)]
pub trait BookApi {
    async fn list(&self) -> Result<Vec<BookRecord>, ApiError>;
    async fn create(&self, book: &BookRecord) -> Result<(), ApiError>;
    async fn update(&self, isbn: &str, book: &BookRecord) -> Result<(), ApiError>;
    async fn delete(&self, isbn: &str) -> Result<(), ApiError>;
}

/// Blocking yes/no confirmation shown before a delete goes out. A decline
/// makes the whole operation a no-op.
pub trait ConfirmPrompt {
    fn confirm_delete(&self, isbn: &str, title: &str) -> Result<bool>;
}
