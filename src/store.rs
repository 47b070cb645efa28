use crate::{api::ApiError, types::book::BookRecord};

/// What the collection view is allowed to render: a loading indicator, an
/// error banner, or the list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Failed,
    Ready,
}

/// Authoritative in-memory copy of the server's book list. Replaced
/// wholesale on every successful fetch, never patched record by record.
#[derive(Debug, Default)]
pub struct CollectionStore {
    books: Vec<BookRecord>,
    state: LoadState,
    error: Option<String>,
}

impl CollectionStore {
    /// Marks a fetch as in flight. A stale error banner is intentionally
    /// left in place until the attempt resolves.
    pub fn begin(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Applies the outcome of a fetch. A failure leaves the previously
    /// loaded books untouched so the user keeps whatever they last saw.
    pub fn finish(&mut self, result: Result<Vec<BookRecord>, ApiError>) {
        match result {
            Ok(books) => {
                self.books = books;
                self.error = None;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = LoadState::Failed;
            }
        }
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, isbn: &str) -> Option<&BookRecord> {
        self.books.iter().find(|b| b.isbn == isbn)
    }
}
