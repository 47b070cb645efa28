use std::sync::Mutex;

use pretty_assertions::assert_eq;

use hylla::{
    api::ApiError,
    session::Mode,
    status::{StatusKind, StatusMessage},
    store::LoadState,
    sync::SyncController,
    traits::{BookApi, ConfirmPrompt},
    types::book::BookRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    List,
    Create(BookRecord),
    Update { isbn: String, book: BookRecord },
    Delete(String),
}

/// Scripted stand-in for the book service. Records every call so tests can
/// assert that validation failures and declined confirmations never reach
/// the network.
#[derive(Default)]
struct FakeApi {
    calls:          Mutex<Vec<Call>>,
    books:          Mutex<Vec<BookRecord>>,
    list_error:     Mutex<Option<ApiError>>,
    mutation_error: Mutex<Option<ApiError>>,
}

impl FakeApi {
    fn with_books(books: Vec<BookRecord>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Self::default()
        }
    }

    fn fail_next_list(&self, error: ApiError) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    fn fail_next_mutation(&self, error: ApiError) {
        *self.mutation_error.lock().unwrap() = Some(error);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_mutation_error(&self) -> Result<(), ApiError> {
        match self.mutation_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl BookApi for &FakeApi {
    async fn list(&self) -> Result<Vec<BookRecord>, ApiError> {
        self.record(Call::List);
        match self.list_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(self.books.lock().unwrap().clone()),
        }
    }

    async fn create(&self, book: &BookRecord) -> Result<(), ApiError> {
        self.record(Call::Create(book.clone()));
        self.take_mutation_error()?;
        self.books.lock().unwrap().push(book.clone());
        Ok(())
    }

    async fn update(&self, isbn: &str, book: &BookRecord) -> Result<(), ApiError> {
        self.record(Call::Update {
            isbn: isbn.into(),
            book: book.clone(),
        });
        self.take_mutation_error()?;
        let mut books = self.books.lock().unwrap();
        if let Some(existing) = books.iter_mut().find(|b| b.isbn == isbn) {
            *existing = book.clone();
        }
        Ok(())
    }

    async fn delete(&self, isbn: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(isbn.into()));
        self.take_mutation_error()?;
        self.books.lock().unwrap().retain(|b| b.isbn != isbn);
        Ok(())
    }
}

struct Confirming(bool);

impl ConfirmPrompt for Confirming {
    fn confirm_delete(&self, _isbn: &str, _title: &str) -> anyhow::Result<bool> {
        Ok(self.0)
    }
}

fn book(isbn: &str, title: &str, author: &str) -> BookRecord {
    BookRecord {
        isbn:   isbn.into(),
        title:  title.into(),
        author: author.into(),
    }
}

#[tokio::test]
async fn load_reflects_the_server_list_exactly() {
    let api = FakeApi::with_books(vec![
        book("333", "C", "Z"),
        book("111", "A", "X"),
        book("222", "B", "Y"),
    ]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;
    assert_eq!(c.store.state(), LoadState::Ready);
    assert_eq!(
        c.store.books(),
        &[
            book("333", "C", "Z"),
            book("111", "A", "X"),
            book("222", "B", "Y"),
        ]
    );
}

#[tokio::test]
async fn load_failure_keeps_the_previous_list() {
    let api = FakeApi::with_books(vec![book("111", "A", "X")]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;
    api.fail_next_list(ApiError::Http {
        status:  500,
        message: "HTTP 500 Internal Server Error".into(),
    });
    c.load().await;
    assert_eq!(c.store.state(), LoadState::Failed);
    assert_eq!(c.store.error(), Some("HTTP 500 Internal Server Error"));
    assert_eq!(c.store.books(), &[book("111", "A", "X")]);
}

#[tokio::test]
async fn editing_a_record_and_retitling_it_issues_a_put_then_a_reload() {
    let api = FakeApi::with_books(vec![book("111", "A", "X")]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;

    let record = c.store.find("111").unwrap().clone();
    c.edit(&record);
    assert_eq!(c.status.current().unwrap().kind, StatusKind::Info);
    assert!(c.status.current().unwrap().text.contains("111"));

    c.session.title = "B".into();
    c.submit().await;

    assert_eq!(
        api.calls(),
        vec![
            Call::List,
            Call::Update {
                isbn: "111".into(),
                book: book("111", "B", "X"),
            },
            Call::List,
        ]
    );
    let status = c.status.current().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert!(status.text.contains("B"));
    // session is back to a blank create draft
    assert_eq!(c.session.mode(), &Mode::Create);
    assert_eq!(c.session.isbn, "");
    // and the displayed list reflects the re-fetch
    assert_eq!(c.store.books(), &[book("111", "B", "X")]);
}

#[tokio::test]
async fn create_submission_posts_then_reloads() {
    let api = FakeApi::with_books(vec![]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;

    c.session.start_create();
    c.session.isbn = "111".into();
    c.session.title = "A".into();
    c.session.author = "X".into();
    c.submit().await;

    assert_eq!(
        api.calls(),
        vec![Call::List, Call::Create(book("111", "A", "X")), Call::List]
    );
    assert_eq!(c.status.current().unwrap().kind, StatusKind::Success);
    assert_eq!(c.store.books(), &[book("111", "A", "X")]);
}

#[tokio::test]
async fn changed_primary_key_is_rejected_before_any_network_call() {
    let api = FakeApi::with_books(vec![book("111", "A", "X")]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;

    let record = c.store.find("111").unwrap().clone();
    c.edit(&record);
    c.session.isbn = "999".into();
    c.submit().await;

    // only the initial load hit the api
    assert_eq!(api.calls(), vec![Call::List]);
    let status = c.status.current().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "primary key cannot be changed");
    // the draft is preserved so the user can correct it
    assert!(c.session.is_editing());
    assert_eq!(c.session.isbn, "999");
}

#[tokio::test]
async fn blank_fields_are_rejected_with_zero_network_calls() {
    let api = FakeApi::with_books(vec![]);
    let mut c = SyncController::new(&api, Confirming(true));

    c.session.start_create();
    c.session.title = "A".into();
    c.submit().await;

    assert_eq!(api.calls(), vec![]);
    let status = c.status.current().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "isbn is required");
}

#[tokio::test]
async fn update_failure_preserves_the_draft_and_surfaces_the_server_message() {
    let api = FakeApi::with_books(vec![book("111", "A", "X")]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;

    let record = c.store.find("111").unwrap().clone();
    c.edit(&record);
    c.session.title = "B".into();
    api.fail_next_mutation(ApiError::Http {
        status:  404,
        message: "no such book".into(),
    });
    c.submit().await;

    let status = c.status.current().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "no such book");
    // no reload was triggered and nothing was reset
    assert_eq!(c.store.books(), &[book("111", "A", "X")]);
    assert!(c.session.is_editing());
    assert_eq!(c.session.title, "B");
}

#[tokio::test]
async fn declined_confirmation_is_a_complete_no_op() {
    let api = FakeApi::with_books(vec![book("111", "A", "X")]);
    let mut c = SyncController::new(&api, Confirming(false));
    c.load().await;

    let record = c.store.find("111").unwrap().clone();
    c.edit(&record);
    let before = c.status.current().cloned();

    c.remove("111", "A").await.unwrap();

    assert_eq!(api.calls(), vec![Call::List]);
    assert_eq!(c.status.current().cloned(), before);
}

#[tokio::test]
async fn confirmed_delete_issues_the_request_and_reloads() {
    let api = FakeApi::with_books(vec![book("111", "A", "X"), book("222", "B", "Y")]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;

    c.remove("111", "A").await.unwrap();

    assert_eq!(
        api.calls(),
        vec![Call::List, Call::Delete("111".into()), Call::List]
    );
    let status = c.status.current().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert!(status.text.contains("A"));
    assert_eq!(c.store.books(), &[book("222", "B", "Y")]);
}

#[tokio::test]
async fn deleting_the_record_being_edited_resets_the_session() {
    let api = FakeApi::with_books(vec![book("111", "A", "X")]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;

    let record = c.store.find("111").unwrap().clone();
    c.edit(&record);
    c.remove("111", "A").await.unwrap();

    assert_eq!(c.session.mode(), &Mode::Create);
    assert_eq!(c.session.isbn, "");
}

#[tokio::test]
async fn delete_404_gets_the_specific_not_found_message() {
    let api = FakeApi::with_books(vec![book("111", "A", "X")]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.load().await;

    api.fail_next_mutation(ApiError::Http {
        status:  404,
        message: "HTTP 404 Not Found".into(),
    });
    c.remove("111", "A").await.unwrap();

    let status = c.status.current().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "\"A\" was not found on the server");
    // no reload on failure
    assert_eq!(api.calls(), vec![Call::List, Call::Delete("111".into())]);
    assert_eq!(c.store.books(), &[book("111", "A", "X")]);
}

#[tokio::test]
async fn refresh_clears_the_status_before_reloading() {
    let api = FakeApi::with_books(vec![]);
    let mut c = SyncController::new(&api, Confirming(true));
    c.status.error("stale");
    assert_eq!(
        c.status.current(),
        Some(&StatusMessage {
            text: "stale".into(),
            kind: StatusKind::Error,
        })
    );

    c.refresh().await;

    assert_eq!(c.status.current(), None);
    assert_eq!(api.calls(), vec![Call::List]);
    assert_eq!(c.store.state(), LoadState::Ready);
}
