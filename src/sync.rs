use tracing::{debug, info, warn};

use crate::{
    session::{EditSession, Mode},
    status::StatusNotifier,
    store::CollectionStore,
    traits::{BookApi, ConfirmPrompt},
    types::book::BookRecord,
};

/// Translates user intents into REST calls and folds the responses back
/// into the store, the edit session and the status line. The only place
/// that drives network I/O; store and session are plain state it mutates.
pub struct SyncController<A, C> {
    api:         A,
    confirm:     C,
    pub store:   CollectionStore,
    pub session: EditSession,
    pub status:  StatusNotifier,
}

impl<A: BookApi, C: ConfirmPrompt> SyncController<A, C> {
    pub fn new(api: A, confirm: C) -> Self {
        Self {
            api,
            confirm,
            store: CollectionStore::default(),
            session: EditSession::default(),
            status: StatusNotifier::default(),
        }
    }

    /// Full re-fetch of the authoritative list. Every mutation ends here
    /// rather than patching the local copy in place.
    pub async fn load(&mut self) {
        self.store.begin();
        let result = self.api.list().await;
        self.store.finish(result);
    }

    pub async fn refresh(&mut self) {
        self.status.clear();
        self.load().await;
    }

    pub fn edit(&mut self, record: &BookRecord) {
        self.session.start_edit(record);
        self.status
            .info(format!("Editing \"{}\" ({})", record.title, record.isbn));
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    pub async fn submit(&mut self) {
        self.status.clear();
        // Snapshot mode and draft before the first await; a draft edited
        // while the request is in flight can't change its payload.
        let mode = self.session.mode().clone();
        let book = match self.session.build_submission() {
            Ok(book) => book,
            Err(e) => {
                warn!("submission rejected: {e}");
                self.status.error(e.to_string());
                return;
            }
        };
        let result = match &mode {
            Mode::Create => self.api.create(&book).await,
            // Addressed by the original isbn; build_submission guarantees
            // the draft's isbn equals it anyway.
            Mode::Editing(original) => self.api.update(&original.isbn, &book).await,
        };
        match result {
            Ok(()) => {
                info!(isbn = %book.isbn, "saved");
                self.status.success(format!("Saved \"{}\"", book.title));
                self.session.start_create();
                self.load().await;
            }
            Err(e) => {
                // Draft is left alone so the user can correct and resubmit.
                self.status.error(e.to_string());
            }
        }
    }

    pub async fn remove(&mut self, isbn: &str, title: &str) -> anyhow::Result<()> {
        // Confirmation comes before everything, including the status
        // clear: declining leaves no trace.
        if !self.confirm.confirm_delete(isbn, title)? {
            debug!(isbn, "delete declined");
            return Ok(());
        }
        self.status.clear();
        match self.api.delete(isbn).await {
            Ok(()) => {
                let was_editing_it =
                    matches!(self.session.mode(), Mode::Editing(original) if original.isbn == isbn);
                if was_editing_it {
                    self.session.start_create();
                }
                info!(isbn, "deleted");
                self.status
                    .success(format!("Deleted \"{title}\" ({isbn})"));
                self.load().await;
            }
            Err(e) if e.is_not_found() => {
                self.status
                    .error(format!("\"{title}\" was not found on the server"));
            }
            Err(e) => {
                self.status.error(e.to_string());
            }
        }
        Ok(())
    }
}
