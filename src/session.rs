use thiserror::Error;

use crate::types::book::BookRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("primary key cannot be changed")]
    PrimaryKeyChanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Create,
    /// Holds the record as it was when the edit started; its isbn is the
    /// one the update request is addressed to.
    Editing(BookRecord),
}

/// The form: three free-text draft fields plus the mode flag. Field input
/// is unconstrained per keystroke; everything is checked at submit time.
#[derive(Debug, Default)]
pub struct EditSession {
    mode:       Mode,
    pub isbn:   String,
    pub title:  String,
    pub author: String,
}

impl EditSession {
    pub fn start_create(&mut self) {
        self.mode = Mode::Create;
        self.isbn.clear();
        self.title.clear();
        self.author.clear();
    }

    pub fn start_edit(&mut self, record: &BookRecord) {
        self.mode = Mode::Editing(record.clone());
        self.isbn = record.isbn.clone();
        self.title = record.title.clone();
        self.author = record.author.clone();
    }

    /// Safe from either mode.
    pub fn cancel(&mut self) {
        self.start_create();
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    /// Validates the draft and returns the record ready to serialize. In
    /// editing mode the draft isbn must still equal the original's; a
    /// mismatch fails here, before any request is built.
    pub fn build_submission(&self) -> Result<BookRecord, ValidationError> {
        if self.isbn.trim().is_empty() {
            return Err(ValidationError::MissingField("isbn"));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::MissingField("author"));
        }
        if let Mode::Editing(original) = &self.mode {
            if self.isbn != original.isbn {
                return Err(ValidationError::PrimaryKeyChanged);
            }
        }
        Ok(BookRecord {
            isbn:   self.isbn.clone(),
            title:  self.title.clone(),
            author: self.author.clone(),
        })
    }
}
