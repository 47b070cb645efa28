use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::config::{Config, Styleable};

/// A single book as the server stores it. The isbn doubles as the primary
/// key and as the path segment addressing the record for update/delete, so
/// it must never change once the record exists on the server.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub isbn:   String,
    pub title:  String,
    pub author: String,
}

impl BookRecord {
    pub fn styled(&self, config: &Config) -> String {
        format!(
            "{} by {} ({})",
            self.title.style(&config.output_book.style_content),
            self.author.style(&config.output_author.style_content),
            self.isbn.style(&config.output_isbn.style_content),
        )
    }
}

impl Display for BookRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.isbn)
    }
}
