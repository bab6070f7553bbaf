// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The classification of a ledger note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// A record of a phone call.
    Call,
    /// A record of a problem.
    Issue,
    /// Anything else.
    General,
}

impl FromStr for NoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(Self::Call),
            "issue" => Ok(Self::Issue),
            "general" => Ok(Self::General),
            _ => Err(DomainError::InvalidNoteType(s.to_string())),
        }
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl NoteType {
    /// Converts this note type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Issue => "issue",
            Self::General => "general",
        }
    }
}

/// An immutable ledger entry attached to a booking or a user.
///
/// Notes are append-only: there is no update or delete operation
/// anywhere in the engine. Corrections are made by appending a new note
/// referencing the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// The note text, trimmed at construction.
    text: String,
    /// The classification of this note.
    note_type: NoteType,
    /// The user who wrote the note.
    author: UserId,
    /// When the note was appended.
    created_at: OffsetDateTime,
}

impl Note {
    /// Creates a new `Note`.
    ///
    /// The text is trimmed; a note whose text is empty after trimming is
    /// rejected.
    ///
    /// # Arguments
    ///
    /// * `text` - The note text
    /// * `note_type` - The classification of the note
    /// * `author` - The user writing the note
    /// * `created_at` - The append timestamp
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyNoteText` if the trimmed text is empty.
    pub fn new(
        text: &str,
        note_type: NoteType,
        author: UserId,
        created_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let trimmed: &str = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyNoteText);
        }
        Ok(Self {
            text: trimmed.to_owned(),
            note_type,
            author,
            created_at,
        })
    }

    /// Returns the note text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the note classification.
    #[must_use]
    pub const fn note_type(&self) -> NoteType {
        self.note_type
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns the append timestamp.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
