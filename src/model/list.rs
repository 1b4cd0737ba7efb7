//! List model for debtlist.
//!
//! A list is a named container of people. Names are unique across lists.

use serde::{Deserialize, Serialize};

/// A named list of people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Row ID assigned by the database
    pub id: i64,

    /// Display name, unique across all lists
    pub name: String,
}

impl List {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Result of trying to create a list.
///
/// A duplicate name is an expected outcome rather than an error, so callers
/// can warn and carry on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateListOutcome {
    Created(List),
    DuplicateName,
}

impl CreateListOutcome {
    /// The created list, if any.
    #[must_use]
    pub fn created(self) -> Option<List> {
        match self {
            Self::Created(list) => Some(list),
            Self::DuplicateName => None,
        }
    }
}

/// What a list deletion removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteListOutcome {
    /// Number of people removed along with the list.
    pub people_removed: usize,
    /// False when no list had the given ID.
    pub list_removed: bool,
}
