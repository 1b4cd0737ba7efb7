//! Person model for debtlist.
//!
//! People belong to exactly one list. The debt is free text and is never
//! parsed as a number.

use serde::{Deserialize, Serialize};

/// A person recorded in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Row ID assigned by the database
    pub id: i64,

    /// ID of the owning list
    pub list_id: i64,

    pub name: String,

    pub surname: String,

    /// Amount owed, stored verbatim
    pub debt: String,
}

impl Person {
    /// "Name Surname" for status lines.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Replacement values for an edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub debt: Option<String>,
}

impl PersonPatch {
    /// Build a patch from raw prompt input, where an empty string means skip.
    #[must_use]
    pub fn from_inputs(name: &str, surname: &str, debt: &str) -> Self {
        Self {
            name: non_empty(name),
            surname: non_empty(surname),
            debt: non_empty(debt),
        }
    }

    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    /// `(column, value)` pairs for every non-empty field.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("surname", self.surname.as_deref()),
            ("debt", self.debt.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.filter(|v| !v.is_empty()).map(|v| (column, v)))
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
