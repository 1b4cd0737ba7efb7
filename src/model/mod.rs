//! Data models for debtlist.
//!
//! - List
//! - Person

pub mod list;
pub mod person;

pub use list::{CreateListOutcome, DeleteListOutcome, List};
pub use person::{Person, PersonPatch};
