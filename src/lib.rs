//! debtlist - named lists of people and what they owe
//!
//! This crate provides the core functionality for the `debtlist` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface (clap) and the interactive menu
//! - [`model`] - Data types (List, Person)
//! - [`storage`] - SQLite database layer
//! - [`config`] - Database location
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub use error::{Error, Result};
