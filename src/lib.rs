//! Library crate for user-directory.
//!
//! This crate exposes the building blocks of the TUI:
//! - The view component, UI state and event loop (`app`)
//! - Error and result types (`error`)
//! - The record model and remote data source (`source`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `user-directory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod source;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use app::view::{Region, UserDirectoryView, ViewState};
/// Convenient error and result types shared across the crate.
pub use error::{DynError, FetchError, Result};
pub use source::{HttpSource, Record, RecordSource};
