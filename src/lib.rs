//! Library crate for userdash.
//!
//! This crate exposes the building blocks of the terminal dashboard:
//! - Remote users resource client (`api`)
//! - Application state, routing and update loop (`app`)
//! - Error and result types (`error`)
//! - Create/edit form and validation (`form`)
//! - User records and drafts (`model`)
//! - Toast notifications (`notify`)
//! - In-memory search helpers (`search`)
//! - Shared user collection with refresh (`store`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userdash` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod error;
pub mod form;
pub mod model;
pub mod notify;
pub mod search;
pub mod store;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{ApiError, Result};
