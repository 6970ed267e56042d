//! Library crate for usuarios-tui.
//!
//! This crate exposes the building blocks of the TUI:
//! - Wire model and HTTP adapter for the collection (`api`)
//! - Application state, CRUD operations and update loop (`app`)
//! - Command-line configuration (`config`)
//! - Local mirror of the collection (`directory`)
//! - Error types (`error`)
//! - Log setup (`logging`)
//! - Grid search (`search`)
//! - UI rendering (`ui`)
//!
//! It is used by the `usuarios-tui` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use api::{HttpUsuarioApi, Usuario, UsuarioApi, UsuarioDraft, UsuarioId};
pub use error::{ApiError, DynError, Result};
