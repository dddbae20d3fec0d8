//! Quill Core - markdown editing engine
//!
//! This crate provides the editing core for the quill markdown editor:
//!
//! - **Selection**: byte-offset selection ranges with UTF-16 conversion for
//!   browser hosts
//! - **Action**: the closed set of toolbar actions and their identifiers
//! - **Engine**: pure transforms that apply a toolbar action to a buffer and
//!   selection
//! - **History**: linear undo/redo over buffer snapshots
//! - **Session**: one open document, wiring the engine and history to autosave
//! - **Store**: the document persistence contract and an in-memory backend
//! - **Export**: markdown, text, HTML and PDF export
//! - **Config**: editor settings loaded from TOML or JSON
//!
//! Document records, validation and statistics live in `quill-domain`.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod selection;
pub mod session;
pub mod store;

pub use action::*;
pub use config::*;
pub use engine::*;
pub use error::{QuillError, Result};
pub use export::{export_document, ExportArtifact, ExportError, ExportFormat, PdfRenderer};
pub use history::*;
pub use selection::*;
pub use session::*;
pub use store::*;

pub use quill_domain;
