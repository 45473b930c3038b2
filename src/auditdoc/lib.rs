//! # Auditdoc Architecture
//!
//! Auditdoc is a **UI-agnostic document core** for ISO 14001 audit
//! checklists. A document is a list of printable pages, each with a company
//! header, labeled meta fields, and a table of section and question rows.
//! The bundled binary is one client; a browser editor or a print renderer
//! would be others.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Reads/writes export files, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the Vec<Page> snapshot                              │
//! │  - Normalizes inputs (display numbers → ids)                │
//! │  - Replaces the snapshot with each command's result         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Operations (commands/, pagination.rs, outline.rs, codec.rs)│
//! │  - Pure functions: &[Page] in, Vec<Page> out                │
//! │  - Unknown ids are no-ops, never errors                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs, ids.rs)                                   │
//! │  - Page, Row, DocMetaItem, defaults and placeholders        │
//! │  - Injected id generation                                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes text and pages as arguments, returns pages and text
//! - **Never** touches the filesystem (except `config`)
//! - **Never** writes to stdout/stderr; diagnostics go through `tracing`
//!
//! ## Module Overview
//!
//! - [`model`]: pages, rows, meta items, option sets, template defaults
//! - [`ids`]: the [`ids::IdGenerator`] seam
//! - [`outline`]: plain-text outline to rows
//! - [`codec`]: versioned JSON export and normalizing import
//! - [`pagination`]: page breaks and flattening
//! - [`commands`]: row, header, page and column edits
//! - [`api`]: the stateful facade
//! - [`config`]: `config.json` defaults for new documents
//! - [`error`]: the crate error type

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod outline;
pub mod pagination;
