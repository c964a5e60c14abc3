//! # archpm Architecture
//!
//! archpm keeps the contacts and projects of an architecture practice in a
//! single SQLite file. The library owns every rule about those records; the
//! `archpm` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - One-shot commands and the interactive session            │
//! │  - The ONLY place that knows about stdout/stdin/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation models (ui/) and API facade (api.rs)          │
//! │  - ListView / FormView and the Navigator state machine      │
//! │  - ArchpmApi dispatches one command per call                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Turns gateway outcomes into (success, message) results   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/) over static schemas (schema/)       │
//! │  - RecordStore trait, ContactStore and ProjectStore         │
//! │  - Validation, SQL generation and column layout per table   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! Below `cli/`, nothing writes to stdout or stderr (diagnostics go through
//! `tracing`), reads stdin, or exits the process. The views in `ui/` are plain
//! state: a front end feeds events in and draws what they hold.
//!
//! ## Module Overview
//!
//! - [`api`]: facade over the commands
//! - [`commands`]: one module per operation
//! - [`store`]: database location, gateway trait and the two gateways
//! - [`schema`]: table configuration and validation rules
//! - [`model`]: field maps and the typed `Contact` / `Project` records
//! - [`ui`]: list, form and navigation state
//! - [`config`]: `config.json` handling
//! - [`init`]: data directory and database resolution
//! - [`editor`]: external editor integration for forms
//! - [`error`]: error type
//! - `cli`: argument parsing, rendering and the session loop (binary only)

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod init;
pub mod model;
pub mod schema;
pub mod store;
pub mod ui;
