//! # CLI Layer
//!
//! One client of the archpm library, and the only code that touches the
//! terminal: argument parsing, stdin prompts, colored output and exit codes.
//!
//! ## Structure
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` plus one handler per one-shot command
//! - `session`: the interactive session over the `Navigator`
//! - `render`: text layout and colored message output
//!
//! One-shot commands print their non-error messages to stdout and turn the
//! first error message into the process error, which `main` prints to stderr
//! before exiting with status 1.

mod commands;
mod render;
mod session;
mod setup;

pub use commands::run;
