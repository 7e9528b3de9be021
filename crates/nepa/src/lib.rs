//! NEPA Reconcile CLI support library.
//!
//! The binary's command modules live in `src/main.rs`; this library exposes
//! the pieces they share with integration tests: the tabular/document
//! readers.

pub mod readers;
