//! Bridge between the UI thread and the background submission worker.

pub mod commands;
pub mod runtime;
