//! Bridge between the UI thread and the background worker.

pub mod commands;
pub mod runtime;
