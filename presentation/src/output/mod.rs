//! Output formatting for one-shot CLI commands

pub mod console;
