//! CLI command handlers. Each command is in its own file.

mod completions;
mod get;
mod probe;
mod support;

pub use completions::run_completions;
pub use get::{run_get, GetArgs};
pub use probe::{run_probe, ProbeArgs};
