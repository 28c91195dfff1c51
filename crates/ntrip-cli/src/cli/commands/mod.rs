//! CLI command handlers. Each command is in its own file.

mod completions;
mod list;
mod output;
mod parse;
mod sanitize;

pub use completions::{run_completions, run_man};
pub use list::run_list;
pub use parse::run_parse;
pub use sanitize::run_sanitize;
