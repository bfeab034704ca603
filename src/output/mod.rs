//! Output formatting for the command-line tool.

mod response;

pub use response::{format_diagnostics, format_expanded};
