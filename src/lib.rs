//! argsplice - argfile expansion for command-line tools.
//!
//! Replaces `-Xargfile=<path>` arguments with the whitespace-separated,
//! quote-aware tokens stored in the referenced file, before any option
//! parsing takes place.

pub mod argfile;
pub mod audit;
pub mod config;
pub mod error;
pub mod output;

pub use argfile::{Diagnostics, Expander, Expansion, expand_argfiles, tokenize};
pub use config::Config;
pub use error::ArgfileError;
