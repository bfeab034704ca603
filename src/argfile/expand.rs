//! Argfile reference detection and splicing.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::tokenizer::tokenize;
use crate::error::ArgfileError;

/// Marker recognized when no other configuration is given.
pub const DEFAULT_MARKER: &str = "-Xargfile";

/// Caller-owned collector for expansion errors.
///
/// The expander only ever appends to it.
pub trait Diagnostics {
    fn push_error(&mut self, message: String);
}

impl Diagnostics for Vec<String> {
    fn push_error(&mut self, message: String) {
        self.push(message);
    }
}

/// A `<marker>=<path>` argfile reference form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSyntax {
    marker: String,
    prefix: String,
}

impl ReferenceSyntax {
    pub fn new(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        let prefix = format!("{}=", marker);
        Self { marker, prefix }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// The path named by `arg`, if `arg` is a reference in this form.
    ///
    /// This is a plain prefix test: no trimming and no case folding.
    pub fn path_of<'a>(&self, arg: &'a str) -> Option<&'a str> {
        arg.strip_prefix(self.prefix.as_str())
    }
}

impl Default for ReferenceSyntax {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

/// What happened to one argfile reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgfileRecord {
    /// Marker of the matching reference form.
    pub marker: String,
    /// Resolved absolute path.
    pub path: PathBuf,
    /// Number of tokens spliced in place of the reference.
    pub tokens: usize,
    /// Diagnostic pushed for this reference, if reading failed.
    pub error: Option<String>,
}

/// Expanded arguments plus a record of every argfile consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub args: Vec<String>,
    pub argfiles: Vec<ArgfileRecord>,
}

/// Replaces argfile references in an argument list with the file's tokens.
#[derive(Debug, Clone)]
pub struct Expander {
    syntaxes: Vec<ReferenceSyntax>,
    skip_empty_tokens: bool,
    base_dir: Option<PathBuf>,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new(vec![ReferenceSyntax::default()])
    }
}

impl Expander {
    pub fn new(syntaxes: Vec<ReferenceSyntax>) -> Self {
        Self {
            syntaxes,
            skip_empty_tokens: false,
            base_dir: None,
        }
    }

    /// Drop empty tokens produced by consecutive delimiters.
    pub fn skip_empty_tokens(mut self, skip: bool) -> Self {
        self.skip_empty_tokens = skip;
        self
    }

    /// Resolve relative argfile paths against `dir` instead of the process
    /// working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn syntaxes(&self) -> &[ReferenceSyntax] {
        &self.syntaxes
    }

    /// Expand every argfile reference in `args`, in place and in order.
    ///
    /// Unreadable argfiles push one message onto `diagnostics` and expand to
    /// nothing; the remaining arguments are still processed.
    pub fn expand<I, S, D>(&self, args: I, diagnostics: &mut D) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Diagnostics + ?Sized,
    {
        self.expand_recorded(args, diagnostics).args
    }

    /// Like [`Expander::expand`], also reporting each argfile consulted.
    pub fn expand_recorded<I, S, D>(&self, args: I, diagnostics: &mut D) -> Expansion
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: Diagnostics + ?Sized,
    {
        let mut expansion = Expansion::default();

        for arg in args {
            let arg = arg.into();
            let reference = self
                .reference(&arg)
                .map(|(syntax, raw)| (syntax, raw.is_empty(), self.resolve(Path::new(raw))));

            let Some((syntax, empty_path, path)) = reference else {
                expansion.args.push(arg);
                continue;
            };

            // An empty path names no file, even though it resolves to a directory.
            let read = if empty_path {
                Err(ArgfileError::NotFound { path: path.clone() })
            } else {
                read_argfile(&path)
            };

            let (tokens, error) = match read {
                Ok(tokens) => {
                    let before = expansion.args.len();
                    expansion.args.extend(
                        tokens
                            .into_iter()
                            .filter(|t| !(self.skip_empty_tokens && t.is_empty())),
                    );
                    (expansion.args.len() - before, None)
                }
                Err(e) => {
                    let message = e.to_string();
                    diagnostics.push_error(message.clone());
                    (0, Some(message))
                }
            };

            expansion.argfiles.push(ArgfileRecord {
                marker: syntax.marker().to_string(),
                path,
                tokens,
                error,
            });
        }

        expansion
    }

    fn reference<'s, 'a>(&'s self, arg: &'a str) -> Option<(&'s ReferenceSyntax, &'a str)> {
        self.syntaxes
            .iter()
            .find_map(|syntax| syntax.path_of(arg).map(|path| (syntax, path)))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let joined = match &self.base_dir {
            Some(base) => base.join(path),
            None if path.as_os_str().is_empty() => std::env::current_dir().unwrap_or_default(),
            None => path.to_path_buf(),
        };
        std::path::absolute(&joined).unwrap_or(joined)
    }
}

/// Read and tokenize one argfile. The file is closed before returning.
fn read_argfile(path: &Path) -> Result<Vec<String>, ArgfileError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ArgfileError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ArgfileError::Read(e),
    })?;

    let mut content = String::new();
    BufReader::new(file).read_to_string(&mut content)?;
    Ok(tokenize(&content).collect())
}
