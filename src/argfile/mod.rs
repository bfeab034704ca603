//! Argfile expansion.

mod expand;
mod tokenizer;

pub use expand::{
    ArgfileRecord, DEFAULT_MARKER, Diagnostics, Expander, Expansion, ReferenceSyntax,
};
pub use tokenizer::{Tokens, tokenize};

/// Expand `-Xargfile=<path>` references in `args`.
///
/// Shorthand for [`Expander::default`] followed by [`Expander::expand`].
pub fn expand_argfiles<I, S, D>(args: I, diagnostics: &mut D) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: Diagnostics + ?Sized,
{
    Expander::default().expand(args, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_argfiles_uses_default_marker() {
        let mut errors: Vec<String> = Vec::new();
        let expanded = expand_argfiles(
            ["-Xargfile=/nonexistent/argsplice/args", "--flagfile=x", "Main.kt"],
            &mut errors,
        );
        assert_eq!(expanded, vec!["--flagfile=x", "Main.kt"]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Argfile not found: /nonexistent/argsplice/args"));
    }
}
