//! Argfile content tokenization.
//!
//! Tokens are separated by an unquoted space or newline. A `"` opens a quoted
//! span in which whitespace is literal; a backslash takes the next character
//! literally both inside and outside quotes. Leaving a quoted span does not end
//! the token.

use std::iter::FusedIterator;

const QUOTATION_MARK: char = '"';
const BACKSLASH: char = '\\';
const WHITESPACE: char = ' ';
const NEWLINE: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unquoted,
    Quoted,
}

/// Lazy, one-shot sequence of decoded argfile tokens.
///
/// End of input is never an error: a trailing backslash escapes nothing, and an
/// unterminated quoted span simply ends with the input.
#[derive(Debug)]
pub struct Tokens<I> {
    chars: I,
    finished: bool,
}

impl<I: Iterator<Item = char>> Tokens<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            finished: false,
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Tokens<I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        let mut current = String::new();
        let mut mode = Mode::Unquoted;

        while let Some(c) = self.chars.next() {
            match (mode, c) {
                (Mode::Unquoted, WHITESPACE | NEWLINE) => return Some(current),
                (Mode::Unquoted, QUOTATION_MARK) => mode = Mode::Quoted,
                (Mode::Quoted, QUOTATION_MARK) => mode = Mode::Unquoted,
                (_, BACKSLASH) => {
                    if let Some(escaped) = self.chars.next() {
                        current.push(escaped);
                    }
                }
                _ => current.push(c),
            }
        }

        self.finished = true;
        (!current.is_empty()).then_some(current)
    }
}

impl<I: Iterator<Item = char>> FusedIterator for Tokens<I> {}

/// Tokenize argfile content.
pub fn tokenize(content: &str) -> Tokens<std::str::Chars<'_>> {
    Tokens::new(content.chars())
}
