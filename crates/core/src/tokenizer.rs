// SPDX-License-Identifier: MIT

//! Condition string tokenizer
//!
//! Splits a raw condition string into a lazy stream of tokens. A token
//! boundary occurs whenever the character class changes, a separator is
//! consumed, or a parenthesis is encountered.

/// Returns whether the character separates tokens.
fn is_separator(ch: char) -> bool {
    ch.is_whitespace()
}

/// Returns whether the character can appear in an operator token.
fn is_operator_char(ch: char) -> bool {
    matches!(ch, '>' | '<' | '=' | '!' | '#' | '?' | '^' | '$')
}

/// Returns whether the character can appear in a value/identifier token.
///
/// The dot is included so bare numeric literals like `1.5` and duration
/// literals like `1.5h` stay a single token; the underscore so patterns
/// like `tmp_` can be matched against file names.
fn is_value_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '.' || ch == '_'
}

/// A lazy tokenizer over a condition string.
///
/// Each parse creates a fresh `Tokenizer`; tokens are produced on demand
/// and consumed exactly once. Iterator exhaustion is the end marker.
pub(crate) struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Tokenizer {
            chars: input.chars().peekable(),
        }
    }

    fn take_while(&mut self, token: &mut String, accept: fn(char) -> bool) {
        while let Some(&ch) = self.chars.peek() {
            if !accept(ch) {
                break;
            }
            token.push(ch);
            self.chars.next();
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(&ch) = self.chars.peek() {
            if !is_separator(ch) {
                break;
            }
            self.chars.next();
        }

        let first = self.chars.next()?;
        let mut token = String::from(first);

        if is_value_char(first) {
            self.take_while(&mut token, is_value_char);
        } else if is_operator_char(first) {
            self.take_while(&mut token, is_operator_char);
        }
        // Parens and any other character stand alone as one-char tokens.

        Some(token)
    }
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
