// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Splitting the options string into argv words.

use crate::span::Span;
use crate::validation::ValidationError;

/// Split `text` into words.
///
/// Unquoted spaces and tabs separate words. Single and double quotes group
/// their contents verbatim (no escapes, no expansion) and join with adjacent
/// unquoted text, so `a'b c'd` is the single word `ab cd` and `''` is an
/// empty argument.
pub fn split_words(text: &str) -> Result<Vec<String>, ValidationError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut open: Option<(char, usize)> = None;

    for (pos, ch) in text.char_indices() {
        match open {
            Some((quote, _)) if ch == quote => open = None,
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => {
                    open = Some((ch, pos));
                    in_word = true;
                }
                ' ' | '\t' => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                _ => {
                    current.push(ch);
                    in_word = true;
                }
            },
        }
    }

    if let Some((quote, pos)) = open {
        return Err(ValidationError::UnterminatedQuote { quote, span: Span::of_char(pos, quote) });
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
