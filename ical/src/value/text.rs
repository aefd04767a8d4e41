// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text value escaping as defined in RFC 5545 Section 3.3.11.

use logos::Logos;

/// Escape a free-text value for the wire.
///
/// Newline, backslash, semicolon and comma are replaced by their backslash
/// sequences in a single left-to-right pass, so an escaped backslash is never
/// escaped twice.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            _ => result.push(c),
        }
    }
    result
}

/// Resolve the escape sequences of a wire text value.
///
/// This is the exact left inverse of [`escape`]. `\N` is accepted as a
/// newline as well; any other backslash sequence is kept verbatim.
#[must_use]
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut lexer = TextToken::lexer(s);
    while let Some(token) = lexer.next() {
        match token {
            Ok(TextToken::Newline) => result.push('\n'),
            Ok(TextToken::Backslash) => result.push('\\'),
            Ok(TextToken::Semicolon) => result.push(';'),
            Ok(TextToken::Comma) => result.push(','),
            Ok(TextToken::Literal(part)) => result.push_str(part),
            Ok(TextToken::Stray) | Err(()) => result.push_str(lexer.slice()),
        }
    }
    result
}

/// Token emitted while scanning an escaped text value
#[derive(Debug, PartialEq, Eq, Clone, Copy, Logos)]
enum TextToken<'a> {
    #[token("\\n")]
    #[token("\\N")]
    Newline,

    #[token("\\\\")]
    Backslash,

    #[token("\\;")]
    Semicolon,

    #[token("\\,")]
    Comma,

    /// Run of characters without any backslash
    #[regex(r"[^\\]+")]
    Literal(&'a str),

    /// Backslash that does not start a known escape
    #[token("\\")]
    Stray,
}
