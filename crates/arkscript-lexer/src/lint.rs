//! Checks for what the interpreter's own lexer rejects.
//!
//! The highlighter tolerates any input and works a line at a time. The
//! interpreter scans the whole script in one pass and gives up on the first
//! character it cannot place, so this pass uses the interpreter's character
//! classes rather than the highlighter's token kinds:
//!
//! - identifiers start with a (Unicode) letter and continue with letters,
//!   digits or `_`; a leading `_` is rejected.
//! - strings may span lines and only fail when the source ends first.
//! - the only punctuation is `,` and `=`.
//! - keywords are matched case-insensitively, against a table larger than
//!   the highlighted one.
//!
//! Unlike the interpreter, the check keeps going after an error and reports
//! every problem in one run.

use std::str::Chars;

use arkscript_common::{saturating_u32, Diagnostic, DiagnosticBag, Position, Span};

use crate::lexer::TokenKind;

/// Punctuation the interpreter accepts.
const ACCEPTED_PUNCTUATION: &[char] = &[',', '='];

/// Interpreter keywords that the highlighter leaves as variables.
const INTERPRETER_ONLY_KEYWORDS: &[&str] = &["contar", "repeticiones", "sensibilidad", "cada"];

/// Check `source` and collect diagnostics.
pub fn check(source: &str) -> DiagnosticBag {
    let mut cursor = SourceCursor::new(source);
    let mut diagnostics = DiagnosticBag::new();

    loop {
        cursor.eat_while(char::is_whitespace);
        let start = cursor.position();
        let from = cursor.offset;
        let Some(ch) = cursor.advance() else {
            break;
        };

        match ch {
            '/' if cursor.peek() == Some('/') => cursor.eat_while(|c| c != '\n'),
            '"' => {
                let quote = cursor.span_from(start);
                cursor.eat_while(|c| c != '"');
                if cursor.advance().is_none() {
                    diagnostics.report(
                        Diagnostic::error("unterminated string literal")
                            .with_span(quote)
                            .with_suggestion("add the closing '\"'"),
                    );
                }
            }
            c if c.is_alphabetic() => {
                cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
                check_word(cursor.slice_from(from), cursor.span_from(start), &mut diagnostics);
            }
            c if c.is_numeric() => cursor.eat_while(char::is_numeric),
            c if ACCEPTED_PUNCTUATION.contains(&c) => {}
            '_' => diagnostics.report(
                Diagnostic::error("unrecognized character '_'")
                    .with_span(cursor.span_from(start))
                    .with_suggestion("identifiers must start with a letter"),
            ),
            c => diagnostics.error(
                format!("unrecognized character '{}'", c),
                cursor.span_from(start),
            ),
        }
    }

    diagnostics
}

fn check_word(word: &str, span: Span, diagnostics: &mut DiagnosticBag) {
    let lower = word.to_lowercase();
    if lower != word && is_interpreter_keyword(&lower) {
        diagnostics.report(
            Diagnostic::warning(format!(
                "'{}' matches keyword '{}' only case-insensitively",
                word, lower
            ))
            .with_span(span)
            .with_suggestion(format!("write it as '{}'", lower)),
        );
    }
}

fn is_interpreter_keyword(word: &str) -> bool {
    TokenKind::keyword_from_str(word).is_some() || INTERPRETER_ONLY_KEYWORDS.contains(&word)
}

/// Character reader over a whole source, tracking line and column across
/// line breaks.
struct SourceCursor<'src> {
    source: &'src str,
    chars: Chars<'src>,
    /// Byte offset of the next character.
    offset: usize,
    line: usize,
    column: usize,
}

impl<'src> SourceCursor<'src> {
    fn new(source: &'src str) -> Self {
        SourceCursor {
            source,
            chars: source.chars(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position::new(
            saturating_u32(self.line),
            saturating_u32(self.column),
            saturating_u32(self.offset),
        )
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn slice_from(&self, from: usize) -> &'src str {
        &self.source[from..self.offset]
    }

    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.position())
    }
}
