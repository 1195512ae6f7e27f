//! Rendering of highlighted arkscript source.
//!
//! Both renderers reproduce the source text exactly; only token lexemes are
//! decorated. Whitespace and line breaks between tokens are copied through.

use std::fmt::Write;

use ariadne::{Color, Fmt};
use arkscript_common::config::HighlightSection;

use crate::lexer::{tokenize_source, TokenKind};

/// Terminal colour per token kind, as 256-colour palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub keyword: Option<u8>,
    pub builtin: Option<u8>,
    pub comment: Option<u8>,
    pub string: Option<u8>,
    pub number: Option<u8>,
    pub variable: Option<u8>,
}

impl Default for Theme {
    /// Dracula-like palette.
    fn default() -> Self {
        Self {
            keyword: Some(212),
            builtin: Some(117),
            comment: Some(61),
            string: Some(228),
            number: Some(141),
            variable: None,
        }
    }
}

impl Theme {
    /// A theme that leaves every token unstyled.
    pub fn plain() -> Self {
        Self {
            keyword: None,
            builtin: None,
            comment: None,
            string: None,
            number: None,
            variable: None,
        }
    }

    /// Apply the overrides from an `[highlight]` config section.
    pub fn with_overrides(mut self, overrides: &HighlightSection) -> Self {
        self.keyword = overrides.keyword.or(self.keyword);
        self.builtin = overrides.builtin.or(self.builtin);
        self.comment = overrides.comment.or(self.comment);
        self.string = overrides.string.or(self.string);
        self.number = overrides.number.or(self.number);
        self.variable = overrides.variable.or(self.variable);
        self
    }

    pub fn color(&self, kind: TokenKind) -> Option<Color> {
        let index = match kind {
            TokenKind::Keyword => self.keyword,
            TokenKind::Builtin => self.builtin,
            TokenKind::Comment => self.comment,
            TokenKind::String => self.string,
            TokenKind::Number => self.number,
            TokenKind::Variable => self.variable,
            TokenKind::Plain => None,
        };
        index.map(Color::Fixed)
    }
}

/// Render `source` with ANSI colours for a terminal.
pub fn render_ansi(source: &str, theme: &Theme) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let mut last = 0;
    for token in tokenize_source(source) {
        let range = token.span.range();
        out.push_str(&source[last..range.start]);
        match theme.color(token.kind) {
            Some(color) => {
                let _ = write!(out, "{}", token.lexeme.as_str().fg(color));
            }
            None => out.push_str(&token.lexeme),
        }
        last = range.end;
    }
    out.push_str(&source[last..]);
    out
}

/// Render `source` as HTML using CodeMirror-style `cm-<kind>` classes.
///
/// `Plain` tokens carry no class and are emitted as bare text.
pub fn render_html(source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let mut last = 0;
    for token in tokenize_source(source) {
        let range = token.span.range();
        escape_html_into(&mut out, &source[last..range.start]);
        if token.kind == TokenKind::Plain {
            escape_html_into(&mut out, &token.lexeme);
        } else {
            let _ = write!(out, "<span class=\"cm-{}\">", token.kind.as_str());
            escape_html_into(&mut out, &token.lexeme);
            out.push_str("</span>");
        }
        last = range.end;
    }
    escape_html_into(&mut out, &source[last..]);
    out
}

fn escape_html_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
