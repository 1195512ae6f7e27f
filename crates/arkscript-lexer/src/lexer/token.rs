use arkscript_common::Span;
use serde::Serialize;
use std::fmt;

/// Words highlighted as `keyword`.
pub const KEYWORDS: &[&str] = &[
    "var",
    "buscar",
    "fusionar",
    "reemplazar",
    "sobreescribir",
    "enumerar",
    "extraer",
    "invertir",
    "fragmentar",
];

/// Words highlighted as `builtin`.
pub const BUILTINS: &[&str] = &[
    "separado_por",
    "todo",
    "con",
    "sin",
    "desde",
    "hasta",
    "de",
    "en",
    "por",
];

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}

/// Highlighting class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    Builtin,
    Comment,
    String,
    Number,
    /// Any identifier not in the keyword table.
    Variable,
    /// No classification: punctuation or an unrecognized character.
    #[serde(rename = "none")]
    Plain,
}

impl TokenKind {
    /// Look up a word in `KEYWORDS` then `BUILTINS`. Case-sensitive.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        if KEYWORDS.contains(&s) {
            Some(TokenKind::Keyword)
        } else if BUILTINS.contains(&s) {
            Some(TokenKind::Builtin)
        } else {
            None
        }
    }

    /// Style name understood by highlighting hosts.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Builtin => "builtin",
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Variable => "variable",
            TokenKind::Plain => "none",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_both_tables() {
        for word in KEYWORDS {
            assert_eq!(TokenKind::keyword_from_str(word), Some(TokenKind::Keyword));
        }
        for word in BUILTINS {
            assert_eq!(TokenKind::keyword_from_str(word), Some(TokenKind::Builtin));
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword_from_str("Var"), None);
        assert_eq!(TokenKind::keyword_from_str("TODO"), None);
        assert_eq!(TokenKind::keyword_from_str("contar"), None);
        assert_eq!(TokenKind::keyword_from_str(""), None);
    }

    #[test]
    fn plain_serializes_as_none() {
        assert_eq!(serde_json::to_string(&TokenKind::Plain).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&TokenKind::Keyword).unwrap(), "\"keyword\"");
    }
}
