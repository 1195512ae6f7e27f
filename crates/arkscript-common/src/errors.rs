use std::fmt;

use crate::span::Span;

/// How a finding affects `arkscript run`: errors block sending the script,
/// warnings are only printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A problem found in arkscript source before it reaches the server.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
    /// Replacement text or a hint shown as `help:`.
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            span: None,
            suggestion: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_span(self, span: Span) -> Self {
        Diagnostic {
            span: Some(span),
            ..self
        }
    }

    pub fn with_suggestion(self, suggestion: impl Into<String>) -> Self {
        Diagnostic {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// `line:col: severity: message`, or `severity: message` without a span.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = self.span {
            write!(f, "{}: ", span)?;
        }
        write!(f, "{}: {}", self.severity.label(), self.message)
    }
}

/// Findings of one lint pass, in source order.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Shorthand for reporting a spanned error with no suggestion.
    pub fn error(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::error(message).with_span(span));
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn only_errors_count() {
        let mut bag = DiagnosticBag::new();
        bag.report(Diagnostic::warning("'Var' matches keyword 'var' only case-insensitively"));
        assert!(!bag.has_errors());
        bag.error("unterminated string literal", Span::default());
        bag.error("unrecognized character ';'", Span::default());
        assert!(bag.has_errors());
        assert_eq!(bag.error_count(), 2);
        assert_eq!(bag.diagnostics().len(), 3);
    }

    #[test]
    fn display_leads_with_location() {
        let span = Span::new(Position::new(2, 5, 9), Position::new(2, 6, 10));
        let diag = Diagnostic::error("unrecognized character '@'").with_span(span);
        assert_eq!(diag.to_string(), "2:5: error: unrecognized character '@'");
        assert_eq!(
            Diagnostic::warning("no span").to_string(),
            "warning: no span"
        );
    }

    #[test]
    fn builders_keep_other_fields() {
        let diag = Diagnostic::warning("case")
            .with_suggestion("write it as 'var'")
            .with_span(Span::default());
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.suggestion.as_deref(), Some("write it as 'var'"));
        assert!(diag.span.is_some());
    }
}
