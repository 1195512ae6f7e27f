use arkscript_common::saturating_u32;

use super::cursor::LineCursor;
use super::token::{Token, TokenKind};

/// State threaded through successive `token` calls on one line.
///
/// Every line starts from `LineState::default()`. No current rule lets a
/// lexeme cross a line break, so `in_string` is never set; the slot exists
/// so that a multi-line string rule can be added without changing the
/// host-facing interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineState {
    pub in_string: bool,
}

/// A line-oriented tokenizer that a highlighting host drives one lexeme at a time.
pub trait StreamTokenizer {
    type State: Clone + Default + std::fmt::Debug;

    /// Initial state for a fresh line.
    fn start_state(&self) -> Self::State {
        Self::State::default()
    }

    /// Consume exactly one lexeme and classify it.
    ///
    /// Returns `None` when only whitespace remained before the end of the
    /// line. Otherwise the cursor has advanced by at least one character and
    /// `cursor.current()` is the lexeme.
    fn token(&self, cursor: &mut LineCursor<'_>, state: &mut Self::State) -> Option<TokenKind>;
}

/// The arkscript highlighting mode.
///
/// Rules are tried in order; the first that matches wins:
/// `//` comment, `"` string, digits, identifier/keyword, any single char.
/// Malformed input never fails, it degrades to a string or `Plain`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arkscript;

impl StreamTokenizer for Arkscript {
    type State = LineState;

    fn token(&self, cursor: &mut LineCursor<'_>, _state: &mut LineState) -> Option<TokenKind> {
        cursor.eat_while(char::is_whitespace);
        cursor.begin_token();
        if cursor.is_eol() {
            return None;
        }

        if cursor.eat_str("//") {
            cursor.skip_to_end();
            return Some(TokenKind::Comment);
        }

        if cursor.eat('"') {
            if cursor.skip_to('"') {
                cursor.advance();
            } else {
                cursor.skip_to_end();
            }
            return Some(TokenKind::String);
        }

        if cursor
            .eat_match(|c| c.is_ascii_digit(), |c| c.is_ascii_digit())
            .is_some()
        {
            return Some(TokenKind::Number);
        }

        if let Some(word) = cursor.eat_match(is_ident_start, is_ident_continue) {
            return Some(TokenKind::keyword_from_str(word).unwrap_or(TokenKind::Variable));
        }

        cursor.advance();
        Some(TokenKind::Plain)
    }
}

pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lazy sequence of the tokens on one line.
///
/// Cloning yields an independent iterator that resumes from the same point,
/// so a host can restart a scan without re-creating it.
#[derive(Debug, Clone)]
pub struct LineTokens<'src, M: StreamTokenizer = Arkscript> {
    mode: M,
    cursor: LineCursor<'src>,
    state: M::State,
}

impl<'src, M: StreamTokenizer> LineTokens<'src, M> {
    pub fn new(mode: M, cursor: LineCursor<'src>) -> Self {
        let state = mode.start_state();
        Self {
            mode,
            cursor,
            state,
        }
    }

    /// The state the next token will be scanned with.
    pub fn state(&self) -> &M::State {
        &self.state
    }
}

impl<M: StreamTokenizer> Iterator for LineTokens<'_, M> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let kind = self.mode.token(&mut self.cursor, &mut self.state)?;
        Some(Token::new(kind, self.cursor.current(), self.cursor.span()))
    }
}

impl<M: StreamTokenizer> std::iter::FusedIterator for LineTokens<'_, M> {}

/// Tokenize a single line with the arkscript mode.
pub fn tokenize_line(line: &str) -> LineTokens<'_> {
    LineTokens::new(Arkscript, LineCursor::new(line))
}

/// Tokenize a whole source text, line by line.
///
/// Each line is scanned with a fresh state. Spans carry line numbers and
/// byte offsets relative to the whole source. Line terminators (`\n` or
/// `\r\n`) never appear inside a token.
pub fn tokenize_source(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (line_number, offset, line) in lines_with_offsets(source) {
        let cursor = LineCursor::at(line, line_number, offset);
        tokens.extend(LineTokens::new(Arkscript, cursor));
    }
    tokens
}

/// Split `source` into `(line_number, byte_offset, line)` triples without terminators.
///
/// Line numbers and offsets saturate at `u32::MAX`.
pub fn lines_with_offsets(source: &str) -> impl Iterator<Item = (u32, u32, &str)> {
    let mut offset = 0usize;
    source.split('\n').enumerate().map(move |(idx, raw)| {
        let start = saturating_u32(offset);
        offset += raw.len() + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        (saturating_u32(idx + 1), start, line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(line: &str) -> Vec<(TokenKind, String)> {
        tokenize_line(line).map(|t| (t.kind, t.lexeme)).collect()
    }

    fn one(line: &str) -> (TokenKind, String) {
        let tokens = kinds(line);
        assert_eq!(tokens.len(), 1, "expected one token for {:?}: {:?}", line, tokens);
        tokens.into_iter().next().unwrap()
    }

    #[test]
    fn whitespace_only_line_yields_no_token() {
        for line in ["", " ", "\t  \t", "\u{a0}\u{2003}"] {
            let mut cursor = LineCursor::new(line);
            let mut state = Arkscript.start_state();
            assert_eq!(Arkscript.token(&mut cursor, &mut state), None);
            assert!(cursor.is_eol());
        }
    }

    #[test]
    fn every_keyword_and_builtin() {
        for word in crate::lexer::KEYWORDS {
            assert_eq!(one(word), (TokenKind::Keyword, word.to_string()));
        }
        for word in crate::lexer::BUILTINS {
            assert_eq!(one(word), (TokenKind::Builtin, word.to_string()));
        }
    }

    #[test]
    fn comment_spans_whole_line() {
        assert_eq!(
            one("// this is ignored"),
            (TokenKind::Comment, "// this is ignored".to_string())
        );
    }

    #[test]
    fn comment_after_code() {
        assert_eq!(
            kinds("var x // nota \"no string\""),
            vec![
                (TokenKind::Keyword, "var".to_string()),
                (TokenKind::Variable, "x".to_string()),
                (TokenKind::Comment, "// nota \"no string\"".to_string()),
            ]
        );
    }

    #[test]
    fn single_slash_is_plain() {
        assert_eq!(
            kinds("/ 2"),
            vec![
                (TokenKind::Plain, "/".to_string()),
                (TokenKind::Number, "2".to_string()),
            ]
        );
    }

    #[test]
    fn string_includes_both_quotes() {
        assert_eq!(one("\"hola\""), (TokenKind::String, "\"hola\"".to_string()));
    }

    #[test]
    fn unterminated_string_runs_to_end_of_line() {
        assert_eq!(
            one("\"sin cierre"),
            (TokenKind::String, "\"sin cierre".to_string())
        );
        assert_eq!(one("\""), (TokenKind::String, "\"".to_string()));
    }

    #[test]
    fn string_hides_comment_marker() {
        assert_eq!(
            kinds("\"a // b\" c"),
            vec![
                (TokenKind::String, "\"a // b\"".to_string()),
                (TokenKind::Variable, "c".to_string()),
            ]
        );
    }

    #[test]
    fn number_then_word() {
        assert_eq!(one("42"), (TokenKind::Number, "42".to_string()));
        assert_eq!(
            kinds("42abc"),
            vec![
                (TokenKind::Number, "42".to_string()),
                (TokenKind::Variable, "abc".to_string()),
            ]
        );
    }

    #[test]
    fn numbers_have_no_sign_or_fraction() {
        assert_eq!(
            kinds("-3.5"),
            vec![
                (TokenKind::Plain, "-".to_string()),
                (TokenKind::Number, "3".to_string()),
                (TokenKind::Plain, ".".to_string()),
                (TokenKind::Number, "5".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_word_is_variable() {
        assert_eq!(one("miVariable"), (TokenKind::Variable, "miVariable".to_string()));
        assert_eq!(one("_tmp1"), (TokenKind::Variable, "_tmp1".to_string()));
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(one("Var"), (TokenKind::Variable, "Var".to_string()));
        assert_eq!(one("variable"), (TokenKind::Variable, "variable".to_string()));
    }

    #[test]
    fn unrecognized_symbol_is_one_plain_char() {
        let mut cursor = LineCursor::new("@");
        let mut state = LineState::default();
        assert_eq!(Arkscript.token(&mut cursor, &mut state), Some(TokenKind::Plain));
        assert_eq!(cursor.current(), "@");
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn non_ascii_letter_is_plain() {
        assert_eq!(
            kinds("año"),
            vec![
                (TokenKind::Variable, "a".to_string()),
                (TokenKind::Plain, "ñ".to_string()),
                (TokenKind::Variable, "o".to_string()),
            ]
        );
    }

    #[test]
    fn statement_line() {
        assert_eq!(
            kinds("var total = buscar \"hola\" en datos.txt"),
            vec![
                (TokenKind::Keyword, "var".to_string()),
                (TokenKind::Variable, "total".to_string()),
                (TokenKind::Plain, "=".to_string()),
                (TokenKind::Keyword, "buscar".to_string()),
                (TokenKind::String, "\"hola\"".to_string()),
                (TokenKind::Builtin, "en".to_string()),
                (TokenKind::Variable, "datos".to_string()),
                (TokenKind::Plain, ".".to_string()),
                (TokenKind::Variable, "txt".to_string()),
            ]
        );
    }

    #[test]
    fn leading_whitespace_not_part_of_lexeme() {
        let token = tokenize_line("   sin").next().unwrap();
        assert_eq!(token.kind, TokenKind::Builtin);
        assert_eq!(token.lexeme, "sin");
        assert_eq!(token.span.start.column, 4);
        assert_eq!(token.span.end.column, 7);
    }

    #[test]
    fn state_is_never_touched() {
        let mut tokens = tokenize_line("\"abierta");
        assert_eq!(tokens.next().map(|t| t.kind), Some(TokenKind::String));
        assert_eq!(tokens.state(), &LineState { in_string: false });
    }

    #[test]
    fn restarted_iterator_yields_same_tokens() {
        let mut tokens = tokenize_line("var a = 1 // x");
        tokens.next();
        let resumed = tokens.clone();
        let first: Vec<Token> = tokens.collect();
        let second: Vec<Token> = resumed.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn source_spans_are_absolute() {
        let tokens = tokenize_source("var a\r\n  42\n");
        let summary: Vec<(u32, u32, u32, &str)> = tokens
            .iter()
            .map(|t| {
                (
                    t.span.start.line,
                    t.span.start.column,
                    t.span.start.offset,
                    t.lexeme.as_str(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![(1, 1, 0, "var"), (1, 5, 4, "a"), (2, 3, 9, "42")]
        );
    }

    #[test]
    fn lines_do_not_share_string_state() {
        let tokens = tokenize_source("\"abierta\nvar");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[1].kind, TokenKind::Keyword);
    }
}
