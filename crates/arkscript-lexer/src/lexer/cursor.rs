use arkscript_common::{saturating_u32, Position, Span};

/// Forward-only reader over a single line of source text.
///
/// Tracks the start of the lexeme being scanned (the token boundary) and
/// the position of the next character. All matching primitives either
/// consume what they matched or leave the cursor where it was.
#[derive(Debug, Clone)]
pub struct LineCursor<'src> {
    line: &'src str,
    /// 1-based line number within the enclosing source.
    line_number: u32,
    /// Byte offset of the line within the enclosing source.
    base_offset: u32,
    /// Byte offset (within `line`) of the current token boundary.
    start: usize,
    /// Byte offset (within `line`) of the *next* character to be consumed.
    pos: usize,
}

impl<'src> LineCursor<'src> {
    /// A cursor over a standalone line (line 1, offset 0).
    pub fn new(line: &'src str) -> Self {
        Self::at(line, 1, 0)
    }

    /// A cursor over a line located at `line_number`/`base_offset` in a larger source.
    pub fn at(line: &'src str, line_number: u32, base_offset: u32) -> Self {
        Self {
            line,
            line_number,
            base_offset,
            start: 0,
            pos: 0,
        }
    }

    /// Byte offset of the next character within the line.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// True once every character of the line has been consumed.
    pub fn is_eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// Unconsumed remainder of the line.
    pub fn rest(&self) -> &'src str {
        &self.line[self.pos..]
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume the next character if it matches `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `literal` if the remainder of the line starts with it.
    pub fn eat_str(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume characters while `predicate` returns true.
    /// Returns true if at least one character was consumed.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        let from = self.pos;
        while let Some(ch) = self.peek() {
            if predicate(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        self.pos > from
    }

    /// Match the pattern `first rest*` at the cursor.
    ///
    /// On success the matched text is consumed and returned; otherwise the
    /// cursor does not move.
    pub fn eat_match(
        &mut self,
        first: impl Fn(char) -> bool,
        rest: impl Fn(char) -> bool,
    ) -> Option<&'src str> {
        let from = self.pos;
        match self.peek() {
            Some(ch) if first(ch) => {
                self.advance();
            }
            _ => return None,
        }
        self.eat_while(rest);
        Some(&self.line[from..self.pos])
    }

    /// Advance up to (not past) the next occurrence of `target`.
    ///
    /// Returns false and leaves the cursor unmoved if `target` does not occur
    /// in the rest of the line.
    pub fn skip_to(&mut self, target: char) -> bool {
        match self.rest().find(target) {
            Some(idx) => {
                self.pos += idx;
                true
            }
            None => false,
        }
    }

    /// Consume everything left on the line.
    pub fn skip_to_end(&mut self) {
        self.pos = self.line.len();
    }

    /// Mark the current position as the start of the next lexeme.
    pub fn begin_token(&mut self) {
        self.start = self.pos;
    }

    /// Text consumed since the last token boundary.
    pub fn current(&self) -> &'src str {
        &self.line[self.start..self.pos]
    }

    /// Span of the text consumed since the last token boundary.
    pub fn span(&self) -> Span {
        Span::new(self.position_of(self.start), self.position_of(self.pos))
    }

    fn position_of(&self, byte: usize) -> Position {
        let column = saturating_u32(self.line[..byte].chars().count()).saturating_add(1);
        let offset = self.base_offset.saturating_add(saturating_u32(byte));
        Position::new(self.line_number, column, offset)
    }
}
