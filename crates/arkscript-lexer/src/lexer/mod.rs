pub mod cursor;
pub mod token;

mod scanner;

pub use cursor::LineCursor;
pub use scanner::{
    is_ident_continue, is_ident_start, lines_with_offsets, tokenize_line, tokenize_source,
    Arkscript, LineState, LineTokens, StreamTokenizer,
};
pub use token::{Token, TokenKind, BUILTINS, KEYWORDS};
