pub mod highlight;
pub mod lexer;
pub mod lint;
