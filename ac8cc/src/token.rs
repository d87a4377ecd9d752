#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset into the source text.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Single character tokens
    Plus,   // '+'
    Minus,  // '-'
    Star,   // '*'
    Slash,  // '/'
    LParen, // '('
    RParen, // ')'
    Equal,  // '='
    Colon,  // ':'
    Quote,  // '"'

    // Keywords (case-sensitive)
    KwProgram, // "PROGRAM"
    KwBegin,   // "BEGIN"
    KwEnd,     // "END"
    KwRes,     // "RES"

    // Literals and identifiers
    Number,
    Ident,

    // Special
    End,     // end of input, yielded idempotently
    Unknown, // unrecognized character, skipped by the parser cursor
}
