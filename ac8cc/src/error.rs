use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Syntax errors: recorded, then the parser resynchronizes and continues.
    #[error("Expected {0}, found `{1}` at offset {2}")]
    Unexpected(&'static str, String, usize),

    #[error("Expected {0}, found end of input")]
    UnexpectedEnd(&'static str),

    // Resource exhaustion: the operation is refused and compilation aborts.
    #[error("Code section full: {0} bytes would cross the data region at 0x{1:02X}")]
    CodeSectionFull(usize, u8),

    #[error("Variable space exhausted: cannot allocate `{0}`")]
    VariableSpaceExhausted(String),

    #[error("Temporary space exhausted")]
    TemporarySpaceExhausted,
}

impl Error {
    /// Fatal errors abort compilation; the rest are collected while the
    /// parser resynchronizes.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Unexpected(..) | Error::UnexpectedEnd(_))
    }
}
