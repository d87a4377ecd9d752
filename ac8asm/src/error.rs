use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("line {line}: unknown mnemonic `{text}`")]
    UnknownMnemonic { text: String, line: usize },

    #[error("line {line}: `{mnemonic}` requires an address operand")]
    MissingOperand { mnemonic: String, line: usize },

    #[error("line {line}: `{mnemonic}` takes no operand")]
    UnexpectedOperand { mnemonic: String, line: usize },

    #[error("line {line}: cannot parse `{text}` as a number")]
    InvalidNumber { text: String, line: usize },

    #[error("line {line}: invalid data line `{text}` (expected `addr value`)")]
    InvalidData { text: String, line: usize },

    #[error("line {line}: value 0x{value:X} does not fit in a byte")]
    ValueOutOfRange { value: u32, line: usize },

    #[error("line {line}: code does not fit in memory")]
    ImageOverflow { line: usize },

    #[error("line {line}: statement outside of a `.CODE` or `.DATA` section")]
    OutsideSection { line: usize },
}
