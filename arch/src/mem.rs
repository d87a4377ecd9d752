/// Flat byte-addressable memory shared by code and data.
pub const MEMORY_SIZE: usize = 256;

/// Code is loaded and executed from the bottom of memory.
pub const CODE_START: u8 = 0x00;

/// First address handed to user variables and interned constants.
/// Code must stay below this line; the compiler refuses programs
/// whose encoded code would cross it.
pub const VAR_BASE: u8 = 0x80;

/// First address of the temporary pool. Temporaries grow upward from
/// here and are never reused.
pub const TEMP_BASE: u8 = 0xC8;
