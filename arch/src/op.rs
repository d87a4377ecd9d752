use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumString};

/// AC8 opcodes. The high nibble of an opcode byte selects the operation;
/// the low nibble is reserved and always zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Display, EnumString,
)]
#[repr(u8)]
pub enum Op {
    NOP = 0x00,
    STA = 0x10,
    LDA = 0x20,
    ADD = 0x30,
    OR = 0x40,
    AND = 0x50,
    NOT = 0x60,
    JMP = 0x80,
    JN = 0x90,
    JZ = 0xA0,
    HLT = 0xF0,
}

impl Op {
    /// Decode an opcode from a memory byte. Returns None for a high nibble
    /// that names no operation; the executor treats that as a recoverable
    /// anomaly, not a fatal error.
    pub fn decode(byte: u8) -> Option<Op> {
        Op::try_from(byte & 0xF0).ok()
    }

    /// Whether the opcode byte is followed by an absolute address byte.
    pub fn has_operand(&self) -> bool {
        !matches!(self, Op::NOP | Op::NOT | Op::HLT)
    }

    /// Encoded size in bytes: 1 for no-operand ops, 2 otherwise.
    pub fn size(&self) -> usize {
        if self.has_operand() {
            2
        } else {
            1
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_uppercase().parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }
}
