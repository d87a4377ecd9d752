use crate::op::Op;
use std::fmt;

/// One emitted instruction. `operand` is None for no-operand opcodes and
/// for forward jumps whose target is not yet patched; the encoded size
/// depends only on the opcode, so a placeholder occupies its final width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inst {
    pub op: Op,
    pub operand: Option<u8>,
}

impl Inst {
    pub fn new(op: Op, operand: Option<u8>) -> Self {
        Inst { op, operand }
    }

    pub fn size(&self) -> usize {
        self.op.size()
    }

    /// Append the encoded bytes: opcode, then the raw address byte for
    /// operand-bearing opcodes. An unpatched operand encodes as 0x00.
    pub fn encode_into(&self, image: &mut Vec<u8>) {
        image.push(self.op.into());
        if self.op.has_operand() {
            image.push(self.operand.unwrap_or(0));
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.op.has_operand(), self.operand) {
            (true, Some(addr)) => write!(f, "{} 0x{:02X}", self.op, addr),
            _ => write!(f, "{}", self.op),
        }
    }
}
