use crate::error::Error;
use arch::inst::Inst;
use arch::mem::VAR_BASE;
use arch::op::Op;

/// Stable handle to an emitted instruction, used to back-patch forward
/// jumps once their target is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot(usize);

/// The growing instruction list plus its running byte size. Instructions
/// are appended and patched in place, never removed or reordered.
///
/// Jump operands are byte addresses, and instructions are 1 or 2 bytes
/// wide, so the index-to-address mapping must sum actual encoded sizes; a
/// fixed multiplier is only right when every instruction is uniformly
/// sized, which NOT and HLT break.
#[derive(Debug, Clone, Default)]
pub struct Program {
    insts: Vec<Inst>,
    code_size: usize,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Append an instruction and return its handle. Forward jumps pass
    /// `None` as a placeholder; the slot width is fixed by the opcode, so
    /// patching never shifts later addresses. Refuses the append when the
    /// encoded code would cross into the data region.
    pub fn emit(&mut self, op: Op, operand: Option<u8>) -> Result<Slot, Error> {
        let size = self.code_size + op.size();
        if size > VAR_BASE as usize {
            return Err(Error::CodeSectionFull(size, VAR_BASE));
        }
        let slot = Slot(self.insts.len());
        self.insts.push(Inst::new(op, operand));
        self.code_size = size;
        Ok(slot)
    }

    /// Overwrite the operand of exactly the instruction recorded at
    /// emission time.
    pub fn patch(&mut self, slot: Slot, operand: u8) {
        self.insts[slot.0].operand = Some(operand);
    }

    /// Byte address of the next instruction to be emitted. Always fits in
    /// u8 because `emit` caps the code size at VAR_BASE.
    pub fn here(&self) -> u8 {
        self.code_size as u8
    }

    /// Byte address of the instruction at `index`, by walking encoded sizes.
    pub fn byte_offset(&self, index: usize) -> usize {
        self.insts[..index].iter().map(Inst::size).sum()
    }

    pub fn code_size(&self) -> usize {
        self.code_size
    }

    pub fn insts(&self) -> &[Inst] {
        &self.insts
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut image = Vec::with_capacity(self.code_size);
        for inst in &self.insts {
            inst.encode_into(&mut image);
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offsets_follow_encoded_sizes() {
        let mut program = Program::new();
        program.emit(Op::LDA, Some(0x80)).unwrap();
        program.emit(Op::NOT, None).unwrap();
        program.emit(Op::ADD, Some(0x81)).unwrap();
        program.emit(Op::HLT, None).unwrap();
        assert_eq!(program.byte_offset(0), 0);
        assert_eq!(program.byte_offset(1), 2);
        assert_eq!(program.byte_offset(2), 3);
        assert_eq!(program.byte_offset(3), 5);
        assert_eq!(program.here(), 6);
    }

    #[test]
    fn patch_resolves_the_emitted_slot() {
        let mut program = Program::new();
        let jz = program.emit(Op::JZ, None).unwrap();
        program.emit(Op::ADD, Some(0x80)).unwrap();
        let target = program.here();
        program.patch(jz, target);
        assert_eq!(program.insts()[0].operand, Some(4));
        // Placeholder width equals final width.
        assert_eq!(program.code_size(), 4);
    }

    #[test]
    fn code_region_is_capped() {
        let mut program = Program::new();
        loop {
            match program.emit(Op::ADD, Some(0)) {
                Ok(_) => assert!(program.code_size() <= VAR_BASE as usize),
                Err(Error::CodeSectionFull(..)) => break,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        // The refused emit leaves the list intact.
        assert_eq!(program.code_size(), VAR_BASE as usize);
        assert_eq!(program.insts().len(), VAR_BASE as usize / 2);
    }
}
