use crate::error::Error;
use crate::program::Program;
use crate::symbols::SymbolTable;
use arch::op::Op;

/// Primitive emitters plus the routines that synthesize negate, subtract,
/// multiply and divide out of LDA/STA/ADD/NOT and the conditional jumps.
/// The grammar rules drive this directly; there is no AST in between.
#[derive(Debug)]
pub struct Codegen {
    pub program: Program,
    pub symbols: SymbolTable,
}

impl Codegen {
    pub fn new() -> Self {
        Codegen {
            program: Program::new(),
            symbols: SymbolTable::new(),
        }
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    pub fn load(&mut self, addr: u8) -> Result<(), Error> {
        self.program.emit(Op::LDA, Some(addr))?;
        Ok(())
    }

    pub fn store(&mut self, addr: u8) -> Result<(), Error> {
        self.program.emit(Op::STA, Some(addr))?;
        Ok(())
    }

    pub fn add(&mut self, addr: u8) -> Result<(), Error> {
        self.program.emit(Op::ADD, Some(addr))?;
        Ok(())
    }

    pub fn not(&mut self) -> Result<(), Error> {
        self.program.emit(Op::NOT, None)?;
        Ok(())
    }

    fn zero(&mut self) -> Result<u8, Error> {
        self.symbols.define("_zero", 0, true)
    }

    fn one(&mut self) -> Result<u8, Error> {
        self.symbols.define("_one", 1, true)
    }

    fn neg_one(&mut self) -> Result<u8, Error> {
        self.symbols.define("_neg_one", 255, true)
    }

    // ------------------------------------------------------------------
    // Synthesis
    // ------------------------------------------------------------------

    /// Two's-complement negation of `addr` into `into`: NOT, then add 1.
    pub fn emit_neg(&mut self, addr: u8, into: u8) -> Result<(), Error> {
        let one = self.one()?;
        self.load(addr)?;
        self.not()?;
        self.add(one)?;
        self.store(into)
    }

    pub fn emit_add(&mut self, left: u8, right: u8, into: u8) -> Result<(), Error> {
        self.load(left)?;
        self.add(right)?;
        self.store(into)
    }

    /// `left - right` by negating the right operand in place, then adding.
    /// Both operands are temporaries, so clobbering `right` is safe.
    pub fn emit_sub(&mut self, left: u8, right: u8, into: u8) -> Result<(), Error> {
        self.emit_neg(right, right)?;
        self.emit_add(left, right, into)
    }

    /// Repeated addition: `into = 0`, `counter = left`, then add `right`
    /// and decrement the counter (by adding 255) until it hits zero. The
    /// JZ out of the loop is emitted with a placeholder and patched to the
    /// byte address just past the loop once the body is known.
    pub fn emit_mul(&mut self, left: u8, right: u8, into: u8) -> Result<(), Error> {
        let counter = self.symbols.alloc_temp()?;
        let zero = self.zero()?;
        let neg_one = self.neg_one()?;

        self.load(zero)?;
        self.store(into)?;
        self.load(left)?;
        self.store(counter)?;

        let loop_start = self.program.here();
        self.load(counter)?;
        let exit = self.program.emit(Op::JZ, None)?;
        self.load(into)?;
        self.add(right)?;
        self.store(into)?;
        self.load(counter)?;
        self.add(neg_one)?;
        self.store(counter)?;
        self.program.emit(Op::JMP, Some(loop_start))?;

        let after_loop = self.program.here();
        self.program.patch(exit, after_loop);
        Ok(())
    }

    /// Unsigned floor division by repeated subtraction. Each round computes
    /// `remainder - divisor` as `-(-remainder + divisor)`; a negative
    /// difference exits the loop (patched JN), otherwise it becomes the new
    /// remainder and the quotient is bumped by one. Division by zero is not
    /// checked: the loop spins inside the executor's step budget and the
    /// wraparound result is accepted as meaningless.
    pub fn emit_div(&mut self, dividend: u8, divisor: u8, into: u8) -> Result<(), Error> {
        let remainder = self.symbols.alloc_temp()?;
        let zero = self.zero()?;
        let one = self.one()?;

        self.load(zero)?;
        self.store(into)?;
        self.load(dividend)?;
        self.store(remainder)?;

        let loop_start = self.program.here();
        self.load(remainder)?;
        self.not()?;
        self.add(one)?; // -remainder
        self.add(divisor)?; // divisor - remainder
        self.not()?;
        self.add(one)?; // remainder - divisor
        let exit = self.program.emit(Op::JN, None)?;
        self.store(remainder)?;
        self.load(into)?;
        self.add(one)?;
        self.store(into)?;
        self.program.emit(Op::JMP, Some(loop_start))?;

        let after_loop = self.program.here();
        self.program.patch(exit, after_loop);
        Ok(())
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Codegen::new()
    }
}
