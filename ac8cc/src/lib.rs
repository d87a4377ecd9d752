pub mod codegen;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod program;
pub mod symbols;
pub mod token;

use arch::op::Op;
use codegen::Codegen;
use error::Error;
use program::Program;
use symbols::SymbolTable;

/// Everything a compilation produces. Syntax errors are collected rather
/// than aborting, so a failed compilation still carries best-effort output;
/// callers must check `failed()` before using it.
#[derive(Debug)]
pub struct Output {
    pub name: Option<String>,
    pub program: Program,
    pub symbols: SymbolTable,
    pub result_addr: Option<u8>,
    pub errors: Vec<Error>,
}

impl Output {
    pub fn failed(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn asm_text(&self) -> String {
        output::asm_text(self.name.as_deref(), &self.symbols, &self.program)
    }
}

/// Compile one source module. `Err` is reserved for resource exhaustion
/// (code or symbol space full); grammar trouble lands in `Output::errors`.
pub fn compile(source: &str) -> Result<Output, Error> {
    let parser = parser::Parser::new(source);
    let (name, result_addr, gen, errors) = parser.parse()?;
    let Codegen {
        mut program,
        symbols,
    } = gen;
    program.emit(Op::HLT, None)?;
    Ok(Output {
        name,
        program,
        symbols,
        result_addr,
        errors,
    })
}
