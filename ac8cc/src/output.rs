use crate::program::Program;
use crate::symbols::SymbolTable;
use std::fmt::Write;

/// Render the two-section textual assembly: a `.DATA` section of
/// `address value` pairs in symbol-table insertion order, then a `.CODE`
/// section of mnemonic lines. Both sides of the encoder contract are
/// hexadecimal.
pub fn asm_text(name: Option<&str>, symbols: &SymbolTable, program: &Program) -> String {
    let mut out = String::new();
    if let Some(name) = name {
        let _ = writeln!(out, "; PROGRAM {name}");
    }
    out.push_str(".DATA\n");
    for sym in symbols.iter() {
        let _ = writeln!(out, "0x{:02X} 0x{:02X}", sym.addr, sym.value);
    }
    out.push_str(".CODE\n");
    for inst in program.insts() {
        let _ = writeln!(out, "{inst}");
    }
    out
}
