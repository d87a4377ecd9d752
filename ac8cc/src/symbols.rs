use crate::error::Error;
use arch::mem::{MEMORY_SIZE, TEMP_BASE, VAR_BASE};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub addr: u8,
    pub value: u8,
    pub initialized: bool,
}

/// Names to fixed memory cells. Addresses are handed out monotonically from
/// VAR_BASE the first time a name is seen and never reassigned; the separate
/// temporary counter starts at TEMP_BASE and never reuses a cell. Insertion
/// order is preserved so two runs over the same source emit identical tables.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    syms: IndexMap<String, Symbol>,
    next_var: usize,
    next_temp: usize,
}

impl SymbolTable {
    /// A fresh table, pre-seeded with the synthesized constants the
    /// arithmetic expansions rely on.
    pub fn new() -> Self {
        let mut table = SymbolTable {
            syms: IndexMap::new(),
            next_var: VAR_BASE as usize,
            next_temp: TEMP_BASE as usize,
        };
        // Seeding cannot exhaust the fresh address space.
        let _ = table.define("_zero", 0, true);
        let _ = table.define("_one", 1, true);
        let _ = table.define("_neg_one", 255, true); // -1 in 8 bits
        table
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.syms.get(name)
    }

    /// Find-or-create. An existing name keeps its original address; a later
    /// initializing definition only updates value and flag. Refuses the
    /// allocation when the variable region would run into the temporaries.
    pub fn define(&mut self, name: &str, value: u8, initialized: bool) -> Result<u8, Error> {
        if let Some(sym) = self.syms.get_mut(name) {
            if !sym.initialized && initialized {
                sym.value = value;
                sym.initialized = true;
            }
            return Ok(sym.addr);
        }
        if self.next_var >= TEMP_BASE as usize {
            return Err(Error::VariableSpaceExhausted(name.to_string()));
        }
        let addr = self.next_var as u8;
        self.next_var += 1;
        self.syms.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                addr,
                value,
                initialized,
            },
        );
        Ok(addr)
    }

    /// Intern a numeric literal. Repeated literals share one cell.
    pub fn intern_const(&mut self, value: u8) -> Result<u8, Error> {
        self.define(&format!("_const_{value}"), value, true)
    }

    /// One fresh cell from the temporary pool; never freed.
    pub fn alloc_temp(&mut self) -> Result<u8, Error> {
        if self.next_temp >= MEMORY_SIZE {
            return Err(Error::TemporarySpaceExhausted);
        }
        let addr = self.next_temp as u8;
        self.next_temp += 1;
        Ok(addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.syms.values()
    }

    pub fn len(&self) -> usize {
        self.syms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syms.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
