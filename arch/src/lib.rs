pub mod inst;
pub mod mem;
pub mod op;
