/*!
  An assembler and interpreter for UVM, a machine with one accumulator register and 1024
  cells of memory.

  The assembler turns `A=<opcode>,B=<operand>` records into a packed byte stream, and the
  machine runs a byte stream and reports a range of its memory. The two share nothing but
  the binary format described in [`bytecode`].
*/

#[macro_use] extern crate lazy_static;

pub mod address;
pub mod artifacts;
pub mod assembler;
pub mod bytecode;
pub mod config;
pub mod error;
pub mod machine;
mod table;

pub use address::{MemoryRange, MEMORY_SIZE};
pub use assembler::{assemble, Assembler, Assembly, LogEntry};
pub use config::{MachineConfig, ScanMode};
pub use error::{Error, Result};
pub use machine::{interpret, Machine, MemorySlice};
