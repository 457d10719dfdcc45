//! Structures and functions for the UVM accumulator machine: a single accumulator register
//! in front of a fixed block of word-sized memory cells.

use std::fmt::{Display, Formatter};

use prettytable::{row, table, Table};
use tracing::{debug, trace};

use crate::address::{to_address, AddressType, MemoryRange, MEMORY_SIZE};
use crate::bytecode::{instruction_size, try_decode_instruction, Instruction, Opcode, Word};
use crate::config::{MachineConfig, ScanMode};
use crate::error::{Error, Result};
use crate::table::TABLE_DISPLAY_FORMAT;

pub struct Machine {
  config: MachineConfig,

  // Registers //
  accumulator : Word,

  // Memory Store
  memory : [Word; MEMORY_SIZE],

  // The most recently written memory cell, highlighted when displayed.
  last_write : Option<AddressType>,
}

impl Machine {

  // region Display methods

  /// Tabulates the nonzero cells of `memory`. A machine that has run a small program is
  /// mostly zeros.
  fn make_memory_table(memory: &[Word], highlight: Option<AddressType>) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, value) in memory.iter().enumerate() {
      if *value == 0 && Some(i) != highlight {
        continue;
      }
      match Some(i) == highlight {

        true  => {
          table.add_row(row![r->format!("* --> MEM[{}] =", i), value]);
        }

        false => {
          table.add_row(row![r->format!("MEM[{}] =", i), value]);
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion

  // region Low-level utility methods

  pub fn new(config: MachineConfig) -> Machine {
    Machine {
      config,
      accumulator : 0,
      memory      : [0; MEMORY_SIZE],
      last_write  : None,
    }
  }

  pub fn accumulator(&self) -> Word {
    self.accumulator
  }

  pub fn memory(&self) -> &[Word] {
    &self.memory
  }

  /// Reads the cell at `address`, which must lie inside memory.
  fn value_at(&self, address: Word) -> Result<Word> {
    Ok(self.memory[to_address(address)?])
  }

  /// Writes the cell at `address`, which must lie inside memory.
  fn set_value_at(&mut self, address: Word, value: Word) -> Result<()> {
    let address = to_address(address)?;
    self.memory[address] = value;
    self.last_write = Some(address);
    Ok(())
  }

  // endregion

  // region Interpretation

  /**
    Executes every instruction in `stream`, in order. There is no halt instruction; the
    machine stops when the cursor reaches the end of the stream. Bytes that are not opcodes
    are skipped. How far the cursor moves after an instruction is set by the scan mode.
  */
  pub fn run(&mut self, stream: &[u8]) -> Result<()> {
    let mut position = 0;

    while position < stream.len() {
      let step = match try_decode_instruction(stream, position)? {

        Some(instruction) => {
          debug!(position, %instruction, "executing");
          self.execute(instruction)?;

          #[cfg(feature = "trace_computation")] trace!("\n{}", self);

          match self.config.scan_mode {
            ScanMode::Byte        => 1,
            ScanMode::Instruction => instruction_size(instruction.opcode())
          }
        }

        None => {
          trace!(position, byte = stream[position], "skipping non-opcode byte");
          1
        }

      };
      position += step;
    }

    Ok(())
  }

  pub fn execute(&mut self, instruction: Instruction) -> Result<()> {
    match instruction {
      Instruction::Unary { opcode: Opcode::LoadImmediate, operand } => {
        self.load_immediate(operand);
        Ok(())
      }
      Instruction::Unary { opcode: Opcode::Store, operand }         => self.store(operand),
      Instruction::Unary { opcode: Opcode::CompareAndSet, operand } => self.compare_and_set(operand),
      Instruction::Nullary(Opcode::LoadIndirect)                    => self.load_indirect(),

      // Only instructions built by hand get here; decoding never mismatches arity.
      | Instruction::Unary { opcode: Opcode::LoadIndirect, .. }
      | Instruction::Nullary(_) => instruction.check_arity()
    }
  }

  /// Returns a copy of the cells in `range`.
  pub fn slice(&self, range: MemoryRange) -> Result<MemorySlice> {
    if range.start > range.end {
      return Err(Error::ReversedRange { start: range.start, end: range.end });
    }
    match self.memory.get(range.start..range.end) {
      Some(values) => Ok(MemorySlice { start: range.start, values: values.to_vec() }),
      None => Err(Error::RangeOutOfBounds { start: range.start, end: range.end })
    }
  }

  // endregion

  // region VM instruction methods

  /// `ACC <- operand`
  fn load_immediate(&mut self, operand: Word) {
    self.accumulator = operand;
  }

  /// `ACC <- MEM[ACC]`. The accumulator must hold a valid address.
  fn load_indirect(&mut self) -> Result<()> {
    self.accumulator = self.value_at(self.accumulator)?;
    Ok(())
  }

  /// `MEM[address] <- ACC`
  fn store(&mut self, address: Word) -> Result<()> {
    self.set_value_at(address, self.accumulator)
  }

  /// `MEM[address] <- 1` if the cell differs from the accumulator, otherwise `0`.
  fn compare_and_set(&mut self, address: Word) -> Result<()> {
    let differs = self.value_at(address)? != self.accumulator;
    self.set_value_at(address, differs as Word)
  }

  // endregion

}

impl Default for Machine {
  fn default() -> Machine {
    Machine::new(MachineConfig::default())
  }
}

/// Runs `stream` on a fresh machine and returns the cells in `range`.
pub fn interpret(stream: &[u8], range: MemoryRange, config: MachineConfig) -> Result<MemorySlice> {
  let mut machine = Machine::new(config);
  machine.run(stream)?;
  debug!(accumulator = machine.accumulator(), "program finished");
  machine.slice(range)
}

/// A copy of a contiguous range of memory. Its cells are addressed relative to the start of
/// the range.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MemorySlice {
  /// The absolute address of the first cell.
  pub start: AddressType,
  pub values: Vec<Word>
}

impl MemorySlice {
  /// Pairs each value with its address relative to the start of the slice.
  pub fn rows(&self) -> impl Iterator<Item = (AddressType, Word)> + '_ {
    self.values.iter().copied().enumerate()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl Display for MemorySlice {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Value"]);

    for (address, value) in self.rows() {
      table.add_row(row![r->address, value]);
    }

    write!(f, "MEM[{}..{}]\n{}", self.start, self.start + self.len(), table)
  }
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let memory_table = Machine::make_memory_table(&self.memory, self.last_write);

    let mut combined_table = table!([memory_table]);

    combined_table.set_titles(row![ub->format!("ACC = {}", self.accumulator)]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "Scan mode: {}\n{}", self.config.scan_mode, combined_table)
  }
}
