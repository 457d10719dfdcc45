//! Run-time configuration of the machine. Compile-time configuration is done with Cargo
//! features; see `Cargo.toml`.

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

/**
  How far the machine's cursor moves after it executes an instruction.

  In `Byte` mode the cursor always moves to the next byte, so the bytes of an operand are
  read again as if they were opcodes. Programs assembled for UVM were run this way, and any
  program relying on it (for example an operand byte of `101` that loads from memory) needs
  it to behave the same. `Instruction` mode moves past the operand instead.
*/
#[derive(StrumDisplay, EnumString, IntoStaticStr, Clone, Copy, Eq, PartialEq, Debug, Hash, Default)]
#[strum(serialize_all = "kebab-case")]
pub enum ScanMode {
  #[default]
  Byte,
  Instruction
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct MachineConfig {
  pub scan_mode: ScanMode
}

impl MachineConfig {
  pub fn new(scan_mode: ScanMode) -> MachineConfig {
    MachineConfig { scan_mode }
  }
}


#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn byte_stepping_is_the_default() {
    assert_eq!(MachineConfig::default().scan_mode, ScanMode::Byte);
  }

  #[test]
  fn scan_modes_round_trip_through_text() {
    assert_eq!(ScanMode::from_str("byte").unwrap(), ScanMode::Byte);
    assert_eq!(ScanMode::from_str("instruction").unwrap(), ScanMode::Instruction);
    assert_eq!(ScanMode::Instruction.to_string(), "instruction");
    assert!(ScanMode::from_str("word").is_err());
  }
}
