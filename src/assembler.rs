//! Translates assembly records into a byte stream for the machine, keeping a log of the
//! bytes each record produced.

use std::fmt::{Display, Formatter};

use prettytable::{row, Table};
use serde::Serialize;
use tracing::debug;

use crate::bytecode::{encode_instruction, parse_assembly, EncodedInstruction, Instruction,
                      InstructionRecord, Opcode, Word};
use crate::error::{Error, Result};
use crate::table::TABLE_DISPLAY_FORMAT;

/// What a single record assembled to. Serialized as a row of the log artifact.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct LogEntry {
  #[serde(rename = "A")]
  pub a: i64,
  #[serde(rename = "B")]
  pub b: i64,
  /// The emitted bytes as comma separated hex, e.g. `0x78,0x0,0x0,0x0,0x2a`. Empty if the
  /// record emitted nothing.
  pub instruction: String
}

/// The finished output of an `Assembler`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assembly {
  pub code: Vec<u8>,
  pub log: Vec<LogEntry>
}

/**
  Accumulates the byte stream and the log as records are assembled. Nothing is handed out
  until `finish`, so a failing record leaves no partial output behind.
*/
#[derive(Debug, Default)]
pub struct Assembler {
  code: Vec<u8>,
  log: Vec<LogEntry>
}

impl Assembler {

  pub fn new() -> Assembler {
    Assembler::default()
  }

  /**
    Decides what, if anything, a record assembles to. Only opcodes that take an operand are
    emitted. Every other value of `A`, including `LoadIndirect`, produces no instruction.
  */
  fn record_to_instruction(record: &InstructionRecord) -> Result<Option<Instruction>> {
    let opcode = match u8::try_from(record.a).ok().and_then(|byte| Opcode::try_from(byte).ok()) {
      Some(opcode) if opcode.arity() == 1 => opcode,
      _ => return Ok(None)
    };

    let operand = Word::try_from(record.b)
      .map_err(|_| Error::OperandOutOfRange { line: record.line, value: record.b })?;

    Ok(Some(Instruction::Unary { opcode, operand }))
  }

  /// Assembles one record, appending its bytes to the code and its entry to the log.
  pub fn assemble_record(&mut self, record: &InstructionRecord) -> Result<&LogEntry> {
    let start = self.code.len();

    match Assembler::record_to_instruction(record)? {
      Some(instruction) => {
        debug!(line = record.line, %instruction, "emitting instruction");
        self.emit_bytecode(encode_instruction(instruction)?);
      }
      None => {
        debug!(line = record.line, %record, "record emits no bytes");
      }
    }

    self.log.push(LogEntry {
      a: record.a,
      b: record.b,
      instruction: hex_dump(&self.code[start..])
    });
    Ok(&self.log[self.log.len() - 1])
  }

  fn emit_bytecode(&mut self, instruction: EncodedInstruction){
    self.code.extend_from_slice(instruction.as_bytes());
  }

  pub fn finish(self) -> Assembly {
    Assembly {
      code: self.code,
      log: self.log
    }
  }
}

/// Assembles the full text of a program.
pub fn assemble(text: &str) -> Result<Assembly> {
  let mut assembler = Assembler::new();
  for record in parse_assembly(text)? {
    assembler.assemble_record(&record)?;
  }
  Ok(assembler.finish())
}

/// Formats each byte as `0x`-prefixed lowercase hex without padding, joined by commas.
pub fn hex_dump(bytes: &[u8]) -> String {
  bytes
    .iter()
    .map(|byte| format!("{:#x}", byte))
    .collect::<Vec<String>>()
    .join(",")
}

impl Display for Assembly {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"A", ubr->"B", ubl->"Instruction"]);

    for entry in self.log.iter() {
      table.add_row(row![r->entry.a, r->entry.b, entry.instruction]);
    }

    write!(f, "{} bytes of bytecode.\n{}", self.code.len(), table)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn record(a: i64, b: i64) -> InstructionRecord {
    InstructionRecord { line: 1, a, b }
  }

  #[test]
  fn operand_opcodes_are_emitted_with_big_endian_operands() {
    let mut assembler = Assembler::new();
    let entry = assembler.assemble_record(&record(120, 42)).unwrap().clone();
    assert_eq!(entry.instruction, "0x78,0x0,0x0,0x0,0x2a");

    assembler.assemble_record(&record(36, 0x0102_0304)).unwrap();
    assembler.assemble_record(&record(51, 2)).unwrap();

    let assembly = assembler.finish();
    assert_eq!(
      assembly.code,
      vec![120, 0, 0, 0, 42, 36, 1, 2, 3, 4, 51, 0, 0, 0, 2]
    );
    assert_eq!(assembly.log.len(), 3);
  }

  #[test]
  fn other_opcodes_emit_nothing_but_are_logged() {
    let mut assembler = Assembler::new();
    for a in [101, 0, 7, 255, 256, -120].iter() {
      let entry = assembler.assemble_record(&record(*a, 5)).unwrap();
      assert_eq!(entry, &LogEntry { a: *a, b: 5, instruction: String::new() });
    }
    let assembly = assembler.finish();
    assert!(assembly.code.is_empty());
    assert_eq!(assembly.log.len(), 6);
  }

  #[test]
  fn skipped_records_take_any_operand() {
    let mut assembler = Assembler::new();
    assert!(assembler.assemble_record(&record(101, -1)).is_ok());
    assert!(assembler.assemble_record(&record(9, i64::MAX)).is_ok());
  }

  #[test]
  fn emitted_operands_must_fit_in_a_word() {
    let mut assembler = Assembler::new();
    let too_big = InstructionRecord { line: 9, a: 36, b: 1 << 32 };
    assert!(matches!(
      assembler.assemble_record(&too_big),
      Err(Error::OperandOutOfRange { line: 9, value }) if value == 1 << 32
    ));
    assert!(matches!(
      assembler.assemble_record(&record(120, -1)),
      Err(Error::OperandOutOfRange { .. })
    ));
    assert!(assembler.assemble_record(&record(120, Word::MAX as i64)).is_ok());
  }

  #[test]
  fn assembles_text() {
    let assembly = assemble("A=120,B=7\nA=101,B=5\n\nA=36,B=3\n").unwrap();
    assert_eq!(assembly.code, vec![120, 0, 0, 0, 7, 36, 0, 0, 0, 3]);
    let instructions: Vec<&str> =
      assembly.log.iter().map(|entry| entry.instruction.as_str()).collect();
    assert_eq!(instructions, vec!["0x78,0x0,0x0,0x0,0x7", "", "0x24,0x0,0x0,0x0,0x3"]);
  }

  #[test]
  fn missing_operand_fails_the_whole_program() {
    let result = assemble("A=120,B=7\nA=120\n");
    assert!(matches!(result, Err(Error::MissingParameter { line: 2, key: 'B' })));
  }

  #[test]
  fn hex_dump_is_unpadded() {
    assert_eq!(hex_dump(&[]), "");
    assert_eq!(hex_dump(&[0, 15, 16, 255]), "0x0,0xf,0x10,0xff");
  }

  #[test]
  fn display_lists_every_record() {
    let assembly = assemble("A=120,B=7\nA=101,B=5\n").unwrap();
    let text = assembly.to_string();
    assert!(text.starts_with("5 bytes of bytecode."));
    assert!(text.contains("0x78,0x0,0x0,0x0,0x7"));
    assert!(text.contains("101"));
  }
}
