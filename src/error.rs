//! Errors shared by the assembler, the machine, and the artifact adapters. Every error is
//! fatal to the run that produced it.

use std::path::PathBuf;

use thiserror::Error;

use crate::address::AddressType;
use crate::bytecode::Opcode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("file {} not found", path.display())]
  InputNotFound { path: PathBuf },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  /// The line is not a list of `key=value` pairs with integer values, or it names a key
  /// other than `A` and `B`, or names one of them twice.
  #[error("line {line}: malformed instruction `{text}`")]
  MalformedInstruction { line: usize, text: String },

  #[error("line {line}: missing parameter `{key}` in instruction")]
  MissingParameter { line: usize, key: char },

  #[error("line {line}: operand {value} does not fit in 32 bits")]
  OperandOutOfRange { line: usize, value: i64 },

  #[error("memory address {address} is out of range")]
  AddressOutOfRange { address: AddressType },

  #[error("operand of the instruction at byte {position} runs past the end of the program")]
  TruncatedOperand { position: usize },

  #[error("invalid memory range `{text}`, expected `start:end`")]
  InvalidRange { text: String },

  #[error("memory range {start}:{end} is outside of memory")]
  RangeOutOfBounds { start: AddressType, end: AddressType },

  #[error("memory range {start}:{end} ends before it starts")]
  ReversedRange { start: AddressType, end: AddressType },

  /// An instruction built by hand with an operand its opcode does not take, or without
  /// one it does.
  #[error("{opcode} takes {arity} operands")]
  ArityMismatch { opcode: Opcode, arity: usize },
}
