/*!
  This module is responsible for the encoding and decoding of binary instructions.

*/
use super::{Opcode, Instruction};
use crate::error::{Error, Result};

// If you change either of these you must also change `encode_instruction` and
// `try_decode_instruction`.
pub type Word = u32;
pub const OPERAND_WIDTH: usize = 4;

/// An `Either` type for an encoded instruction, allowing the instruction to be either a
/// lone opcode byte or an opcode framed with its operand.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EncodedInstruction{
  Byte(u8),
  Framed([u8; 1 + OPERAND_WIDTH])
}

impl EncodedInstruction {
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      EncodedInstruction::Byte(byte) => std::slice::from_ref(byte),
      EncodedInstruction::Framed(bytes) => bytes
    }
  }
}

/**
  Decodes the instruction whose opcode is at `position` in `stream`. Returns `Ok(None)` if
  the byte there is not an opcode, in which case it occupies a single byte. An operand is
  read from the bytes immediately following the opcode, which must all be present.
*/
pub fn try_decode_instruction(stream: &[u8], position: usize) -> Result<Option<Instruction>> {
  let opcode = match stream.get(position).map(|byte| Opcode::try_from(*byte)) {
    Some(Ok(opcode)) => opcode,
    _ => return Ok(None)
  };

  if opcode.arity() == 0 {
    // [OpCode:8]
    return Ok(Some(Instruction::Nullary(opcode)));
  }

  // [OpCode:8][Operand:32]
  let operand_start = position + 1;
  let operand_bytes: [u8; OPERAND_WIDTH] =
    match stream.get(operand_start..operand_start + OPERAND_WIDTH) {
      Some(bytes) => bytes.try_into().map_err(|_| Error::TruncatedOperand { position })?,
      None => return Err(Error::TruncatedOperand { position })
    };

  Ok(Some(Instruction::Unary {
    opcode,
    operand: Word::from_be_bytes(operand_bytes)
  }))
}

/// Encodes the instruction into bytecode. The instruction must carry exactly the operands
/// its opcode takes.
pub fn encode_instruction(instruction: Instruction) -> Result<EncodedInstruction>{
  instruction.check_arity()?;

  let encoded = match instruction{

    Instruction::Unary {opcode, operand} => {
      // [OpCode:8][Operand:32]
      let mut bytes = [opcode.code(); 1 + OPERAND_WIDTH];
      bytes[1..].copy_from_slice(&operand.to_be_bytes());
      EncodedInstruction::Framed(bytes)
    },

    Instruction::Nullary(opcode) => {
      // [OpCode:8]
      EncodedInstruction::Byte(opcode.code())
    },
  };
  Ok(encoded)
}


/// Returns the size in BYTES of an instruction for the corresponding opcode.
pub fn instruction_size(opcode: Opcode) -> usize{
  1 + opcode.arity() * OPERAND_WIDTH
}
