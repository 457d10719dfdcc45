use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::bytecode::Word;
use crate::error::{Error, Result};

/**
  Opcodes of the virtual machine.

  The discriminant of each variant is its opcode byte, so converting between the two is a
  cast. The set of opcodes is closed: a byte for which `Opcode::try_from` fails is not an
  instruction.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Opcode {
  LoadImmediate = 120, // load_immediate( operand ):  ACC <- operand
  LoadIndirect  = 101, // load_indirect:              ACC <- MEM[ACC]
  Store         =  36, // store( address ):           MEM[address] <- ACC
  CompareAndSet =  51, // compare_and_set( address ): MEM[address] <- MEM[address] != ACC
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The number of operands that follow the opcode in the byte stream.
  pub fn arity(&self) -> usize {
    match self {
      Opcode::LoadIndirect => 0,
      | Opcode::LoadImmediate
      | Opcode::Store
      | Opcode::CompareAndSet => 1
    }
  }
}

/// Holds the unencoded components of an instruction. As such, it enumerates the possible
/// instruction argument combinations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [OpCode:8][Operand:32]
  Unary {
    opcode: Opcode,
    operand: Word
  },
  /// [OpCode:8]
  Nullary(Opcode),
}

impl Instruction {
  pub fn opcode(&self) -> Opcode {
    match self {
      Instruction::Unary { opcode, .. } => *opcode,
      Instruction::Nullary(opcode) => *opcode
    }
  }

  /// Instructions built by hand can pair an opcode with the wrong number of operands;
  /// decoded ones cannot.
  pub fn check_arity(&self) -> Result<()> {
    let operands = match self {
      Instruction::Unary { .. } => 1,
      Instruction::Nullary(_) => 0
    };
    let opcode = self.opcode();
    match opcode.arity() == operands {
      true  => Ok(()),
      false => Err(Error::ArityMismatch { opcode, arity: opcode.arity() })
    }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{

      Instruction::Unary { opcode, operand } => {
        write!(f, "{}({})", opcode, operand)
      }

      Instruction::Nullary(opcode) => {
        write!(f, "{}", opcode)
      }

    }
  }
}
