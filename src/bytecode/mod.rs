/*!

  The machine uses a 32 bit big-endian word size. Instructions are either one byte or five
  bytes (including opcode). There is no alignment, padding, header, or length prefix: a
  program is the concatenation of its encoded instructions. The sizes of instruction
  components are as follows:

    Opcode:   8 bits
    Operand: 32 bits, big-endian

  Whether an operand follows an opcode is determined by the opcode alone. Bytes that are
  not opcodes of the machine are not instructions; the machine skips them.

  The textual form of a program, called assembly, is one `A=<opcode>,B=<operand>` record
  per line. Every record carries an operand, but only opcodes that take one are emitted by
  the assembler.

*/

mod assembly;
mod binary;
mod instruction;

pub use assembly::{parse_assembly, parse_record, InstructionRecord};
pub use binary::{encode_instruction, instruction_size, try_decode_instruction,
                 EncodedInstruction, Word, OPERAND_WIDTH};
pub use instruction::{Instruction, Opcode};
