//! Properties of the binary format and of the machine that must hold for every program.

use proptest::prelude::*;
use strum::IntoEnumIterator;

use uvm::bytecode::{encode_instruction, try_decode_instruction, Instruction, InstructionRecord,
                    Opcode, Word};
use uvm::{Assembler, Machine, MachineConfig, MemoryRange, ScanMode, MEMORY_SIZE};

fn operand_opcode() -> impl Strategy<Value = Opcode> {
  prop::sample::select(Opcode::iter().filter(|opcode| opcode.arity() == 1).collect::<Vec<_>>())
}

/// Any value of `A` that the assembler does not emit.
fn skipped_opcode() -> impl Strategy<Value = i64> {
  any::<i64>().prop_filter("emitted opcode", |a| ![120, 36, 51].contains(a))
}

proptest! {
  /// Assembling a record and decoding its bytes gives back the record.
  #[test]
  fn prop_emitted_records_round_trip(opcode in operand_opcode(), b in any::<Word>()) {
    let mut assembler = Assembler::new();
    let record = InstructionRecord { line: 1, a: opcode.code() as i64, b: b as i64 };
    assembler.assemble_record(&record).unwrap();
    let code = assembler.finish().code;

    prop_assert_eq!(code.len(), 5);
    prop_assert_eq!(
      try_decode_instruction(&code, 0).unwrap(),
      Some(Instruction::Unary { opcode, operand: b })
    );
  }

  /// Everything but the three operand opcodes is logged and produces no bytes.
  #[test]
  fn prop_other_records_emit_nothing(a in skipped_opcode(), b in any::<i64>()) {
    let mut assembler = Assembler::new();
    let entry = assembler.assemble_record(&InstructionRecord { line: 1, a, b }).unwrap().clone();
    prop_assert_eq!(entry.a, a);
    prop_assert_eq!(entry.b, b);
    prop_assert_eq!(entry.instruction, "");
    prop_assert!(assembler.finish().code.is_empty());
  }

  /// Loading an immediate touches only the accumulator.
  #[test]
  fn prop_load_immediate(value in any::<Word>()) {
    let mut machine = Machine::new(MachineConfig::new(ScanMode::Instruction));
    machine.run(encode_instruction(Instruction::Unary {
      opcode: Opcode::LoadImmediate,
      operand: value
    }).unwrap().as_bytes()).unwrap();
    prop_assert_eq!(machine.accumulator(), value);
    prop_assert!(machine.memory().iter().all(|cell| *cell == 0));
  }

  /// A stored value reads back at relative address zero of a one-cell slice.
  #[test]
  fn prop_store_then_read_back(value in any::<Word>(), address in 0..MEMORY_SIZE) {
    let mut stream = Vec::new();
    stream.extend_from_slice(
      encode_instruction(Instruction::Unary { opcode: Opcode::LoadImmediate, operand: value })
        .unwrap()
        .as_bytes()
    );
    stream.extend_from_slice(
      encode_instruction(Instruction::Unary { opcode: Opcode::Store, operand: address as Word })
        .unwrap()
        .as_bytes()
    );

    let range = MemoryRange::new(address, address + 1).unwrap();
    let slice = uvm::interpret(&stream, range, MachineConfig::new(ScanMode::Instruction)).unwrap();
    prop_assert_eq!(slice.rows().collect::<Vec<_>>(), vec![(0, value)]);
  }

  /// Slices have one row per cell, numbered from zero.
  #[test]
  fn prop_slices_are_relabelled(start in 0..=MEMORY_SIZE, len in 0..64usize) {
    let end = (start + len).min(MEMORY_SIZE);
    let slice = Machine::default().slice(MemoryRange::new(start, end).unwrap()).unwrap();
    let addresses: Vec<usize> = slice.rows().map(|(address, _)| address).collect();
    prop_assert_eq!(addresses, (0..end - start).collect::<Vec<_>>());
  }

  /// The machine never panics, whatever bytes it is given.
  #[test]
  fn prop_arbitrary_streams_do_not_panic(stream in prop::collection::vec(any::<u8>(), 0..64)) {
    for mode in [ScanMode::Byte, ScanMode::Instruction].iter() {
      let mut machine = Machine::new(MachineConfig::new(*mode));
      let _ = machine.run(&stream);
    }
  }
}
