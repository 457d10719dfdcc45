/*!
  Reading and writing the files the toolchain works with:

    assembly source  ->  [`assemble_file`]   ->  binary + CSV log
    binary           ->  [`interpret_file`]  ->  CSV result

  Both pipelines do all of their work in memory and only touch their output files once the
  work has succeeded, so a failed run leaves no artifacts behind.
*/

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::address::{AddressType, MemoryRange};
use crate::assembler::{assemble, Assembly, LogEntry};
use crate::bytecode::Word;
use crate::config::MachineConfig;
use crate::error::{Error, Result};
use crate::machine::{interpret, MemorySlice};

const LOG_HEADER: [&str; 3] = ["A", "B", "instruction"];
const RESULT_HEADER: [&str; 2] = ["Address", "Value"];

#[derive(Serialize)]
struct ResultRow {
  #[serde(rename = "Address")]
  address: AddressType,
  #[serde(rename = "Value")]
  value: Word
}

fn missing_input(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
  move |error| match error.kind() {
    ErrorKind::NotFound => Error::InputNotFound { path: path.to_path_buf() },
    _ => Error::Io(error)
  }
}

fn csv_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
  // Headers are written by hand so that an empty table still gets one.
  let writer = csv::WriterBuilder::new()
    .has_headers(false)
    .terminator(csv::Terminator::CRLF)
    .from_path(path)?;
  Ok(writer)
}

pub fn read_source(path: &Path) -> Result<String> {
  fs::read_to_string(path).map_err(missing_input(path))
}

pub fn read_binary(path: &Path) -> Result<Vec<u8>> {
  fs::read(path).map_err(missing_input(path))
}

pub fn write_binary(path: &Path, code: &[u8]) -> Result<()> {
  fs::write(path, code)?;
  info!("Binary written to {}", path.display());
  Ok(())
}

pub fn write_log(path: &Path, log: &[LogEntry]) -> Result<()> {
  let mut writer = csv_writer(path)?;
  writer.write_record(&LOG_HEADER)?;
  for entry in log {
    writer.serialize(entry)?;
  }
  writer.flush()?;
  info!("Log written to {}", path.display());
  Ok(())
}

pub fn write_result(path: &Path, slice: &MemorySlice) -> Result<()> {
  let mut writer = csv_writer(path)?;
  writer.write_record(&RESULT_HEADER)?;
  for (address, value) in slice.rows() {
    writer.serialize(ResultRow { address, value })?;
  }
  writer.flush()?;
  info!("Result written to {}", path.display());
  Ok(())
}

/// Assembles the source at `input`, writing the binary to `output` and the log to `log`.
pub fn assemble_file(input: &Path, output: &Path, log: &Path) -> Result<Assembly> {
  let source = read_source(input)?;
  let assembly = assemble(&source)?;
  info!(
    records = assembly.log.len(),
    bytes = assembly.code.len(),
    "assembled {}", input.display()
  );
  write_binary(output, &assembly.code)?;
  write_log(log, &assembly.log)?;
  Ok(assembly)
}

/// Runs the binary at `input` and writes the cells in `range` to `result`.
pub fn interpret_file(
  input: &Path,
  result: &Path,
  range: MemoryRange,
  config: MachineConfig
) -> Result<MemorySlice> {
  let stream = read_binary(input)?;
  info!(bytes = stream.len(), scan_mode = %config.scan_mode, "interpreting {}", input.display());
  let slice = interpret(&stream, range, config)?;
  write_result(result, &slice)?;
  Ok(slice)
}
