use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use uvm::artifacts::{assemble_file, interpret_file};
use uvm::{MachineConfig, MemoryRange, ScanMode};

#[derive(Parser, Debug)]
#[command(name = "uvm")]
#[command(about = "Assembler and Interpreter for UVM")]
struct Cli {
  #[command(subcommand)]
  mode: Mode
}

#[derive(Subcommand, Debug)]
enum Mode {
  /// Assemble `A=<opcode>,B=<operand>` records into a binary
  Assemble {
    /// Assembly source, one record per line
    input_file: PathBuf,

    /// Binary output
    output_file: PathBuf,

    /// Log of the bytes emitted for each record (CSV format)
    log_file: PathBuf,

    /// Print the assembled records
    #[arg(long)]
    print: bool,
  },

  /// Run a binary and write a range of memory
  Interpret {
    /// Binary produced by `assemble`
    input_file: PathBuf,

    /// Result file for the memory range (CSV format)
    #[arg(long, alias = "result_file")]
    result_file: PathBuf,

    /// Memory range to report (start:end)
    #[arg(long, alias = "memory_range")]
    memory_range: MemoryRange,

    /// How far to advance after an instruction: `byte` or `instruction`
    #[arg(long, env = "UVM_SCAN_MODE", default_value_t = ScanMode::Byte)]
    scan_mode: ScanMode,

    /// Print the memory range
    #[arg(long)]
    print: bool,
  },
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  init_logging();

  let cli = Cli::parse();

  let outcome = match cli.mode {

    Mode::Assemble { input_file, output_file, log_file, print } => {
      assemble_file(&input_file, &output_file, &log_file).map(|assembly| {
        if print {
          println!("{}", assembly);
        }
      })
    }

    Mode::Interpret { input_file, result_file, memory_range, scan_mode, print } => {
      interpret_file(&input_file, &result_file, memory_range, MachineConfig::new(scan_mode))
        .map(|slice| {
          if print {
            println!("{}", slice);
          }
        })
    }

  };

  if let Err(e) = outcome {
    error!("Error! {}", e);
    process::exit(1);
  }
}
