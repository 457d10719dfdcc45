/*!
  The human readable textual form of a program is called assembly. Each non-blank line is
  one record naming an opcode `A` and an operand `B`:

    ```text
    A=120, B=7
    A=36,  B=3
    ```

  Keys may appear in either order and whitespace around keys and values is ignored. Both
  keys are required on every line, even for opcodes that take no operand.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::{
  character::complete::{
    alphanumeric1,
    char as one_char,
    digit1,
    one_of,
    space0
  },
  combinator::{all_consuming, map_res, opt, recognize},
  multi::separated_list1,
  sequence::{delimited, pair, separated_pair},
  IResult
};

use crate::error::{Error, Result};

/// One line of assembly. The values are kept exactly as written; whether they make a valid
/// instruction is decided by the assembler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct InstructionRecord {
  /// The 1-based source line the record came from.
  pub line: usize,
  pub a: i64,
  pub b: i64
}

impl Display for InstructionRecord {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "A={},B={}", self.a, self.b)
  }
}

fn integer_p(input: &str) -> IResult<&str, i64> {
  map_res(recognize(pair(opt(one_of("+-")), digit1)), i64::from_str)(input)
}

fn key_value_p(input: &str) -> IResult<&str, (&str, i64)> {
  separated_pair(
    delimited(space0, alphanumeric1, space0),
    one_char('='),
    delimited(space0, integer_p, space0)
  )(input)
}

fn key_values_p(input: &str) -> IResult<&str, Vec<(&str, i64)>> {
  all_consuming(separated_list1(one_char(','), key_value_p))(input)
}

/// Parses a single line of assembly. Blank lines hold no record.
pub fn parse_record(line: usize, text: &str) -> Result<Option<InstructionRecord>> {
  let text = text.trim();
  if text.is_empty() {
    return Ok(None);
  }

  let malformed = || Error::MalformedInstruction { line, text: text.to_string() };

  let pairs = match key_values_p(text) {
    Ok((_rest, pairs)) => pairs,
    Err(_e) => return Err(malformed())
  };

  let mut a: Option<i64> = None;
  let mut b: Option<i64> = None;
  for (key, value) in pairs {
    let slot = match key {
      "A" => &mut a,
      "B" => &mut b,
      _ => return Err(malformed())
    };
    if slot.replace(value).is_some() {
      return Err(malformed());
    }
  }

  let a = a.ok_or(Error::MissingParameter { line, key: 'A' })?;
  let b = b.ok_or(Error::MissingParameter { line, key: 'B' })?;
  Ok(Some(InstructionRecord { line, a, b }))
}

/// Parses every line of `text`, stopping at the first line that is not a valid record.
pub fn parse_assembly(text: &str) -> Result<Vec<InstructionRecord>> {
  text
    .lines()
    .enumerate()
    .filter_map(|(idx, line)| parse_record(idx + 1, line).transpose())
    .collect()
}
