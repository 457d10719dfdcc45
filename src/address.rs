//! Memory addresses and the caller-selected result range, with some convenience functions.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::{
  character::complete::{char as one_char, digit1, space0},
  combinator::{all_consuming, map_res},
  sequence::{delimited, separated_pair},
  IResult
};

use crate::bytecode::Word;
use crate::error::{Error, Result};

// `AddressType` is `usize`, as it is naturally an index into a memory store.
pub type AddressType = usize;

/// The number of cells in machine memory. Programs cannot address more than this.
pub const MEMORY_SIZE: usize = 1024;

/// Interprets a machine word as a memory address, failing if it does not name a cell.
pub fn to_address(word: Word) -> Result<AddressType> {
  match AddressType::try_from(word) {
    Ok(address) if address < MEMORY_SIZE => Ok(address),
    _ => Err(Error::AddressOutOfRange { address: word as AddressType })
  }
}

/**
  A contiguous range of memory `start..end`, written `start:end` on the command line. The
  end is exclusive. A range is only constructed if it lies inside memory, so slicing memory
  with it cannot fail.
*/
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemoryRange {
  pub start: AddressType,
  pub end: AddressType
}

impl MemoryRange {
  pub fn new(start: AddressType, end: AddressType) -> Result<MemoryRange> {
    if start > end {
      return Err(Error::ReversedRange { start, end });
    }
    if end > MEMORY_SIZE {
      return Err(Error::RangeOutOfBounds { start, end });
    }
    Ok(MemoryRange { start, end })
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

fn address_p(input: &str) -> IResult<&str, AddressType> {
  map_res(delimited(space0, digit1, space0), AddressType::from_str)(input)
}

fn range_p(input: &str) -> IResult<&str, (AddressType, AddressType)> {
  all_consuming(separated_pair(address_p, one_char(':'), address_p))(input)
}

impl FromStr for MemoryRange {
  type Err = Error;

  fn from_str(text: &str) -> Result<MemoryRange> {
    match range_p(text) {
      Ok((_rest, (start, end))) => MemoryRange::new(start, end),
      Err(_e) => Err(Error::InvalidRange { text: text.to_string() })
    }
  }
}

impl Display for MemoryRange {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.start, self.end)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_start_and_end() {
    let range: MemoryRange = "10:16".parse().unwrap();
    assert_eq!(range, MemoryRange { start: 10, end: 16 });
    assert_eq!(range.len(), 6);
    assert_eq!(range.to_string(), "10:16");
  }

  #[test]
  fn tolerates_spaces_around_addresses() {
    let range: MemoryRange = " 0 : 1024 ".parse().unwrap();
    assert_eq!(range, MemoryRange { start: 0, end: MEMORY_SIZE });
  }

  #[test]
  fn empty_range_is_allowed() {
    let range: MemoryRange = "5:5".parse().unwrap();
    assert!(range.is_empty());
  }

  #[test]
  fn rejects_ranges_past_memory() {
    assert!(matches!(
      "1000:1025".parse::<MemoryRange>(),
      Err(Error::RangeOutOfBounds { start: 1000, end: 1025 })
    ));
  }

  #[test]
  fn rejects_reversed_ranges() {
    assert!(matches!(
      "7:3".parse::<MemoryRange>(),
      Err(Error::ReversedRange { start: 7, end: 3 })
    ));
    assert_eq!(
      MemoryRange::new(7, 3).unwrap_err().to_string(),
      "memory range 7:3 ends before it starts"
    );
  }

  #[test]
  fn rejects_malformed_ranges() {
    for text in &["", "3", "3:", ":4", "-1:4", "a:b", "1:2:3", "1-2"] {
      assert!(
        matches!(text.parse::<MemoryRange>(), Err(Error::InvalidRange { .. })),
        "accepted `{}`", text
      );
    }
  }

  #[test]
  fn words_outside_memory_are_not_addresses() {
    assert_eq!(to_address(0).unwrap(), 0);
    assert_eq!(to_address(1023).unwrap(), 1023);
    assert!(matches!(to_address(1024), Err(Error::AddressOutOfRange { address: 1024 })));
    assert!(matches!(to_address(Word::MAX), Err(Error::AddressOutOfRange { .. })));
  }
}
