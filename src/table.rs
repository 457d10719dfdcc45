//! The table style shared by everything that renders itself with `prettytable`.

use prettytable::format::{FormatBuilder, LinePosition, LineSeparator, TableFormat};

lazy_static! {
  pub static ref TABLE_DISPLAY_FORMAT: TableFormat =
    FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        LinePosition::Title,
        LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        LinePosition::Bottom,
        LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}
