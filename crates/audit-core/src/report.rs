//! Fixed-width posture table, rendered once and written to every sink.

mod sink;
mod table;

pub use sink::{report_file_name, write_report};
pub use table::{render_table, row_cells, COLUMNS, RULE_WIDTH};
