//! Function usage: catalog, detection, accumulation and output

pub mod catalog;
pub mod emit;
pub mod scanner;
pub mod table;

pub use catalog::FunctionCatalog;
pub use emit::{OutputFormat, csv_escape, usage_lines, write_table};
pub use scanner::{FunctionSet, scan_usage};
pub use table::UsageTable;
