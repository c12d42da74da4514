//! Terminal output

mod report;

pub use report::{format_pair_line, VerboseReporter, BANNER};
