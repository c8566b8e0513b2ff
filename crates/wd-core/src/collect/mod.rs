//! Agent section collection: line splitting and snapshot construction.

pub mod section;

pub use section::{parse_section, split_section, DefenderSection, StringTable, DEFAULT_SEPARATOR};
