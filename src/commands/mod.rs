//! Commands for relstat

pub mod help;
pub mod releases;

pub use help::help;
pub use releases::releases;
