//! File storage: disk I/O and native dialogs

pub mod dialogs;
pub mod operations;

pub use operations::{read_file, write_file};
