//! Log discovery and metric extraction
//!
//! This module lists experiment logs in a directory and pulls
//! scores out of their text.

pub mod finder;
pub mod path_utils;

// Re-export commonly used items
pub use finder::{extract_run_scores, read_performance_map};
pub use path_utils::{file_name_str, list_log_files};
