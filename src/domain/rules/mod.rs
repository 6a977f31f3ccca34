// Domain rules - Per-file decision modules

pub mod orderer;
pub mod sanitizer;
pub mod size_check;

pub use orderer::{StreamOrderer, DEFAULT_LOWER_BOUND_MB};
pub use sanitizer::StreamSanitizer;
pub use size_check::{check_new_file_size, SizeBounds};
