//! streamprep library
//!
//! Decision logic for a transcode host's pre- and post-processing steps:
//! cleaning unwanted streams, putting streams in a canonical order,
//! planning the transcode, and validating the size of the result. Every
//! decision is a pure function of a file record, read-only policy tables
//! and the execution node name.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use domain::errors::DomainError;
pub use domain::model::{DecisionResult, FileDescriptor, StreamDescriptor, StreamKind};
pub use domain::policy::{NodeRegistry, PolicyTables};
pub use error::{PrepError, PrepResult};
