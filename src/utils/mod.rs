//! Common utilities and helpers

pub mod logging;
pub mod size;
