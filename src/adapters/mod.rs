//! Concrete adapter implementations for ports.

pub mod config_file;
pub mod error_sink;
