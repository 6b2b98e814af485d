//! Core domain types and logic.

pub mod error;
pub mod line_parser;
pub mod numeric;
pub mod store;
