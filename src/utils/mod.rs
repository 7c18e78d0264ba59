//! Shared utilities with no layer dependencies.

pub mod code_generator;
pub mod url_normalizer;
