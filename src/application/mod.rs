//! Application layer: use-case services over domain traits.

pub mod services;
