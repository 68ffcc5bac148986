//! Shared integration test utilities

pub mod upstream;

pub use upstream::*;
