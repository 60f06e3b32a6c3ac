//! remito benchmarking suite
//!
//! Benchmarks for configuration parsing, merging and template resolution.

pub mod common;

pub use common::*;
