//! # Modelgen Bench
//!
//! Benchmarking utilities for modelgen performance testing.

pub mod fixtures;
