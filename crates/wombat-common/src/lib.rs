//! Common utilities for the Wombat selector compiler.
//!
//! This crate provides shared infrastructure used by the compiler crates:
//! - **Warning System** - colored terminal output for unsupported selector constructs

pub mod warning;
