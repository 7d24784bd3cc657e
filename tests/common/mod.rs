#![allow(dead_code)]
#![allow(unused_imports)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

pub use chainbuf::test_utils::{init_test_logging, init_test_logging_with_level};

/// Number of cases for property tests, tuned for CI wall-clock.
pub const PROPTEST_CASES: u32 = 256;
