//! Test utilities and fixtures for LoopScout
//!
//! `builders` constructs normalized ASTs tersely; `fixtures` holds the
//! canonical selection scenarios shared by the integration tests.

pub mod builders;
pub mod fixtures;

pub use builders::*;
