//! Common utilities for the sift selector toolkit.
//!
//! This crate provides shared infrastructure used by the parser and the CLI:
//! - **Warning System** - colored, deduplicated terminal output for input the
//!   parser accepts but cannot give structure to

pub mod warning;
