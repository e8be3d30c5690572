//! Command implementations for the statical CLI.
//!
//! Each command module builds a serializable report, formats it according
//! to the requested output format and prints it. The report builders are
//! public so they can be tested without capturing stdout.

pub mod cat;
pub mod common;
pub mod completions;
pub mod ls;
pub mod pack;
pub mod stat;
pub mod tree;
