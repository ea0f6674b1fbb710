//! Markup parsing tests
//!
//! These tests verify that mapper files are parsed into typed statements
//! and directive nodes.

mod directives;
mod documents;
