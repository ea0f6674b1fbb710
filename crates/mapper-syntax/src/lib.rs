//! Markup layer of the mapper files.
//!
//! A mapper file is an XML document holding one or more SQL statements, each
//! identified by an `id` attribute. This crate turns that text into a typed
//! [`Document`] whose statement bodies are trees of [`Node`]s.

pub mod ast;
pub mod builder;
pub mod error;
mod reader;

pub use ast::{
    doc::{Document, InvalidDirective, Statement, UnsupportedTag},
    node::{Branch, Choose, Node},
    tag::TagKind,
};
pub use builder::parse;
pub use error::{MarkupError, Result};
