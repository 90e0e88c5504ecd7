//! Symbol-expansion engine
//!
//! This module provides the core of script-stencil: a registry mapping
//! symbol names to text generators, and a single-pass scanner that
//! rewrites `#SYMBOL#` tokens in a template stream.
//!
//! # Example
//!
//! ```text
//! // Template
//! // Created by #AUTHOR# on #DATE#
//! pub struct #SCRIPTNAME#;
//!
//! // Expansion (with the built-in handlers registered)
//! // Created by dana on 2026-08-25
//! pub struct NewWidget;
//! ```

mod registry;
mod scanner;

pub use registry::{SymbolHandler, SymbolRegistry};
pub use scanner::{expand, expand_to_string};
