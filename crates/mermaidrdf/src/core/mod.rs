//! Core abstractions for diagram/graph translation
//!
//! The triple model and its store trait, the parser and renderer traits every
//! diagram plugin implements, and the shared types, vocabulary and errors.

pub mod chumsky_utils;
mod error;
mod graph;
pub mod logging;
mod parser;
mod renderer;
mod text;
mod types;
pub mod vocab;

pub use error::*;
pub use graph::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use text::*;
pub use types::*;
