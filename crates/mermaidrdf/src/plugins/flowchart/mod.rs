//! Flowchart plugin
//!
//! Translates Mermaid flowcharts into D3FEND triples and renders triple
//! graphs back into flowcharts.

mod chumsky_parser;
mod classifier;
mod containment;
mod parser;
mod renderer;
mod resolver;
mod tokenizer;

pub use chumsky_parser::*;
pub use classifier::*;
pub use containment::*;
pub use parser::*;
pub use renderer::*;
pub use resolver::*;
pub use tokenizer::*;
