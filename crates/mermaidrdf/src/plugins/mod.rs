//! Diagram plugins
//!
//! The flowchart plugin implements the core [`Parser`](crate::core::Parser)
//! and [`Renderer`](crate::core::Renderer) traits; the orchestrator wires it
//! into translate and render pipelines.

pub mod flowchart;
pub mod orchestrator;

pub use flowchart::*;
pub use orchestrator::*;
