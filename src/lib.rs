//! Codemap - extract structure, dependencies and diagrams from codebases
//!
//! Analyzes a repository snapshot (paths + raw content) and produces
//! per-file structural facts, a cross-file dependency graph, aggregate
//! statistics and renderable diagrams in Mermaid or Graphviz syntax.

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod snapshot;

// Re-export main types
pub use analysis::{analyze, analyze_selected};
pub use classify::Language;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{RepositoryAnalysis, Snapshot, SourceFile, StructuralFacts};
pub use output::{DiagramKind, DiagramRenderer, DiagramSet, Grammar};
