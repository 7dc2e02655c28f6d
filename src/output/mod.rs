// Diagram output: projection and the two emitter grammars

pub mod diagrams;
pub mod grammar;

pub use diagrams::{DiagramKind, DiagramRenderer, DiagramSet};
pub use grammar::Grammar;
