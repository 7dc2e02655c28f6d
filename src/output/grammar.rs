// Output grammars for rendered diagrams
//
// Two emitters serialize the same grammar-independent DiagramGraph, so both
// grammars always express identical node and edge sets; only syntax
// differs.

use crate::error::Error;
use crate::output::diagrams::{DiagramGraph, DiagramKind, EdgeStyle};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Diagram output grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    /// Labeled directed-graph markup (Mermaid)
    #[default]
    Mermaid,
    /// Node/attribute graph-description language (Graphviz DOT)
    Graphviz,
}

impl Grammar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grammar::Mermaid => "mermaid",
            Grammar::Graphviz => "graphviz",
        }
    }
}

impl FromStr for Grammar {
    type Err = Error;

    /// An unrecognized name is a configuration error, never a silent fallback
    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "mermaid" => Ok(Grammar::Mermaid),
            "graphviz" | "dot" => Ok(Grammar::Graphviz),
            other => Err(Error::UnsupportedGrammar(other.to_string())),
        }
    }
}

/// Mermaid layout direction per diagram kind
fn mermaid_direction(kind: DiagramKind) -> &'static str {
    match kind {
        DiagramKind::Dependency => "LR",
        _ => "TD",
    }
}

/// DOT rankdir per diagram kind; inheritance points upward
fn dot_direction(kind: DiagramKind) -> &'static str {
    match kind {
        DiagramKind::Dependency => "LR",
        DiagramKind::Class => "BT",
        _ => "TB",
    }
}

/// Whether a kind renders record-style nodes (class diagram syntax in
/// Mermaid, record shapes in DOT)
fn is_record_kind(kind: DiagramKind) -> bool {
    matches!(kind, DiagramKind::Class | DiagramKind::Api)
}

pub fn emit(grammar: Grammar, graph: &DiagramGraph) -> String {
    match grammar {
        Grammar::Mermaid => emit_mermaid(graph),
        Grammar::Graphviz => emit_graphviz(graph),
    }
}

fn emit_mermaid(graph: &DiagramGraph) -> String {
    let mut lines = Vec::new();

    if graph.empty || !is_record_kind(graph.kind) {
        lines.push(format!("graph {}", mermaid_direction(graph.kind)));
        for node in &graph.nodes {
            lines.push(format!("    {}[\"{}\"]", node.id, node.label));
        }
        for edge in &graph.edges {
            lines.push(format!("    {} --> {}", edge.from, edge.to));
        }
    } else {
        lines.push("classDiagram".to_string());
        for edge in &graph.edges {
            match edge.style {
                EdgeStyle::Inherits => lines.push(format!("    {} <|-- {}", edge.to, edge.from)),
                EdgeStyle::Arrow => lines.push(format!("    {} --> {}", edge.from, edge.to)),
            }
        }
        for node in &graph.nodes {
            lines.push(format!("    class {} {{", node.id));
            for member in &node.members {
                lines.push(format!("        +{member}"));
            }
            lines.push("    }".to_string());
        }
    }

    lines.join("\n")
}

fn emit_graphviz(graph: &DiagramGraph) -> String {
    let mut lines = Vec::new();
    lines.push("digraph G {".to_string());
    lines.push(format!("    rankdir={};", dot_direction(graph.kind)));

    let shape = if !graph.empty && is_record_kind(graph.kind) {
        "record"
    } else {
        "box"
    };
    lines.push(format!(
        "    node [shape={shape}, style=filled, fillcolor=lightblue];"
    ));

    for node in &graph.nodes {
        if node.members.is_empty() {
            lines.push(format!("    {} [label=\"{}\"];", node.id, node.label));
        } else {
            let members = node
                .members
                .iter()
                .map(|m| format!("+ {m}\\l"))
                .collect::<String>();
            lines.push(format!(
                "    {} [label=\"{{{}|{}}}\"];",
                node.id, node.label, members
            ));
        }
    }

    for edge in &graph.edges {
        match edge.style {
            EdgeStyle::Inherits => lines.push(format!(
                "    {} -> {} [arrowhead=empty];",
                edge.from, edge.to
            )),
            EdgeStyle::Arrow => lines.push(format!("    {} -> {};", edge.from, edge.to)),
        }
    }

    lines.push("}".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::diagrams::{DiagramEdge, DiagramNode};

    fn flow_graph() -> DiagramGraph {
        DiagramGraph {
            kind: DiagramKind::Architecture,
            nodes: vec![
                DiagramNode::new("a", "pkg_a (2 files)"),
                DiagramNode::new("b", "pkg_b (1 files)"),
            ],
            edges: vec![DiagramEdge::arrow("a", "b")],
            empty: false,
        }
    }

    #[test]
    fn test_grammar_from_str() {
        assert_eq!(Grammar::from_str("mermaid").unwrap(), Grammar::Mermaid);
        assert_eq!(Grammar::from_str("Graphviz").unwrap(), Grammar::Graphviz);
        assert_eq!(Grammar::from_str("dot").unwrap(), Grammar::Graphviz);
    }

    #[test]
    fn test_grammar_from_str_rejects_unknown() {
        let err = Grammar::from_str("plantuml").unwrap_err();
        assert!(err.to_string().contains("plantuml"));
    }

    #[test]
    fn test_mermaid_flow_graph() {
        let text = emit_mermaid(&flow_graph());
        assert!(text.starts_with("graph TD"));
        assert!(text.contains("a[\"pkg_a (2 files)\"]"));
        assert!(text.contains("a --> b"));
    }

    #[test]
    fn test_graphviz_flow_graph() {
        let text = emit_graphviz(&flow_graph());
        assert!(text.starts_with("digraph G {"));
        assert!(text.ends_with('}'));
        assert!(text.contains("rankdir=TB;"));
        assert!(text.contains("a [label=\"pkg_a (2 files)\"];"));
        assert!(text.contains("a -> b;"));
    }

    #[test]
    fn test_mermaid_class_graph_inheritance_direction() {
        let graph = DiagramGraph {
            kind: DiagramKind::Class,
            nodes: vec![DiagramNode::new("Base", "Base"), DiagramNode::new("Child", "Child")],
            edges: vec![DiagramEdge::inherits("Child", "Base")],
            empty: false,
        };
        let text = emit_mermaid(&graph);
        assert!(text.starts_with("classDiagram"));
        assert!(text.contains("Base <|-- Child"));
    }

    #[test]
    fn test_graphviz_record_members() {
        let mut node = DiagramNode::new("api", "api.py");
        node.members.push("GET /users".to_string());
        let graph = DiagramGraph {
            kind: DiagramKind::Api,
            nodes: vec![node],
            edges: Vec::new(),
            empty: false,
        };
        let text = emit_graphviz(&graph);
        assert!(text.contains("shape=record"));
        assert!(text.contains("{api.py|+ GET /users\\l}"));
    }

    #[test]
    fn test_empty_graph_renders_placeholder_in_both_grammars() {
        let graph = DiagramGraph {
            kind: DiagramKind::Api,
            nodes: vec![DiagramNode::new("empty", "No API endpoints detected")],
            edges: Vec::new(),
            empty: true,
        };
        let mermaid = emit_mermaid(&graph);
        assert!(mermaid.contains("No API endpoints detected"));
        let dot = emit_graphviz(&graph);
        assert!(dot.contains("No API endpoints detected"));
    }
}
