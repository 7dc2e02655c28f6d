// Diagram generation from repository analysis
//
// Each diagram kind is first projected into a grammar-independent
// DiagramGraph, then serialized by one of the two emitters in
// `output::grammar`. Projection applies a deterministic element cap with
// documented tie-breaks, so identical analyses always render identical
// diagrams. Rendering never fails: an empty projection yields an
// explicitly-labeled placeholder diagram.

use crate::error::{Error, Result};
use crate::model::RepositoryAnalysis;
use crate::output::grammar::{emit, Grammar};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// The four diagram kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Architecture,
    Class,
    Dependency,
    Api,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 4] = [
        DiagramKind::Architecture,
        DiagramKind::Class,
        DiagramKind::Dependency,
        DiagramKind::Api,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Architecture => "architecture",
            DiagramKind::Class => "class",
            DiagramKind::Dependency => "dependency",
            DiagramKind::Api => "api",
        }
    }
}

/// A node in a projected diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    /// Identifier safe for both grammars
    pub id: String,
    pub label: String,
    /// Record-style member lines (class and api diagrams)
    pub members: Vec<String>,
}

impl DiagramNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            members: Vec::new(),
        }
    }
}

/// Arrow style of a diagram edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Arrow,
    Inherits,
}

/// A directed edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    pub style: EdgeStyle,
}

impl DiagramEdge {
    pub fn arrow(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            style: EdgeStyle::Arrow,
        }
    }

    pub fn inherits(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            style: EdgeStyle::Inherits,
        }
    }
}

/// Grammar-independent projection of one diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramGraph {
    pub kind: DiagramKind,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    /// True when the analysis had nothing to show for this kind and the
    /// single node is an explanatory placeholder
    pub empty: bool,
}

impl DiagramGraph {
    fn placeholder(kind: DiagramKind, label: &str) -> Self {
        Self {
            kind,
            nodes: vec![DiagramNode::new("empty", label)],
            edges: Vec::new(),
            empty: true,
        }
    }
}

/// Rendered diagrams by kind name
pub type DiagramSet = BTreeMap<String, String>;

/// Renders diagrams from a repository analysis
#[derive(Debug)]
pub struct DiagramRenderer {
    grammar: Grammar,
    max_elements: usize,
}

impl DiagramRenderer {
    pub const DEFAULT_MAX_ELEMENTS: usize = 100;

    /// Create a renderer. Fails fast on a non-positive element cap.
    pub fn new(grammar: Grammar, max_elements: usize) -> Result<Self> {
        if max_elements == 0 {
            return Err(Error::config_validation("max_elements must be at least 1"));
        }
        Ok(Self {
            grammar,
            max_elements,
        })
    }

    /// Parse the grammar name and create a renderer; an unknown name is a
    /// configuration error.
    pub fn from_name(grammar: &str, max_elements: usize) -> Result<Self> {
        Self::new(grammar.parse()?, max_elements)
    }

    /// Render one diagram kind
    pub fn render(&self, kind: DiagramKind, analysis: &RepositoryAnalysis) -> String {
        emit(self.grammar, &self.build_graph(kind, analysis))
    }

    /// Render all four kinds
    pub fn render_all(&self, analysis: &RepositoryAnalysis) -> DiagramSet {
        DiagramKind::ALL
            .iter()
            .map(|&kind| (kind.as_str().to_string(), self.render(kind, analysis)))
            .collect()
    }

    /// Project one diagram kind into its grammar-independent graph.
    /// Exposed so callers can assert structural equivalence across grammars.
    pub fn build_graph(&self, kind: DiagramKind, analysis: &RepositoryAnalysis) -> DiagramGraph {
        match kind {
            DiagramKind::Architecture => self.build_architecture(analysis),
            DiagramKind::Class => self.build_class(analysis),
            DiagramKind::Dependency => self.build_dependency(analysis),
            DiagramKind::Api => self.build_api(analysis),
        }
    }

    /// Files grouped by directory; modules with the most files survive the
    /// cap, ties broken by directory name ascending.
    fn build_architecture(&self, analysis: &RepositoryAnalysis) -> DiagramGraph {
        let mut modules: BTreeMap<&str, usize> = BTreeMap::new();
        for path in analysis.facts.keys() {
            *modules.entry(directory_of(path)).or_insert(0) += 1;
        }

        if modules.is_empty() {
            return DiagramGraph::placeholder(DiagramKind::Architecture, "No modules detected");
        }

        let kept: BTreeMap<&str, usize> = if modules.len() > self.max_elements {
            let mut ranked: Vec<(&str, usize)> = modules.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
            ranked.truncate(self.max_elements);
            ranked.into_iter().collect()
        } else {
            modules
        };

        let nodes = kept
            .iter()
            .map(|(dir, count)| {
                DiagramNode::new(sanitize_id(dir), format!("{dir} ({count} files)"))
            })
            .collect();

        // Project file edges onto directories; drop self-loops and edges
        // touching dropped modules, then deduplicate.
        let mut module_edges: BTreeSet<(&str, &str)> = BTreeSet::new();
        for edge in &analysis.edges {
            let from = directory_of(&edge.source);
            let to = directory_of(&edge.target);
            if from != to && kept.contains_key(from) && kept.contains_key(to) {
                module_edges.insert((from, to));
            }
        }
        let edges = module_edges
            .into_iter()
            .map(|(from, to)| DiagramEdge::arrow(sanitize_id(from), sanitize_id(to)))
            .collect();

        DiagramGraph {
            kind: DiagramKind::Architecture,
            nodes,
            edges,
            empty: false,
        }
    }

    /// Types in stable encounter order, truncated at the cap; inheritance
    /// edges only between kept types.
    fn build_class(&self, analysis: &RepositoryAnalysis) -> DiagramGraph {
        // First definition of a name wins; re-definitions are skipped
        let mut order: Vec<(&str, &str)> = Vec::new(); // (name, defining file)
        let mut parents: HashMap<&str, &[String]> = HashMap::new();
        for (path, facts) in &analysis.facts {
            for ty in &facts.types {
                if !parents.contains_key(ty.name.as_str()) {
                    order.push((ty.name.as_str(), path.as_str()));
                    parents.insert(ty.name.as_str(), ty.parents.as_slice());
                }
            }
        }

        if order.is_empty() {
            return DiagramGraph::placeholder(DiagramKind::Class, "No types detected");
        }

        order.truncate(self.max_elements);
        let kept: HashSet<&str> = order.iter().map(|(name, _)| *name).collect();

        let nodes = order
            .iter()
            .map(|(name, path)| {
                let mut node = DiagramNode::new(sanitize_id(name), *name);
                node.members.push(basename_of(path).to_string());
                node
            })
            .collect();

        let mut edges = Vec::new();
        for (name, _) in &order {
            for parent in parents[name] {
                if kept.contains(parent.as_str()) {
                    edges.push(DiagramEdge::inherits(sanitize_id(name), sanitize_id(parent)));
                }
            }
        }

        DiagramGraph {
            kind: DiagramKind::Class,
            nodes,
            edges,
            empty: false,
        }
    }

    /// File-level dependency graph. When the edge count exceeds the cap,
    /// source files are ranked by outgoing-edge count descending (ties by
    /// path ascending) and only the top `max_elements` sources keep their
    /// edges.
    fn build_dependency(&self, analysis: &RepositoryAnalysis) -> DiagramGraph {
        let edges: Vec<_> = if analysis.edges.len() > self.max_elements {
            let mut outdegree: BTreeMap<&str, usize> = BTreeMap::new();
            for edge in &analysis.edges {
                *outdegree.entry(edge.source.as_str()).or_insert(0) += 1;
            }
            let mut ranked: Vec<(&str, usize)> = outdegree.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
            ranked.truncate(self.max_elements);
            let kept: HashSet<&str> = ranked.into_iter().map(|(path, _)| path).collect();

            analysis
                .edges
                .iter()
                .filter(|e| kept.contains(e.source.as_str()))
                .collect()
        } else {
            analysis.edges.iter().collect()
        };

        if edges.is_empty() {
            return DiagramGraph::placeholder(DiagramKind::Dependency, "No dependencies detected");
        }

        // Nodes in first-encounter order over the kept edges
        let mut seen: HashSet<&str> = HashSet::new();
        let mut nodes = Vec::new();
        for edge in &edges {
            for path in [edge.source.as_str(), edge.target.as_str()] {
                if seen.insert(path) {
                    nodes.push(DiagramNode::new(sanitize_id(path), basename_of(path)));
                }
            }
        }

        let edges = edges
            .into_iter()
            .map(|e| DiagramEdge::arrow(sanitize_id(&e.source), sanitize_id(&e.target)))
            .collect();

        DiagramGraph {
            kind: DiagramKind::Dependency,
            nodes,
            edges,
            empty: false,
        }
    }

    /// Endpoints in stable encounter order, truncated at the cap, grouped
    /// per file into record-style nodes.
    fn build_api(&self, analysis: &RepositoryAnalysis) -> DiagramGraph {
        let mut endpoints: Vec<(&str, String)> = Vec::new();
        for (path, facts) in &analysis.facts {
            for endpoint in &facts.endpoints {
                endpoints.push((
                    path.as_str(),
                    format!("{} {}", endpoint.methods.join(", "), endpoint.path),
                ));
            }
        }

        if endpoints.is_empty() {
            return DiagramGraph::placeholder(DiagramKind::Api, "No API endpoints detected");
        }

        endpoints.truncate(self.max_elements);

        // Group by file, preserving first-encounter file order
        let mut nodes: Vec<DiagramNode> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (path, member) in endpoints {
            let i = *index.entry(path).or_insert_with(|| {
                let mut node = DiagramNode::new(sanitize_id(path), basename_of(path));
                node.members.push(basename_of(path).to_string());
                nodes.push(node);
                nodes.len() - 1
            });
            nodes[i].members.push(member);
        }

        DiagramGraph {
            kind: DiagramKind::Api,
            nodes,
            edges: Vec::new(),
            empty: false,
        }
    }
}

/// Directory component of a path, or "root" for top-level files
fn directory_of(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir,
        None => "root",
    }
}

/// Final path segment
fn basename_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Sanitize a string for use as a node identifier in either grammar
fn sanitize_id(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
