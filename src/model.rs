// Data model for repository analysis
//
// These types represent the structural summary extracted from a repository
// snapshot. They are designed to be serializable for caching, JSON output
// and debugging. A new analysis run always builds a fresh set of values;
// nothing here is mutated in place after construction.

use crate::classify::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw content of a single file in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileContent {
    /// Decoded text content
    Text(String),
    /// Binary or undecodable content; carries no text
    Binary,
}

impl FileContent {
    /// Get the text content, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Text(s) => Some(s.as_str()),
            FileContent::Binary => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, FileContent::Binary)
    }
}

/// A single file in a repository snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Raw content, or the binary marker
    pub content: FileContent,
    /// Size on disk in bytes
    pub size_bytes: u64,
}

impl SourceFile {
    /// Create a text file entry
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        let size_bytes = content.len() as u64;
        Self {
            content: FileContent::Text(content),
            size_bytes,
        }
    }

    /// Create a binary file entry
    pub fn binary(size_bytes: u64) -> Self {
        Self {
            content: FileContent::Binary,
            size_bytes,
        }
    }
}

/// An immutable repository snapshot: path -> file content
///
/// Paths use `/` as separator regardless of platform so that analysis
/// output is identical across hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub files: BTreeMap<String, SourceFile>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file into the snapshot
    pub fn insert(&mut self, path: impl Into<String>, file: SourceFile) {
        self.files.insert(path.into(), file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Restrict the snapshot to an allow-list of paths
    pub fn restrict_to(&self, selected: &[String]) -> Snapshot {
        let files = self
            .files
            .iter()
            .filter(|(path, _)| selected.iter().any(|s| s == *path))
            .map(|(path, file)| (path.clone(), file.clone()))
            .collect();
        Snapshot { files }
    }
}

/// Classification of a file by its role in the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Source,
    Doc,
    Config,
    Frontend,
    Test,
}

impl FileKind {
    /// Stable lowercase name used in statistics keys
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Source => "source",
            FileKind::Doc => "doc",
            FileKind::Config => "config",
            FileKind::Frontend => "frontend",
            FileKind::Test => "test",
        }
    }
}

/// A type definition with its declared parents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Type name as written
    pub name: String,
    /// Parent types as written, in declaration order (not resolved)
    pub parents: Vec<String>,
}

impl TypeDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parents: Vec::new(),
        }
    }

    pub fn with_parents(name: &str, parents: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            parents,
        }
    }
}

/// A callable (function, method, arrow function) definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callable {
    /// Callable name as written
    pub name: String,
}

impl Callable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// The web-routing idiom an endpoint declaration matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingStyle {
    /// Python decorator style: `@app.route(...)`
    Flask,
    /// JS/TS method style: `app.get(...)` / `router.post(...)`
    Express,
}

impl RoutingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingStyle::Flask => "Flask",
            RoutingStyle::Express => "Express",
        }
    }
}

/// A route-style API endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Route path as written
    pub path: String,
    /// HTTP methods; defaults to `["GET"]` when the declaration lists none
    pub methods: Vec<String>,
    /// Which routing idiom matched
    pub style: RoutingStyle,
}

impl Endpoint {
    pub fn new(path: &str, methods: Vec<String>, style: RoutingStyle) -> Self {
        let methods = if methods.is_empty() {
            vec!["GET".to_string()]
        } else {
            methods
        };
        Self {
            path: path.to_string(),
            methods,
            style,
        }
    }
}

/// Heuristically-extracted structural summary of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralFacts {
    /// Classified language
    pub language: Language,
    /// Raw import tokens in extraction order; duplicates preserved
    pub imports: Vec<String>,
    /// Type definitions in source order
    pub types: Vec<TypeDef>,
    /// Callable definitions in source order
    pub callables: Vec<Callable>,
    /// Recognized API endpoints in source order
    pub endpoints: Vec<Endpoint>,
    /// Line count of the raw text (0 for binary)
    pub loc: usize,
    /// Role of the file in the repository
    pub kind: FileKind,
    /// True when the file was binary or unclassifiable and was not scanned
    pub skipped: bool,
}

impl StructuralFacts {
    /// Minimal facts for a file that was not scanned
    pub fn skipped(language: Language, kind: FileKind) -> Self {
        Self {
            language,
            imports: Vec::new(),
            types: Vec::new(),
            callables: Vec::new(),
            endpoints: Vec::new(),
            loc: 0,
            kind,
            skipped: true,
        }
    }

    /// Check if anything structural was found
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
            && self.types.is_empty()
            && self.callables.is_empty()
            && self.endpoints.is_empty()
    }
}

/// A resolved intra-repository dependency
///
/// Invariants: `source != target`, both paths exist in the facts map of the
/// analysis that owns the edge, and each (source, target) pair appears once.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Aggregate repository statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_files: usize,
    /// Language display name -> file count
    pub languages: BTreeMap<String, usize>,
    /// File kind name -> file count
    pub file_kinds: BTreeMap<String, usize>,
    pub total_loc: usize,
    pub total_size_bytes: u64,
}

/// The full result of analyzing a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    /// Per-file structural facts, keyed by path
    pub facts: BTreeMap<String, StructuralFacts>,
    /// Resolved intra-repository dependencies
    pub edges: Vec<DependencyEdge>,
    /// Aggregate statistics
    pub statistics: Statistics,
    /// Import tokens that matched no file in the snapshot, per file.
    /// Kept for observability; never treated as a failure.
    pub unresolved_imports: BTreeMap<String, Vec<String>>,
}
