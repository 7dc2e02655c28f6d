// Cross-file dependency resolution
//
// Builds a multi-key symbol table (several import spellings per file) and
// converts each file's raw import tokens into intra-repository edges.
// Unresolved tokens are external libraries or naming we cannot match; they
// are reported, logged at debug level and otherwise dropped, so the edge
// set under-approximates the true dependency graph by design.

use crate::classify::ModuleFamily;
use crate::model::{DependencyEdge, StructuralFacts};
use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Outcome of resolving all imports in a facts map
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// Deduplicated edges, in discovery order (files in path order,
    /// imports in extraction order)
    pub edges: Vec<DependencyEdge>,
    /// Import tokens that matched no file in the snapshot, per file.
    /// Files with no unresolved imports are absent.
    pub unresolved: BTreeMap<String, Vec<String>>,
}

/// Symbol table mapping plausible import spellings to file paths
///
/// Built once per analysis run and discarded afterward. One file is
/// reachable under several keys; the first file registered under a key
/// keeps it, which makes resolution independent of traversal order over
/// an ordered facts map.
struct SymbolTable {
    entries: HashMap<String, String>,
}

impl SymbolTable {
    fn build(facts: &BTreeMap<String, StructuralFacts>) -> Self {
        let mut entries: HashMap<String, String> = HashMap::new();
        let mut register = |key: String, path: &str| {
            entries.entry(key).or_insert_with(|| path.to_string());
        };

        for (path, file_facts) in facts {
            match file_facts.language.module_family() {
                ModuleFamily::Dotted => {
                    // Register every dotted suffix so both fully- and
                    // partially-qualified imports find the file:
                    // a/b/c.py -> a.b.c, b.c, c
                    let dotted = strip_extension(path).replace('/', ".");
                    let parts: Vec<&str> = dotted.split('.').collect();
                    for i in 0..parts.len() {
                        let key = parts[i..].join(".");
                        if !key.is_empty() {
                            register(key, path);
                        }
                    }
                }
                ModuleFamily::PathBased => {
                    // Register the bare path and the explicit
                    // current-directory spelling: a/b.js -> a/b, ./a/b
                    let stem = strip_extension(path);
                    register(stem.to_string(), path);
                    register(format!("./{stem}"), path);
                }
                ModuleFamily::None => {}
            }
        }

        Self { entries }
    }

    fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }
}

/// Resolve all imports in the facts map to dependency edges.
///
/// Guarantees: no self-edges, one edge per (source, target) pair, and both
/// endpoints of every edge are keys of `facts`.
pub fn resolve(facts: &BTreeMap<String, StructuralFacts>) -> ResolutionReport {
    let table = SymbolTable::build(facts);

    let mut edges = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut unresolved: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (path, file_facts) in facts {
        for token in &file_facts.imports {
            match table.lookup(token) {
                Some(target) if target != path => {
                    let key = (path.clone(), target.to_string());
                    if seen.insert(key) {
                        edges.push(DependencyEdge::new(path.clone(), target));
                    }
                }
                Some(_) => {} // self-import, ignored
                None => {
                    debug!("unresolved import {token:?} in {path}");
                    unresolved.entry(path.clone()).or_default().push(token.clone());
                }
            }
        }
    }

    ResolutionReport { edges, unresolved }
}

/// Drop the extension from the last path segment
fn strip_extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(dot) if !path[dot..].contains('/') => &path[..dot],
        _ => path,
    }
}
