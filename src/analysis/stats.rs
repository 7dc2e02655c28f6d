// Aggregate statistics over per-file facts

use crate::model::{FileKind, Snapshot, Statistics, StructuralFacts};
use std::collections::BTreeMap;

const DOC_EXTENSIONS: &[&str] = &[".md", ".txt", ".rst"];
const CONFIG_EXTENSIONS: &[&str] = &[".json", ".yaml", ".yml", ".xml", ".toml", ".ini"];
const FRONTEND_EXTENSIONS: &[&str] = &[".html", ".css", ".scss", ".less"];

/// Classify a file's role from its path. Precedence: doc, config, frontend,
/// test, then source; first match wins.
pub fn file_kind(path: &str) -> FileKind {
    let lower = path.to_ascii_lowercase();

    if DOC_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return FileKind::Doc;
    }
    if CONFIG_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return FileKind::Config;
    }
    if FRONTEND_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return FileKind::Frontend;
    }
    if lower.contains("test") || lower.ends_with("spec.js") || lower.ends_with("spec.ts") {
        return FileKind::Test;
    }
    FileKind::Source
}

/// Fold per-file facts into repository-wide tallies
pub fn aggregate(facts: &BTreeMap<String, StructuralFacts>, snapshot: &Snapshot) -> Statistics {
    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    let mut file_kinds: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_loc = 0;

    for file_facts in facts.values() {
        *languages
            .entry(file_facts.language.as_str().to_string())
            .or_insert(0) += 1;
        *file_kinds
            .entry(file_facts.kind.as_str().to_string())
            .or_insert(0) += 1;
        total_loc += file_facts.loc;
    }

    let total_size_bytes = snapshot.files.values().map(|f| f.size_bytes).sum();

    Statistics {
        total_files: facts.len(),
        languages,
        file_kinds,
        total_loc,
        total_size_bytes,
    }
}
