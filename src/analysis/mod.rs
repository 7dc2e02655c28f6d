// Analysis pipeline: classify, extract, resolve, aggregate
//
// The pipeline is a pure, single-pass computation over an immutable
// snapshot. Per-file extraction runs in parallel; results are merged back
// in path order before resolution and aggregation, so repeated runs over
// the same snapshot produce byte-identical output.

pub mod resolve;
pub mod stats;

pub use resolve::{resolve, ResolutionReport};
pub use stats::{aggregate, file_kind};

use crate::classify;
use crate::extract;
use crate::model::{RepositoryAnalysis, Snapshot, StructuralFacts};
use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Analyze a full snapshot
pub fn analyze(snapshot: &Snapshot) -> RepositoryAnalysis {
    analyze_selected(snapshot, None)
}

/// Analyze a snapshot, optionally restricted to an allow-list of paths
pub fn analyze_selected(snapshot: &Snapshot, selected: Option<&[String]>) -> RepositoryAnalysis {
    let restricted;
    let snapshot = match selected {
        Some(paths) => {
            restricted = snapshot.restrict_to(paths);
            &restricted
        }
        None => snapshot,
    };

    // Extraction is embarrassingly parallel; collecting into a BTreeMap
    // re-establishes path order at the merge point.
    let facts: BTreeMap<String, StructuralFacts> = snapshot
        .files
        .par_iter()
        .map(|(path, file)| {
            let text = file.content.as_text().unwrap_or("");
            let language = classify::classify(path, text);
            let kind = stats::file_kind(path);
            (path.clone(), extract::extract(&file.content, language, kind))
        })
        .collect();

    for (path, file_facts) in &facts {
        if file_facts.skipped {
            info!("skipped {path}: binary or unknown format");
        }
    }

    let report = resolve::resolve(&facts);
    let statistics = stats::aggregate(&facts, snapshot);

    info!(
        "analyzed {} files, {} edges, {} unresolved import(s)",
        facts.len(),
        report.edges.len(),
        report.unresolved.values().map(Vec::len).sum::<usize>()
    );

    RepositoryAnalysis {
        facts,
        edges: report.edges,
        statistics,
        unresolved_imports: report.unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyEdge, SourceFile, TypeDef};

    fn spec_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "a.py",
            SourceFile::text("import b\nclass X(Y): pass\ndef f(): pass"),
        );
        snapshot.insert("b.py", SourceFile::text("class Y: pass"));
        snapshot
    }

    #[test]
    fn test_analyze_spec_scenario() {
        let analysis = analyze(&spec_snapshot());

        let a = &analysis.facts["a.py"];
        assert_eq!(a.imports, vec!["b"]);
        assert_eq!(a.types, vec![TypeDef::with_parents("X", vec!["Y".into()])]);

        assert_eq!(analysis.edges, vec![DependencyEdge::new("a.py", "b.py")]);
        assert_eq!(analysis.statistics.total_files, 2);
        assert_eq!(analysis.statistics.languages.get("Python"), Some(&2));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let snapshot = spec_snapshot();
        let first = analyze(&snapshot);
        let second = analyze(&snapshot);
        assert_eq!(first, second);

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_analyze_unmatched_import_yields_no_edges() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("a.py", SourceFile::text("import nothing_known\n"));
        let analysis = analyze(&snapshot);
        assert!(analysis.edges.is_empty());
        assert_eq!(
            analysis.unresolved_imports.get("a.py"),
            Some(&vec!["nothing_known".to_string()])
        );
    }

    #[test]
    fn test_analyze_selected_restricts_paths() {
        let snapshot = spec_snapshot();
        let analysis = analyze_selected(&snapshot, Some(&["a.py".to_string()]));
        assert_eq!(analysis.statistics.total_files, 1);
        assert!(analysis.facts.contains_key("a.py"));
        // b.py is gone, so the import no longer resolves
        assert!(analysis.edges.is_empty());
    }

    #[test]
    fn test_analyze_binary_files_never_error() {
        let mut snapshot = Snapshot::new();
        snapshot.insert("logo.png", SourceFile::binary(4096));
        snapshot.insert("a.py", SourceFile::text("x = 1\n"));

        let analysis = analyze(&snapshot);
        assert!(analysis.facts["logo.png"].skipped);
        assert!(!analysis.facts["a.py"].skipped);
        assert_eq!(analysis.statistics.total_files, 2);
    }

    #[test]
    fn test_analyze_empty_snapshot() {
        let analysis = analyze(&Snapshot::new());
        assert!(analysis.facts.is_empty());
        assert!(analysis.edges.is_empty());
        assert_eq!(analysis.statistics.total_files, 0);
    }

    #[test]
    fn test_edge_paths_exist_in_facts() {
        let mut snapshot = spec_snapshot();
        snapshot.insert("c.py", SourceFile::text("import a\nimport b\nimport ghost\n"));
        let analysis = analyze(&snapshot);
        for edge in &analysis.edges {
            assert!(analysis.facts.contains_key(&edge.source));
            assert!(analysis.facts.contains_key(&edge.target));
        }
    }
}
