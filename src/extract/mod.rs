// Structural extraction from raw file content
//
// Applies the per-language recognizer tables to produce StructuralFacts.
// Extraction never fails: binary or unclassifiable files come back with the
// skipped marker, and syntax the recognizers do not understand simply
// contributes nothing.

mod rules;

pub use rules::{rules_for, EndpointShape, EndpointRule, RuleSet};

use crate::classify::Language;
use crate::model::{Callable, Endpoint, FileContent, FileKind, StructuralFacts, TypeDef};

/// Extract structural facts from one file's content.
///
/// `kind` is decided by the caller from the file path (see
/// `analysis::stats::file_kind`); it is carried through unchanged.
pub fn extract(content: &FileContent, language: Language, kind: FileKind) -> StructuralFacts {
    let text = match content.as_text() {
        Some(text) if language != Language::Unknown => text,
        _ => return StructuralFacts::skipped(language, kind),
    };

    let (imports, types, callables, endpoints) = match rules_for(language) {
        Some(rules) => (
            extract_imports(text, rules),
            extract_types(text, rules),
            extract_callables(text, rules),
            extract_endpoints(text, rules),
        ),
        // Known language without a recognizer table: counted, not scanned
        None => (Vec::new(), Vec::new(), Vec::new(), Vec::new()),
    };

    StructuralFacts {
        language,
        imports,
        types,
        callables,
        endpoints,
        loc: text.split('\n').count(),
        kind,
        skipped: false,
    }
}

/// One token per match, recognizer-major: all matches of the first
/// recognizer, then all matches of the second, each in source order.
fn extract_imports(text: &str, rules: &RuleSet) -> Vec<String> {
    let mut imports = Vec::new();
    for pattern in &rules.imports {
        for caps in pattern.captures_iter(text) {
            if let Some(token) = caps.get(1) {
                imports.push(token.as_str().trim().to_string());
            }
        }
    }
    imports
}

/// Group 1 names the type; optional group 2 is a comma-separated parent list.
fn extract_types(text: &str, rules: &RuleSet) -> Vec<TypeDef> {
    let mut types = Vec::new();
    for pattern in &rules.types {
        for caps in pattern.captures_iter(text) {
            let Some(name) = caps.get(1) else { continue };
            let parents = caps
                .get(2)
                .map(|group| {
                    group
                        .as_str()
                        .split(',')
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            types.push(TypeDef {
                name: name.as_str().to_string(),
                parents,
            });
        }
    }
    types
}

/// Callable recognizers are alternatives: the first non-empty capture group,
/// left to right, names the callable. Matches with no non-empty group are
/// discarded silently.
fn extract_callables(text: &str, rules: &RuleSet) -> Vec<Callable> {
    let mut callables = Vec::new();
    for pattern in &rules.callables {
        for caps in pattern.captures_iter(text) {
            let name = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .find(|s| !s.is_empty());
            if let Some(name) = name {
                callables.push(Callable::new(name));
            }
        }
    }
    callables
}

fn extract_endpoints(text: &str, rules: &RuleSet) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    for rule in &rules.endpoints {
        for caps in rule.pattern.captures_iter(text) {
            let endpoint = match rule.shape {
                EndpointShape::PathThenMethods => {
                    let Some(path) = caps.get(1) else { continue };
                    let methods = caps
                        .get(2)
                        .map(|group| parse_method_list(group.as_str()))
                        .unwrap_or_default();
                    Endpoint::new(path.as_str(), methods, rule.style)
                }
                EndpointShape::MethodThenPath => {
                    let (Some(method), Some(path)) = (caps.get(1), caps.get(2)) else {
                        continue;
                    };
                    Endpoint::new(
                        path.as_str(),
                        vec![method.as_str().to_ascii_uppercase()],
                        rule.style,
                    )
                }
            };
            endpoints.push(endpoint);
        }
    }
    endpoints
}

/// Parse `"GET", 'POST'` style method lists from a captured group
fn parse_method_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|m| m.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RoutingStyle;

    fn text(content: &str) -> FileContent {
        FileContent::Text(content.to_string())
    }

    #[test]
    fn test_binary_content_is_skipped() {
        let facts = extract(&FileContent::Binary, Language::Python, FileKind::Source);
        assert!(facts.skipped);
        assert!(facts.is_empty());
        assert_eq!(facts.loc, 0);
    }

    #[test]
    fn test_unknown_language_is_skipped() {
        let facts = extract(&text("some text"), Language::Unknown, FileKind::Doc);
        assert!(facts.skipped);
        assert!(facts.is_empty());
        assert_eq!(facts.kind, FileKind::Doc);
    }

    #[test]
    fn test_known_language_without_rules_is_counted_not_scanned() {
        let facts = extract(&text("fn main() {}\n"), Language::Rust, FileKind::Source);
        assert!(!facts.skipped);
        assert!(facts.is_empty());
        assert_eq!(facts.loc, 2);
    }

    #[test]
    fn test_python_imports_in_order_with_duplicates() {
        let source = "import os\nimport sys\nimport os\nfrom app.utils import helper\n";
        let facts = extract(&text(source), Language::Python, FileKind::Source);
        // Recognizer-major order: plain imports first, then from-imports
        assert_eq!(facts.imports, vec!["os", "sys", "os", "app.utils"]);
    }

    #[test]
    fn test_python_class_with_parents() {
        let source = "class X(Y): pass\nclass Plain:\n    pass\nclass Multi(A, B):\n    pass\n";
        let facts = extract(&text(source), Language::Python, FileKind::Source);
        assert_eq!(facts.types.len(), 3);
        assert_eq!(facts.types[0], TypeDef::with_parents("X", vec!["Y".into()]));
        assert_eq!(facts.types[1], TypeDef::new("Plain"));
        assert_eq!(
            facts.types[2],
            TypeDef::with_parents("Multi", vec!["A".into(), "B".into()])
        );
    }

    #[test]
    fn test_python_callables() {
        let source = "def f():\n    pass\n\nasync def fetch(url):\n    pass\n";
        let facts = extract(&text(source), Language::Python, FileKind::Source);
        let names: Vec<&str> = facts.callables.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["f", "fetch"]);
    }

    #[test]
    fn test_javascript_callable_alternatives_first_nonempty_group_wins() {
        let source = "function named() {}\nconst arrow = async (a, b) => a + b;\n";
        let facts = extract(&text(source), Language::JavaScript, FileKind::Source);
        let names: Vec<&str> = facts.callables.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["named", "arrow"]);
    }

    #[test]
    fn test_javascript_class_extends() {
        let source = "class Widget extends Base {}\n";
        let facts = extract(&text(source), Language::JavaScript, FileKind::Source);
        assert_eq!(
            facts.types,
            vec![TypeDef::with_parents("Widget", vec!["Base".into()])]
        );
    }

    #[test]
    fn test_flask_endpoint_default_method() {
        let source = "@app.route(\"/health\")\ndef health():\n    pass\n";
        let facts = extract(&text(source), Language::Python, FileKind::Source);
        assert_eq!(facts.endpoints.len(), 1);
        assert_eq!(facts.endpoints[0].path, "/health");
        assert_eq!(facts.endpoints[0].methods, vec!["GET"]);
        assert_eq!(facts.endpoints[0].style, RoutingStyle::Flask);
    }

    #[test]
    fn test_flask_endpoint_explicit_methods() {
        let source = "@bp.route('/users', methods=['GET', 'POST'])\ndef users():\n    pass\n";
        let facts = extract(&text(source), Language::Python, FileKind::Source);
        assert_eq!(facts.endpoints[0].methods, vec!["GET", "POST"]);
    }

    #[test]
    fn test_express_endpoint_method_uppercased() {
        let source = "app.post(\"/login\", (req, res) => {});\n";
        let facts = extract(&text(source), Language::JavaScript, FileKind::Source);
        assert_eq!(facts.endpoints.len(), 1);
        assert_eq!(facts.endpoints[0].path, "/login");
        assert_eq!(facts.endpoints[0].methods, vec!["POST"]);
        assert_eq!(facts.endpoints[0].style, RoutingStyle::Express);
    }

    #[test]
    fn test_malformed_syntax_never_errors() {
        let source = "class (((\ndef \nimport \n@app.route(\n";
        let facts = extract(&text(source), Language::Python, FileKind::Source);
        assert!(!facts.skipped);
        assert!(facts.types.is_empty());
        assert!(facts.callables.is_empty());
        assert!(facts.endpoints.is_empty());
    }

    #[test]
    fn test_spec_scenario_file_a() {
        let source = "import b\nclass X(Y): pass\ndef f(): pass";
        let facts = extract(&text(source), Language::Python, FileKind::Source);
        assert_eq!(facts.imports, vec!["b"]);
        assert_eq!(facts.types, vec![TypeDef::with_parents("X", vec!["Y".into()])]);
        assert_eq!(facts.callables, vec![Callable::new("f")]);
    }

    #[test]
    fn test_loc_counts_newline_segments() {
        let facts = extract(&text("a\nb\n"), Language::Python, FileKind::Source);
        assert_eq!(facts.loc, 3);
        let facts = extract(&text("a\nb"), Language::Python, FileKind::Source);
        assert_eq!(facts.loc, 2);
    }
}
