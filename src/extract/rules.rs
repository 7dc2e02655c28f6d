// Per-language recognizer tables
//
// Each language gets a small ordered list of regex-based recognizers per
// construct. Recognition is best-effort: a pattern that fails to match
// contributes nothing, and unusual syntax is simply skipped. These tables
// are the single place to touch when adding a language; the resolver and
// renderer never look at them.

use crate::classify::Language;
use crate::model::RoutingStyle;
use once_cell::sync::Lazy;
use regex::Regex;

/// How an endpoint recognizer's capture groups are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointShape {
    /// Group 1 is the route path, group 2 an optional method list
    PathThenMethods,
    /// Group 1 is the HTTP method, group 2 the route path
    MethodThenPath,
}

/// A single endpoint recognizer
pub struct EndpointRule {
    pub pattern: Regex,
    pub style: RoutingStyle,
    pub shape: EndpointShape,
}

/// All recognizers for one language
pub struct RuleSet {
    /// Each match contributes one import token (first capture group)
    pub imports: Vec<Regex>,
    /// Group 1 is the type name, optional group 2 a comma-separated parent list
    pub types: Vec<Regex>,
    /// Alternative patterns; the first non-empty capture group names the callable
    pub callables: Vec<Regex>,
    pub endpoints: Vec<EndpointRule>,
}

fn re(pattern: &str) -> Regex {
    // Table patterns are fixed at compile time; a failure here is a bug in
    // the table itself, so panicking at first use is acceptable.
    Regex::new(pattern).expect("invalid recognizer pattern")
}

static PYTHON: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    imports: vec![
        re(r"(?m)^\s*import\s+([A-Za-z_][\w.]*)"),
        re(r"(?m)^\s*from\s+([A-Za-z_][\w.]*)\s+import\b"),
    ],
    types: vec![re(r"(?m)^\s*class\s+(\w+)\s*(?:\(([^)]*)\))?\s*:")],
    callables: vec![re(r"(?m)^\s*(?:async\s+)?def\s+(\w+)\s*\(")],
    endpoints: vec![EndpointRule {
        pattern: re(
            r#"@(?:\w+\.)?route\(\s*['"]([^'"]+)['"](?:\s*,\s*methods\s*=\s*\[([^\]]*)\])?"#,
        ),
        style: RoutingStyle::Flask,
        shape: EndpointShape::PathThenMethods,
    }],
});

static JAVASCRIPT: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    imports: vec![
        re(r#"import\s+[^'"]*?from\s+['"]([^'"]+)['"]"#),
        re(r#"require\s*\(\s*['"]([^'"]+)['"]"#),
        re(r#"import\s+['"]([^'"]+)['"]"#),
    ],
    types: vec![re(r"class\s+(\w+)(?:\s+extends\s+([\w.]+))?")],
    callables: vec![re(
        r"(?:function\s+(\w+)\s*\(|(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s*)?\([^)]*\)\s*=>|(\w+)\s*:\s*(?:async\s*)?\([^)]*\)\s*=>)",
    )],
    endpoints: vec![EndpointRule {
        pattern: re(
            r#"(?:app|router)\.(get|post|put|delete|patch|head|options)\s*\(\s*['"]([^'"]+)['"]"#,
        ),
        style: RoutingStyle::Express,
        shape: EndpointShape::MethodThenPath,
    }],
});

static TYPESCRIPT: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    imports: vec![
        re(r#"import\s+[^'"]*?from\s+['"]([^'"]+)['"]"#),
        re(r#"require\s*\(\s*['"]([^'"]+)['"]"#),
        re(r#"import\s+['"]([^'"]+)['"]"#),
    ],
    types: vec![re(
        r"(?:export\s+)?(?:abstract\s+)?class\s+(\w+)(?:\s+extends\s+([\w.]+))?",
    )],
    callables: vec![re(
        r"(?:function\s+(\w+)\s*\(|(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s*)?\([^)]*\)\s*=>|(\w+)\s*:\s*(?:async\s*)?\([^)]*\)\s*=>)",
    )],
    endpoints: vec![EndpointRule {
        pattern: re(
            r#"(?:app|router)\.(get|post|put|delete|patch|head|options)\s*\(\s*['"]([^'"]+)['"]"#,
        ),
        style: RoutingStyle::Express,
        shape: EndpointShape::MethodThenPath,
    }],
});

static JAVA: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    imports: vec![re(r"(?m)^\s*import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;")],
    types: vec![re(
        r"(?:public\s+|private\s+|protected\s+)?(?:static\s+)?(?:final\s+)?class\s+(\w+)(?:\s+extends\s+([\w.]+))?",
    )],
    callables: vec![re(
        r"(?:public|private|protected)\s+(?:static\s+)?[\w<>\[\],\s]+?\s(\w+)\s*\(",
    )],
    endpoints: Vec::new(),
});

/// Recognizer table for a language, if it has one
///
/// Languages without a table still classify and count; they just contribute
/// no structural facts.
pub fn rules_for(language: Language) -> Option<&'static RuleSet> {
    match language {
        Language::Python => Some(&PYTHON),
        Language::JavaScript => Some(&JAVASCRIPT),
        Language::TypeScript => Some(&TYPESCRIPT),
        Language::Java => Some(&JAVA),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_exist_for_supported_languages() {
        assert!(rules_for(Language::Python).is_some());
        assert!(rules_for(Language::JavaScript).is_some());
        assert!(rules_for(Language::TypeScript).is_some());
        assert!(rules_for(Language::Java).is_some());
    }

    #[test]
    fn test_no_rules_for_other_languages() {
        assert!(rules_for(Language::Rust).is_none());
        assert!(rules_for(Language::Go).is_none());
        assert!(rules_for(Language::Markdown).is_none());
        assert!(rules_for(Language::Unknown).is_none());
    }

    #[test]
    fn test_python_import_pattern_is_line_anchored() {
        let rules = rules_for(Language::Python).unwrap();
        let text = "import os\nclass X:\n    pass\n";
        let caps = rules.imports[0].captures(text).unwrap();
        // Must not run across the newline into the class definition
        assert_eq!(&caps[1], "os");
    }

    #[test]
    fn test_python_from_import_captures_module() {
        let rules = rules_for(Language::Python).unwrap();
        let caps = rules.imports[1]
            .captures("from app.utils import helper\n")
            .unwrap();
        assert_eq!(&caps[1], "app.utils");
    }

    #[test]
    fn test_javascript_import_patterns() {
        let rules = rules_for(Language::JavaScript).unwrap();
        let caps = rules.imports[0]
            .captures(r#"import { x } from "./lib/util";"#)
            .unwrap();
        assert_eq!(&caps[1], "./lib/util");

        let caps = rules.imports[1].captures(r#"const y = require("lodash");"#).unwrap();
        assert_eq!(&caps[1], "lodash");

        let caps = rules.imports[2].captures(r#"import "./styles.css";"#).unwrap();
        assert_eq!(&caps[1], "./styles.css");
    }

    #[test]
    fn test_java_import_pattern() {
        let rules = rules_for(Language::Java).unwrap();
        let caps = rules.imports[0]
            .captures("import java.util.List;\n")
            .unwrap();
        assert_eq!(&caps[1], "java.util.List");

        let caps = rules.imports[0].captures("import com.acme.*;\n").unwrap();
        assert_eq!(&caps[1], "com.acme.*");
    }

    #[test]
    fn test_flask_endpoint_pattern_with_methods() {
        let rules = rules_for(Language::Python).unwrap();
        let text = r#"@app.route("/users", methods=["GET", "POST"])"#;
        let caps = rules.endpoints[0].pattern.captures(text).unwrap();
        assert_eq!(&caps[1], "/users");
        assert_eq!(&caps[2], r#""GET", "POST""#);
    }

    #[test]
    fn test_express_endpoint_pattern() {
        let rules = rules_for(Language::JavaScript).unwrap();
        let caps = rules.endpoints[0]
            .pattern
            .captures(r#"router.post("/login", handler)"#)
            .unwrap();
        assert_eq!(&caps[1], "post");
        assert_eq!(&caps[2], "/login");
    }
}
