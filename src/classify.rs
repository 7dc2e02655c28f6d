// Language classification from file paths and content
//
// Primary rule is an extension lookup against a fixed table. Content
// heuristics are a fallback applied only when the extension is absent or
// unrecognized. Absence of a match is a valid terminal state, never an
// error.

use serde::{Deserialize, Serialize};

/// Programming language of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Rust,
    Ruby,
    C,
    Cpp,
    CSharp,
    Php,
    Html,
    Css,
    Markdown,
    Json,
    Yaml,
    Toml,
    Sql,
    Shell,
    Unknown,
}

/// How import tokens of a language map onto file paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFamily {
    /// Dotted namespaces: `a.b.c` refers to `a/b/c.<ext>`
    Dotted,
    /// Relative or bare paths: `./a/b` refers to `a/b.<ext>`
    PathBased,
    /// No import resolution performed
    None,
}

impl Language {
    /// Human-readable name used in statistics and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Ruby => "Ruby",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Php => "PHP",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Markdown => "Markdown",
            Language::Json => "JSON",
            Language::Yaml => "YAML",
            Language::Toml => "TOML",
            Language::Sql => "SQL",
            Language::Shell => "Shell",
            Language::Unknown => "Unknown",
        }
    }

    /// Import-resolution family of the language
    pub fn module_family(&self) -> ModuleFamily {
        match self {
            Language::Python | Language::Java => ModuleFamily::Dotted,
            Language::JavaScript | Language::TypeScript => ModuleFamily::PathBased,
            _ => ModuleFamily::None,
        }
    }
}

/// Map a file extension to a language
fn language_for_extension(ext: &str) -> Option<Language> {
    let lang = match ext {
        "py" => Language::Python,
        "js" | "jsx" | "mjs" => Language::JavaScript,
        "ts" | "tsx" => Language::TypeScript,
        "java" => Language::Java,
        "go" => Language::Go,
        "rs" => Language::Rust,
        "rb" => Language::Ruby,
        "c" | "h" => Language::C,
        "cpp" | "cc" | "hpp" => Language::Cpp,
        "cs" => Language::CSharp,
        "php" => Language::Php,
        "html" | "htm" => Language::Html,
        "css" | "scss" | "less" => Language::Css,
        "md" => Language::Markdown,
        "json" => Language::Json,
        "yaml" | "yml" => Language::Yaml,
        "toml" => Language::Toml,
        "sql" => Language::Sql,
        "sh" | "bash" => Language::Shell,
        _ => return None,
    };
    Some(lang)
}

/// Extract the lowercase extension of a path, if any
fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() {
        // Dotfiles like `.gitignore` have no extension
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Ordered content heuristics, tried only when the extension gives nothing.
/// First match wins.
fn classify_by_content(content: &str) -> Language {
    if content.contains("def ") && content.contains("import ") {
        return Language::Python;
    }
    if content.contains("function ") || content.contains("const ") || content.contains("let ") {
        return Language::JavaScript;
    }
    if content.contains("public class ") || content.contains("private class ") {
        return Language::Java;
    }
    Language::Unknown
}

/// Classify a file by path, falling back to content heuristics
pub fn classify(path: &str, content: &str) -> Language {
    if let Some(ext) = extension_of(path) {
        if let Some(lang) = language_for_extension(&ext) {
            return lang;
        }
    }
    classify_by_content(content)
}
