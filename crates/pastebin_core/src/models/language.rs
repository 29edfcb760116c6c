//! Closed set of syntax-highlighting language tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported language tag. Serialized as its lowercase code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Plaintext,
    Javascript,
    Typescript,
    Python,
    Java,
    Csharp,
    Cpp,
    C,
    Go,
    Rust,
    Ruby,
    Php,
    Swift,
    Kotlin,
    Html,
    Css,
    Sql,
    Bash,
    Json,
    Xml,
    Yaml,
    Markdown,
    Dockerfile,
}

impl Language {
    /// Every supported tag, in display order.
    pub const ALL: [Language; 23] = [
        Language::Plaintext,
        Language::Javascript,
        Language::Typescript,
        Language::Python,
        Language::Java,
        Language::Csharp,
        Language::Cpp,
        Language::C,
        Language::Go,
        Language::Rust,
        Language::Ruby,
        Language::Php,
        Language::Swift,
        Language::Kotlin,
        Language::Html,
        Language::Css,
        Language::Sql,
        Language::Bash,
        Language::Json,
        Language::Xml,
        Language::Yaml,
        Language::Markdown,
        Language::Dockerfile,
    ];

    /// Lowercase wire/storage code for this language.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Plaintext => "plaintext",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Csharp => "csharp",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Html => "html",
            Language::Css => "css",
            Language::Sql => "sql",
            Language::Bash => "bash",
            Language::Json => "json",
            Language::Xml => "xml",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
            Language::Dockerfile => "dockerfile",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the supported tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language '{}'", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Exact match on the lowercase code; no aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
