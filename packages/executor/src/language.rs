use crate::error::ExecutorError;

/// A language supported by the execution service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Language {
    /// Canonical name, as stored on submissions.
    pub name: &'static str,
    /// Numeric identifier understood by the execution service.
    pub id: i32,
}

/// Canonical name → execution service language id.
const LANGUAGE_TABLE: &[Language] = &[
    Language {
        name: "cpp",
        id: 54,
    },
    Language {
        name: "java",
        id: 62,
    },
    Language {
        name: "javascript",
        id: 63,
    },
    Language {
        name: "python",
        id: 71,
    },
];

/// Fold accepted alternate spellings into the canonical name.
fn normalize(name: &str) -> String {
    let lowered = name.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "c++" => "cpp".to_string(),
        "js" => "javascript".to_string(),
        "py" => "python".to_string(),
        _ => lowered,
    }
}

/// Resolve a user-facing language name to a supported language.
///
/// Aliases are normalized before lookup, so `c++` and `cpp` resolve to the
/// same language.
pub fn resolve(name: &str) -> Result<Language, ExecutorError> {
    let canonical = normalize(name);
    LANGUAGE_TABLE
        .iter()
        .find(|lang| lang.name == canonical)
        .copied()
        .ok_or_else(|| ExecutorError::UnsupportedLanguage(name.trim().to_string()))
}

/// Canonical names of all supported languages.
pub fn supported_names() -> impl Iterator<Item = &'static str> {
    LANGUAGE_TABLE.iter().map(|lang| lang.name)
}
