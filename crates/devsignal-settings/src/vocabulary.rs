//! Keyword vocabularies for self-introduction claim extraction.
//!
//! Extraction is heuristic. The lists are versioned data so a change in
//! matching behaviour is visible in the profile output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// Version of the built-in vocabulary. Bump whenever a default list changes.
pub const VOCABULARY_VERSION: u32 = 3;

const LANGUAGE_KEYWORDS: &[(&str, &str)] = &[
    // languages
    ("rust", "Rust"),
    ("python", "Python"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("golang", "Go"),
    ("java", "Java"),
    ("kotlin", "Kotlin"),
    ("swift", "Swift"),
    ("objective-c", "Objective-C"),
    ("c++", "C++"),
    ("cpp", "C++"),
    ("c#", "C#"),
    ("csharp", "C#"),
    ("ruby", "Ruby"),
    ("php", "PHP"),
    ("scala", "Scala"),
    ("haskell", "Haskell"),
    ("elixir", "Elixir"),
    ("erlang", "Erlang"),
    ("clojure", "Clojure"),
    ("ocaml", "OCaml"),
    ("dart", "Dart"),
    ("lua", "Lua"),
    ("julia", "Julia"),
    ("zig", "Zig"),
    ("perl", "Perl"),
    ("solidity", "Solidity"),
    ("bash", "Shell"),
    ("shell", "Shell"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    // ecosystems mapped onto their language
    ("node.js", "JavaScript"),
    ("nodejs", "JavaScript"),
    ("deno", "JavaScript"),
    ("react", "JavaScript"),
    ("express.js", "JavaScript"),
    ("next.js", "TypeScript"),
    ("angular", "TypeScript"),
    ("django", "Python"),
    ("flask", "Python"),
    ("fastapi", "Python"),
    ("pytorch", "Python"),
    ("rails", "Ruby"),
    ("laravel", "PHP"),
    ("spring boot", "Java"),
    ("flutter", "Dart"),
    ("dotnet", "C#"),
    (".net", "C#"),
    ("tokio", "Rust"),
];

const TOPIC_KEYWORDS: &[&str] = &[
    "machine learning",
    "deep learning",
    "artificial intelligence",
    "llm",
    "nlp",
    "computer vision",
    "data science",
    "web development",
    "frontend",
    "backend",
    "full stack",
    "fullstack",
    "devops",
    "cloud",
    "kubernetes",
    "security",
    "blockchain",
    "game development",
    "embedded",
    "robotics",
    "compilers",
    "databases",
    "distributed systems",
    "mobile",
    "open source",
];

/// Keyword lists used to extract asserted languages and topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordVocabulary {
    pub version: u32,
    /// Lowercase keyword to canonical language name.
    pub languages: BTreeMap<String, String>,
    /// Lowercase topic phrases.
    pub topics: Vec<String>,
}

impl Default for KeywordVocabulary {
    fn default() -> Self {
        Self {
            version: VOCABULARY_VERSION,
            languages: LANGUAGE_KEYWORDS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            topics: TOPIC_KEYWORDS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl KeywordVocabulary {
    /// Canonical language for a keyword, case-insensitive.
    pub fn language_for(&self, keyword: &str) -> Option<&str> {
        self.languages
            .get(&keyword.to_lowercase())
            .map(String::as_str)
    }

    /// Whether both lists are exactly the built-in ones.
    pub fn is_builtin(&self) -> bool {
        let builtin = Self::default();
        self.languages == builtin.languages && self.topics == builtin.topics
    }

    /// Custom lists must carry their own version so profiles built from
    /// them are distinguishable, and no keyword may be blank.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.version == VOCABULARY_VERSION && !self.is_builtin() {
            return Err(SettingsError::Invalid {
                field: "vocabulary.version".to_string(),
                reason: format!(
                    "custom keyword lists must declare a version other than the built-in {VOCABULARY_VERSION}"
                ),
            });
        }
        let blank = self
            .languages
            .iter()
            .any(|(keyword, language)| keyword.trim().is_empty() || language.trim().is_empty())
            || self.topics.iter().any(|t| t.trim().is_empty());
        if blank {
            return Err(SettingsError::Invalid {
                field: "vocabulary".to_string(),
                reason: "keywords and language names must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecosystem_keywords_map_to_language() {
        let v = KeywordVocabulary::default();
        assert_eq!(v.language_for("Node.js"), Some("JavaScript"));
        assert_eq!(v.language_for("django"), Some("Python"));
        assert_eq!(v.language_for("cobol"), None);
    }

    #[test]
    fn builtin_lists_validate() {
        let v = KeywordVocabulary::default();
        assert!(v.is_builtin());
        assert!(v.validate().is_ok());
    }

    #[test]
    fn custom_lists_need_their_own_version() {
        let mut v = KeywordVocabulary::default();
        v.topics.push("quantum computing".to_string());
        assert!(!v.is_builtin());
        let err = v.validate().unwrap_err();
        assert!(err.to_string().contains("vocabulary.version"));

        v.version = VOCABULARY_VERSION + 1;
        assert!(v.validate().is_ok());
    }

    #[test]
    fn blank_keywords_are_rejected() {
        let mut v = KeywordVocabulary {
            version: 100,
            ..KeywordVocabulary::default()
        };
        v.languages.insert("  ".to_string(), "Rust".to_string());
        assert!(v.validate().is_err());
    }

    #[test]
    fn default_keys_are_lowercase() {
        let v = KeywordVocabulary::default();
        for key in v.languages.keys() {
            assert_eq!(key, &key.to_lowercase());
        }
        for topic in &v.topics {
            assert_eq!(topic, &topic.to_lowercase());
        }
    }
}
