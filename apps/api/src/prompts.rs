//! Prompt Catalog — named prompt templates loaded once from a JSON file.
//!
//! Templates use `{placeholder}` slots. Resolution substitutes every
//! referenced placeholder or fails; a template is never sent half-filled.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex"));

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read prompt source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt source {path} is not a valid prompt mapping: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No prompt named '{0}' in the catalog")]
    KeyNotFound(String),

    #[error("Prompt '{key}' references placeholder '{placeholder}' but no value was supplied")]
    MissingParameter { key: String, placeholder: String },
}

/// A single catalog entry: the template plus a human-readable description.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptEntry {
    pub template: String,
    #[allow(dead_code)]
    pub description: Option<String>,
}

/// Immutable catalog of prompt templates, loaded once at construction.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    prompts: HashMap<String, PromptEntry>,
}

impl PromptCatalog {
    /// Loads the catalog from a JSON file mapping key → {template, description}.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PromptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let prompts: HashMap<String, PromptEntry> =
            serde_json::from_str(&raw).map_err(|source| PromptError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Loaded {} prompt templates from {}", prompts.len(), path.display());
        Ok(Self { prompts })
    }

    /// Resolves `key` and substitutes every `{name}` placeholder from `params`.
    ///
    /// Pure function of catalog state and inputs: identical inputs always
    /// yield identical output. Extra params are ignored; a referenced
    /// placeholder without a value is an error.
    pub fn resolve(
        &self,
        key: &str,
        params: &HashMap<&str, &str>,
    ) -> Result<String, PromptError> {
        let entry = self
            .prompts
            .get(key)
            .ok_or_else(|| PromptError::KeyNotFound(key.to_string()))?;

        let mut resolved = String::with_capacity(entry.template.len());
        let mut last = 0;
        for caps in PLACEHOLDER_RE.captures_iter(&entry.template) {
            let m = caps.get(0).expect("whole match");
            let placeholder = &caps[1];
            let value =
                params
                    .get(placeholder)
                    .ok_or_else(|| PromptError::MissingParameter {
                        key: key.to_string(),
                        placeholder: placeholder.to_string(),
                    })?;
            resolved.push_str(&entry.template[last..m.start()]);
            resolved.push_str(value);
            last = m.end();
        }
        resolved.push_str(&entry.template[last..]);
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG_JSON: &str = r#"{
        "resume_analysis": {
            "template": "Role: {designation}, Exp: {experience}, Domain: {domain}",
            "description": "Resume critique prompt"
        },
        "summary": {
            "template": "Analyze this resume text and summarize its key points.",
            "description": "Plain summary prompt"
        }
    }"#;

    fn catalog() -> PromptCatalog {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CATALOG_JSON.as_bytes()).unwrap();
        PromptCatalog::load(file.path()).unwrap()
    }

    #[test]
    fn test_resolve_substitutes_all_placeholders() {
        let catalog = catalog();
        let params = HashMap::from([
            ("designation", "Data Scientist"),
            ("experience", "Fresher"),
            ("domain", "Finance"),
        ]);
        let resolved = catalog.resolve("resume_analysis", &params).unwrap();
        assert_eq!(resolved, "Role: Data Scientist, Exp: Fresher, Domain: Finance");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let catalog = catalog();
        let params = HashMap::from([
            ("designation", "Backend Engineer"),
            ("experience", "3-5 years"),
            ("domain", "Healthcare"),
        ]);
        let first = catalog.resolve("resume_analysis", &params).unwrap();
        let second = catalog.resolve("resume_analysis", &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_without_placeholders_ignores_params() {
        let catalog = catalog();
        let params = HashMap::from([("designation", "ignored")]);
        let resolved = catalog.resolve("summary", &params).unwrap();
        assert_eq!(
            resolved,
            "Analyze this resume text and summarize its key points."
        );
    }

    #[test]
    fn test_resolve_unknown_key() {
        let catalog = catalog();
        let err = catalog.resolve("cover_letter", &HashMap::new()).unwrap_err();
        assert!(matches!(err, PromptError::KeyNotFound(key) if key == "cover_letter"));
    }

    #[test]
    fn test_resolve_missing_parameter() {
        let catalog = catalog();
        let params = HashMap::from([("designation", "Data Scientist"), ("domain", "Finance")]);
        let err = catalog.resolve("resume_analysis", &params).unwrap_err();
        match err {
            PromptError::MissingParameter { key, placeholder } => {
                assert_eq!(key, "resume_analysis");
                assert_eq!(placeholder, "experience");
            }
            other => panic!("expected MissingParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = PromptCatalog::load("data/does_not_exist.json").unwrap_err();
        assert!(matches!(err, PromptError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_source() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        let err = PromptCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, PromptError::Parse { .. }));
    }
}
