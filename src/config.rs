//! # Configuration
//!
//! A run is driven by a handful of values that CI usually provides as
//! environment variables. The CLI layer collects them (flag or environment)
//! and hands them to [`Config::new`], which parses the mapping and the shared
//! file list once so the rest of the pipeline works with typed values.
//!
//! ## Mapping format
//!
//! One rule per line, whitespace separated:
//!
//! ```text
//! services/api/.*     configs/api.yml configs/db.yml
//! docs/.*             configs/docs.yml
//! ```
//!
//! The first token is a regular expression that must match a changed path in
//! full; the remaining tokens are the fragment files selected when it does.
//! Blank lines are ignored.

use std::fmt;
use std::path::PathBuf;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A single `pattern path...` line of the mapping.
#[derive(Debug, Clone)]
pub struct MappingRule {
    pattern: String,
    regex: Regex,
    /// Fragment files selected when the rule fires, in declaration order.
    pub paths: Vec<String>,
    /// 1-based line of the rule in the mapping text.
    pub line: usize,
}

impl MappingRule {
    /// Compile a rule. The pattern is anchored so it has to match a whole path.
    pub fn new(pattern: &str, paths: Vec<String>, line: usize) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| Error::ConfigParse {
            message: format!("invalid pattern '{}': {}", pattern, e),
            line: Some(line),
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            paths,
            line,
        })
    }

    /// The pattern as written in the mapping, without anchors.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `path` matches the pattern from start to end.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl fmt::Display for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)?;
        for path in &self.paths {
            write!(f, " {}", path)?;
        }
        Ok(())
    }
}

impl Serialize for MappingRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("MappingRule", 3)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("pattern", &self.pattern)?;
        state.serialize_field("paths", &self.paths)?;
        state.end()
    }
}

/// Parse the multi-line mapping into rules, preserving line order.
pub fn parse_mapping(text: &str) -> Result<Vec<MappingRule>> {
    let mut rules = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(pattern) = tokens.next() else {
            continue;
        };
        let paths = tokens.map(str::to_string).collect();
        rules.push(MappingRule::new(pattern, paths, idx + 1)?);
    }
    Ok(rules)
}

/// Split the shared file list on whitespace. An empty value yields no files.
pub fn parse_shared_files(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Everything a run needs, resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the merged document is written; relative paths resolve against
    /// `repo_root`.
    pub output_path: PathBuf,
    /// Fragments included whenever anything is merged at all.
    pub shared_files: Vec<String>,
    /// Head revision of the build.
    pub head: String,
    /// Revision the build is compared against.
    pub base_revision: String,
    /// Ordered mapping rules.
    pub mapping: Vec<MappingRule>,
    /// Working tree git runs in; relative fragment paths resolve against it.
    pub repo_root: PathBuf,
}

impl Config {
    /// Build a configuration from raw values, parsing the mapping and shared
    /// file list.
    pub fn new(
        output_path: impl Into<PathBuf>,
        shared_files: &str,
        head: impl Into<String>,
        base_revision: impl Into<String>,
        mapping: &str,
    ) -> Result<Self> {
        let head = head.into();
        let base_revision = base_revision.into();
        if head.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "head revision is empty".to_string(),
                line: None,
            });
        }
        if base_revision.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "base revision is empty".to_string(),
                line: None,
            });
        }

        Ok(Self {
            output_path: output_path.into(),
            shared_files: parse_shared_files(shared_files),
            head,
            base_revision,
            mapping: parse_mapping(mapping)?,
            repo_root: PathBuf::from("."),
        })
    }

    /// Run against a different working tree than the current directory.
    pub fn with_repo_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.repo_root = root.into();
        self
    }

    /// The output file, resolved against the working tree.
    pub fn output_file(&self) -> PathBuf {
        self.repo_root.join(&self.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping_single_rule() {
        let rules = parse_mapping("services/api/.*  configs/api.yml").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].pattern(), "services/api/.*");
        assert_eq!(rules[0].paths, vec!["configs/api.yml"]);
        assert_eq!(rules[0].line, 1);
    }

    #[test]
    fn test_parse_mapping_multiple_paths_and_blank_lines() {
        let text = "\nsrc/.* a.yml b.yml\n\n   \ndocs/.*\tdocs.yml\n";
        let rules = parse_mapping(text).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].paths, vec!["a.yml", "b.yml"]);
        assert_eq!(rules[0].line, 2);
        assert_eq!(rules[1].pattern(), "docs/.*");
        assert_eq!(rules[1].line, 5);
    }

    #[test]
    fn test_parse_mapping_rule_without_paths() {
        let rules = parse_mapping("README.md").unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].paths.is_empty());
    }

    #[test]
    fn test_parse_mapping_empty() {
        assert!(parse_mapping("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_mapping_invalid_pattern_reports_line() {
        let err = parse_mapping("ok/.* a.yml\nbad/( b.yml").unwrap_err();
        match err {
            Error::ConfigParse { line, message } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("bad/("));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rule_matches_whole_path_only() {
        let rule = MappingRule::new("src/.*\\.rs", vec![], 1).unwrap();
        assert!(rule.matches("src/main.rs"));
        assert!(!rule.matches("crates/src/main.rs"));
        assert!(!rule.matches("src/main.rs.bak"));
    }

    #[test]
    fn test_rule_alternation_is_anchored_as_a_whole() {
        let rule = MappingRule::new("a|b", vec![], 1).unwrap();
        assert!(rule.matches("a"));
        assert!(rule.matches("b"));
        assert!(!rule.matches("abc"));
        assert!(!rule.matches("cab"));
    }

    #[test]
    fn test_rule_display() {
        let rule = MappingRule::new("x/.*", vec!["a.yml".into(), "b.yml".into()], 1).unwrap();
        assert_eq!(rule.to_string(), "x/.* a.yml b.yml");
    }

    #[test]
    fn test_parse_shared_files() {
        assert!(parse_shared_files("").is_empty());
        assert!(parse_shared_files("   ").is_empty());
        assert_eq!(
            parse_shared_files(" base.yml\tcommon/ci.yml \n"),
            vec!["base.yml", "common/ci.yml"]
        );
    }

    #[test]
    fn test_config_new() {
        let config = Config::new(
            "/tmp/out.yml",
            "base.yml",
            "abc123",
            "main",
            "src/.* src.yml",
        )
        .unwrap();
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.yml"));
        assert_eq!(config.shared_files, vec!["base.yml"]);
        assert_eq!(config.head, "abc123");
        assert_eq!(config.base_revision, "main");
        assert_eq!(config.mapping.len(), 1);
        assert_eq!(config.repo_root, PathBuf::from("."));
    }

    #[test]
    fn test_config_rejects_empty_revisions() {
        assert!(Config::new("out.yml", "", "", "main", "").is_err());
        assert!(Config::new("out.yml", "", "HEAD", " ", "").is_err());
    }

    #[test]
    fn test_output_file_resolves_against_repo_root() {
        let config = Config::new("ci/out.yml", "", "HEAD", "main", "")
            .unwrap()
            .with_repo_root("/work");
        assert_eq!(config.output_file(), PathBuf::from("/work/ci/out.yml"));

        let config = Config::new("/tmp/out.yml", "", "HEAD", "main", "")
            .unwrap()
            .with_repo_root("/work");
        assert_eq!(config.output_file(), PathBuf::from("/tmp/out.yml"));
    }

    #[test]
    fn test_config_with_repo_root() {
        let config = Config::new("out.yml", "", "HEAD", "main", "")
            .unwrap()
            .with_repo_root("/work");
        assert_eq!(config.repo_root, PathBuf::from("/work"));
    }

    #[test]
    fn test_rule_serializes_without_regex() {
        let rule = MappingRule::new("x/.*", vec!["a.yml".into()], 4).unwrap();
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["line"], 4);
        assert_eq!(json["pattern"], "x/.*");
        assert_eq!(json["paths"][0], "a.yml");
    }
}
