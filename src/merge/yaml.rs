//! In-process YAML deep merge
//!
//! Folds a list of YAML documents into one, starting from an empty mapping.
//! This is the same reduction `yq -s 'reduce .[] as $item ({}; . * $item)'`
//! performs:
//!
//! - Mappings are merged recursively, key by key.
//! - Any other value (scalars, sequences, tagged values) from a later
//!   document replaces the earlier value entirely. Sequences are never
//!   concatenated.
//! - An empty document contributes nothing.
//! - A file may hold several `---` separated documents; each is folded in
//!   turn.
//! - `<<` merge keys are expanded while a document is loaded, so keys
//!   inherited from an anchor merge like any other key.
//!
//! Overwriting a non-mapping value that an earlier fragment already set is
//! logged as a warning, since the result then depends on fragment order.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;
use serde_yaml::{Mapping, Value as YamlValue};

use super::StructuredMerge;
use crate::error::{Error, Result};

/// Recursively merge `source` into `target`.
///
/// * `path` - dotted location of `target` inside the document, for logging
/// * `src_file` - file `source` was read from, for logging
pub fn merge_yaml_values(target: &mut YamlValue, source: &YamlValue, path: &str, src_file: &str) {
    match (target, source) {
        (YamlValue::Mapping(target_map), YamlValue::Mapping(source_map)) => {
            for (key, value) in source_map {
                let new_path = child_path(path, key);
                match target_map.get_mut(key) {
                    Some(existing) if existing.is_mapping() && value.is_mapping() => {
                        merge_yaml_values(existing, value, &new_path, src_file);
                    }
                    Some(existing) => {
                        if *existing != *value {
                            warn!(
                                "{}: overriding value at '{}': {} -> {}",
                                src_file,
                                new_path,
                                get_yaml_type_name(existing),
                                get_yaml_type_name(value)
                            );
                        }
                        *existing = value.clone();
                    }
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, source) => {
            *target = source.clone();
        }
    }
}

fn child_path(path: &str, key: &YamlValue) -> String {
    let key_str = match key {
        YamlValue::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    };
    if path.is_empty() {
        key_str
    } else {
        format!("{}.{}", path, key_str)
    }
}

/// Get a human-readable type name for a YAML value
pub fn get_yaml_type_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "Null",
        YamlValue::Bool(_) => "Bool",
        YamlValue::Number(_) => "Number",
        YamlValue::String(_) => "String",
        YamlValue::Sequence(_) => "Sequence",
        YamlValue::Mapping(_) => "Mapping",
        YamlValue::Tagged(_) => "Tagged",
    }
}

/// Fold already-parsed documents into one mapping.
///
/// Each element pairs a document with the name it came from. Top-level
/// documents other than mappings (or empty documents) cannot be folded into
/// a mapping and are rejected.
pub fn merge_documents<'a, I>(documents: I) -> Result<YamlValue>
where
    I: IntoIterator<Item = (&'a str, &'a YamlValue)>,
{
    let mut merged = YamlValue::Mapping(Mapping::new());
    for (name, document) in documents {
        match document {
            YamlValue::Null => debug!("{}: empty document, skipping", name),
            YamlValue::Mapping(_) => merge_yaml_values(&mut merged, document, "", name),
            other => {
                return Err(Error::Merge {
                    source_file: name.to_string(),
                    message: format!(
                        "top-level document must be a mapping, found {}",
                        get_yaml_type_name(other)
                    ),
                });
            }
        }
    }
    Ok(merged)
}

/// [`StructuredMerge`] that parses and merges the fragments in-process with
/// `serde_yaml`.
#[derive(Debug, Clone)]
pub struct YamlDeepMerge {
    root: PathBuf,
}

impl YamlDeepMerge {
    /// Relative fragment paths are read from below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every document in the file at `path`, with merge keys expanded.
    fn read_documents(&self, path: &Path) -> Result<Vec<YamlValue>> {
        let name = path.display().to_string();
        let content = fs::read_to_string(self.root.join(path)).map_err(|e| Error::Merge {
            source_file: name.clone(),
            message: format!("failed to read: {}", e),
        })?;
        let parse_error = |e: serde_yaml::Error| Error::Merge {
            source_file: name.clone(),
            message: format!("failed to parse YAML: {}", e),
        };

        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&content) {
            let mut value = YamlValue::deserialize(document).map_err(parse_error)?;
            value.apply_merge().map_err(parse_error)?;
            documents.push(value);
        }
        Ok(documents)
    }
}

impl StructuredMerge for YamlDeepMerge {
    fn merge(&self, paths: &[PathBuf]) -> Result<String> {
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path.display().to_string();
            for document in self.read_documents(path)? {
                documents.push((name.clone(), document));
            }
        }
        let merged = merge_documents(documents.iter().map(|(n, d)| (n.as_str(), d)))?;
        Ok(serde_yaml::to_string(&merged)?)
    }
}
