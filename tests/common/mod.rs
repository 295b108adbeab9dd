//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use chatmatch::{FieldValue, MatchResult, Registry, Settings, Unknown};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build an expected args/flags map.
pub fn values<const N: usize>(pairs: [(&str, FieldValue); N]) -> BTreeMap<String, FieldValue> {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub fn unknown_arg(raw: &str) -> Unknown {
    Unknown::Arg(raw.to_string())
}

pub fn unknown_flag(raw: &str) -> Unknown {
    Unknown::Flag(raw.to_string())
}

/// Match a message that must resolve to exactly one overload.
pub fn match_one(registry: &Registry, message: &str) -> MatchResult {
    let mut results = registry
        .match_message(message)
        .unwrap_or_else(|| panic!("Expected a match for {:?}", message));
    assert_eq!(results.len(), 1, "Expected a single overload for {:?}", message);
    results.remove(0)
}

pub fn registry_with(settings: Settings) -> Registry {
    Registry::new(settings).expect("Failed to build registry")
}

/// Create a temporary command file with the given TOML content.
pub fn temp_command_file(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("commands.toml");
    std::fs::write(&path, content).expect("Failed to write command file");
    (temp_dir, path)
}
