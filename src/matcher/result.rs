use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::registry::Definition;

/// A resolved argument or flag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Positional, content and quoted values.
    Text(String),
    /// Values of list fields, split on the field's delimiter.
    List(Vec<String>),
    /// Flags present without a value. Always `true`; absent flags have no entry.
    Bool(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(String::from).collect())
    }
}

/// A token that fits no declared field. Serializes as `{"arg": ..}` or `{"flag": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unknown {
    /// Value or literal with no argument slot left.
    Arg(String),
    /// Flag name not declared by the definition.
    Flag(String),
}

impl Unknown {
    /// The raw token text (flag name without prefix).
    pub fn raw(&self) -> &str {
        match self {
            Unknown::Arg(raw) | Unknown::Flag(raw) => raw,
        }
    }
}

/// Outcome of scanning a message against one definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub definition: Arc<Definition>,
    pub args: BTreeMap<String, FieldValue>,
    pub flags: BTreeMap<String, FieldValue>,
    pub unknowns: Vec<Unknown>,
}

impl MatchResult {
    pub fn arg(&self, name: &str) -> Option<&FieldValue> {
        self.args.get(name)
    }

    pub fn flag(&self, name: &str) -> Option<&FieldValue> {
        self.flags.get(name)
    }

    /// True when every token was attributed to a declared field.
    pub fn is_exact(&self) -> bool {
        self.unknowns.is_empty()
    }
}
