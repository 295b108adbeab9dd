//! Command definitions: loosely-shaped descriptors and their canonical form.
//!
//! A [`DefinitionSpec`] is what callers (or command files) hand to the registry.
//! It accepts shorthand such as a bare field name. Registration normalizes it into
//! a [`Definition`], the only shape the matcher ever sees.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::error::RegistryError;

/// Delimiter used by list fields that don't declare one.
pub const DEFAULT_LIST_DELIMITER: &str = ",";

/// The `match` option of a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Swallows the rest of the input.
    Content,
    /// Split on a delimiter.
    List,
    /// Flag that never takes a value.
    Boolean,
}

/// An argument or flag as declared by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// Shorthand for a positional field (`"member"`).
    Name(String),
    /// Full form (`{ name = "members", match = "list" }`).
    Options(FieldOptions),
}

/// Full form of a field descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldOptions {
    pub name: String,
    #[serde(default, rename = "match")]
    pub kind: Option<MatchKind>,
    /// Only valid with `match = "list"`.
    #[serde(default)]
    pub delimiter: Option<String>,
}

impl FieldSpec {
    fn with_kind(name: impl Into<String>, kind: MatchKind) -> Self {
        FieldSpec::Options(FieldOptions {
            name: name.into(),
            kind: Some(kind),
            delimiter: None,
        })
    }

    /// Field capturing the remainder of the message.
    pub fn content(name: impl Into<String>) -> Self {
        Self::with_kind(name, MatchKind::Content)
    }

    /// List field split on [`DEFAULT_LIST_DELIMITER`].
    pub fn list(name: impl Into<String>) -> Self {
        Self::with_kind(name, MatchKind::List)
    }

    /// List field split on `delimiter`.
    pub fn list_with(name: impl Into<String>, delimiter: impl Into<String>) -> Self {
        FieldSpec::Options(FieldOptions {
            name: name.into(),
            kind: Some(MatchKind::List),
            delimiter: Some(delimiter.into()),
        })
    }

    /// Explicit boolean flag.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::with_kind(name, MatchKind::Boolean)
    }

    fn into_options(self) -> FieldOptions {
        match self {
            FieldSpec::Name(name) => FieldOptions {
                name,
                kind: None,
                delimiter: None,
            },
            FieldSpec::Options(options) => options,
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        FieldSpec::Name(name.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        FieldSpec::Name(name)
    }
}

/// A command definition as declared by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionSpec {
    pub name: String,
    /// Alternative names. A single string is accepted in command files.
    #[serde(default, deserialize_with = "one_or_many")]
    pub alias: Vec<String>,
    #[serde(default)]
    pub args: Option<Vec<FieldSpec>>,
    #[serde(default)]
    pub flags: Option<Vec<FieldSpec>>,
    /// Opaque payload handed back with every match.
    #[serde(default)]
    pub data: Option<Value>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(alias) => vec![alias],
        OneOrMany::Many(aliases) => aliases,
    })
}

impl DefinitionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias.push(alias.into());
        self
    }

    pub fn args<I, F>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn flags<I, F>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.flags = Some(flags.into_iter().map(Into::into).collect());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// How a field consumes input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match", rename_all = "lowercase")]
pub enum FieldKind {
    /// One token.
    Positional,
    /// Everything from the current position to the end of the message.
    Content,
    /// One token split on `delimiter`.
    List { delimiter: String },
    /// Present or absent; flags only.
    Boolean,
}

/// A normalized argument or flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// A normalized command definition. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Field>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Definition {
    /// Looks up a declared flag by name.
    pub fn flag(&self, name: &str) -> Option<&Field> {
        self.flags.get(name)
    }

    /// Every name this definition answers to, primary name first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl TryFrom<DefinitionSpec> for Definition {
    type Error = RegistryError;

    fn try_from(spec: DefinitionSpec) -> Result<Self, Self::Error> {
        let DefinitionSpec {
            name,
            alias,
            args,
            flags,
            data,
        } = spec;

        if name.is_empty() {
            return Err(RegistryError::MissingName);
        }

        let mut seen = HashSet::new();
        for alias in &alias {
            if alias.is_empty() {
                return Err(RegistryError::MissingFieldName {
                    definition: name,
                    field: "alias",
                });
            }
            if !seen.insert(alias.as_str()) {
                return Err(RegistryError::DuplicateAlias {
                    definition: name.clone(),
                    alias: alias.clone(),
                });
            }
        }

        let args = match args {
            None => Vec::new(),
            Some(args) => normalize_args(&name, args)?,
        };

        let flags = match flags {
            None => BTreeMap::new(),
            Some(flags) => normalize_flags(&name, flags)?,
        };

        Ok(Definition {
            name,
            aliases: alias,
            args,
            flags,
            data,
        })
    }
}

fn normalize_args(definition: &str, specs: Vec<FieldSpec>) -> Result<Vec<Field>, RegistryError> {
    if specs.is_empty() {
        return Err(RegistryError::EmptyFields {
            definition: definition.to_string(),
            field: "args",
        });
    }

    let count = specs.len();
    let mut names = HashSet::new();
    let mut args = Vec::with_capacity(count);

    for (i, spec) in specs.into_iter().enumerate() {
        let arg = normalize_field(definition, "argument", spec, false)?;

        if arg.kind == FieldKind::Content && i != count - 1 {
            return Err(RegistryError::ContentNotLast { name: arg.name });
        }

        if !names.insert(arg.name.clone()) {
            return Err(RegistryError::DuplicateArgument {
                definition: definition.to_string(),
                name: arg.name,
            });
        }

        args.push(arg);
    }

    Ok(args)
}

fn normalize_flags(
    definition: &str,
    specs: Vec<FieldSpec>,
) -> Result<BTreeMap<String, Field>, RegistryError> {
    if specs.is_empty() {
        return Err(RegistryError::EmptyFields {
            definition: definition.to_string(),
            field: "flags",
        });
    }

    let mut flags = BTreeMap::new();
    for spec in specs {
        let flag = normalize_field(definition, "flag", spec, true)?;
        flags.insert(flag.name.clone(), flag);
    }

    Ok(flags)
}

fn normalize_field(
    definition: &str,
    field: &'static str,
    spec: FieldSpec,
    allow_boolean: bool,
) -> Result<Field, RegistryError> {
    let FieldOptions {
        name,
        kind,
        delimiter,
    } = spec.into_options();

    if name.is_empty() {
        return Err(RegistryError::MissingFieldName {
            definition: definition.to_string(),
            field,
        });
    }

    let kind = match (kind, delimiter) {
        (Some(MatchKind::List), delimiter) => {
            let delimiter = delimiter.unwrap_or_else(|| DEFAULT_LIST_DELIMITER.to_string());
            if delimiter.is_empty() {
                return Err(RegistryError::EmptyListDelimiter { name });
            }
            FieldKind::List { delimiter }
        }
        (_, Some(_)) => return Err(RegistryError::DelimiterNotAllowed { name }),
        (None, None) => FieldKind::Positional,
        (Some(MatchKind::Content), None) => FieldKind::Content,
        (Some(MatchKind::Boolean), None) if allow_boolean => FieldKind::Boolean,
        (Some(MatchKind::Boolean), None) => return Err(RegistryError::BooleanArgument { name }),
    };

    Ok(Field { name, kind })
}
