use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::registry::DefinitionSpec;

/// Root of a command file: registry settings plus the commands to register.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandFile {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub commands: Vec<DefinitionSpec>,
}

/// Markers used to recognize commands, flags, delimiters and literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Command prefix (default: "!").
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Argument delimiter. `None` splits on runs of whitespace.
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Flag prefix (default: "--").
    #[serde(default = "default_flag_prefix")]
    pub flag_prefix: String,
    /// Quote marker(s) wrapping literal values (default: `"`).
    #[serde(default)]
    pub quote: Quote,
}

/// Either one marker used on both sides, or an explicit `[open, close]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quote {
    Same(String),
    Pair(String, String),
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_flag_prefix() -> String {
    "--".to_string()
}

fn default_quote() -> String {
    "\"".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            delimiter: None,
            flag_prefix: default_flag_prefix(),
            quote: Quote::default(),
        }
    }
}

impl Default for Quote {
    fn default() -> Self {
        Quote::Same(default_quote())
    }
}

impl Quote {
    /// Opening marker.
    pub fn open(&self) -> &str {
        match self {
            Quote::Same(q) => q,
            Quote::Pair(open, _) => open,
        }
    }

    /// Closing marker.
    pub fn close(&self) -> &str {
        match self {
            Quote::Same(q) => q,
            Quote::Pair(_, close) => close,
        }
    }
}

impl Settings {
    /// Validates the settings.
    ///
    /// Checks:
    /// - Every marker is a non-empty string
    /// - The flag prefix differs from the delimiter
    /// - Neither quote marker equals the flag prefix or the delimiter
    pub fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |message: String| Err(RegistryError::InvalidSettings { message });

        if self.prefix.is_empty() {
            return invalid("prefix must be a non-empty string".to_string());
        }
        if self.flag_prefix.is_empty() {
            return invalid("flag_prefix must be a non-empty string".to_string());
        }
        if self.quote.open().is_empty() || self.quote.close().is_empty() {
            return invalid("quote markers must be non-empty strings".to_string());
        }

        if let Some(delimiter) = &self.delimiter {
            if delimiter.is_empty() {
                return invalid("delimiter must be a non-empty string".to_string());
            }
            if &self.flag_prefix == delimiter {
                return invalid(format!(
                    "flag_prefix '{}' must differ from delimiter",
                    self.flag_prefix
                ));
            }
        }

        for marker in [self.quote.open(), self.quote.close()] {
            if marker == self.flag_prefix {
                return invalid(format!("quote '{}' must differ from flag_prefix", marker));
            }
            if self.delimiter.as_deref() == Some(marker) {
                return invalid(format!("quote '{}' must differ from delimiter", marker));
            }
        }

        Ok(())
    }
}
