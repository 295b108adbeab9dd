//! Command registry: definitions in, match results out.
//!
//! ```text
//! Registry::new(settings) → add(definitions) → match_message(text)
//! ```

mod definition;
mod store;

pub use definition::{
    Definition, DefinitionSpec, Field, FieldKind, FieldOptions, FieldSpec, MatchKind,
    DEFAULT_LIST_DELIMITER,
};
pub use store::DefinitionStore;

use std::sync::Arc;

use crate::config::Settings;
use crate::error::RegistryError;
use crate::matcher::{scan, MatchResult, Patterns};

/// Registry of command definitions with compiled recognizers.
///
/// Matching takes `&self` and is safe to share across threads once registration is
/// done; `add` takes `&mut self`.
#[derive(Debug)]
pub struct Registry {
    settings: Settings,
    patterns: Patterns,
    store: DefinitionStore,
}

impl Default for Registry {
    fn default() -> Self {
        Self::compiled(Settings::default())
    }
}

impl Registry {
    /// Create a registry, validating the settings first.
    pub fn new(settings: Settings) -> Result<Self, RegistryError> {
        settings.validate()?;
        Ok(Self::compiled(settings))
    }

    fn compiled(settings: Settings) -> Self {
        let patterns = Patterns::compile(&settings);
        Self {
            settings,
            patterns,
            store: DefinitionStore::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Normalize and register definitions, in order.
    ///
    /// Stops at the first invalid definition; the ones before it stay registered.
    pub fn add<I>(&mut self, definitions: I) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = DefinitionSpec>,
    {
        let mut definitions = definitions.into_iter().peekable();
        if definitions.peek().is_none() {
            return Err(RegistryError::NoDefinitions);
        }

        for spec in definitions {
            let definition = Definition::try_from(spec)?;
            tracing::debug!(
                name = %definition.name,
                aliases = ?definition.aliases,
                args = definition.args.len(),
                flags = definition.flags.len(),
                "Registered command definition"
            );
            self.store.insert(definition);
        }

        Ok(self)
    }

    /// Match a message against the registered definitions.
    ///
    /// Returns `None` when the prefix is missing or no definition answers to the
    /// command name. Otherwise returns one result per overload, in registration order.
    pub fn match_message(&self, message: &str) -> Option<Vec<MatchResult>> {
        let Some(base) = self.patterns.base(message) else {
            tracing::trace!("Message does not start with the command prefix");
            return None;
        };

        let overloads = self.store.get(base.name);
        if overloads.is_empty() {
            tracing::debug!(name = base.name, "No definition for command");
            return None;
        }

        Some(
            overloads
                .iter()
                .map(|definition| scan(&self.patterns, definition, base.rest))
                .collect(),
        )
    }

    /// All distinct definitions in registration order. Aliases don't duplicate entries.
    pub fn definitions(&self) -> &[Arc<Definition>] {
        self.store.definitions()
    }
}
