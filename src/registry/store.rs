//! Definition store mapping names and aliases to overloads.

use std::collections::HashMap;
use std::sync::Arc;

use crate::registry::definition::Definition;

/// Multimap from every command name and alias to the definitions registered under it.
///
/// Definitions are shared, not copied: a definition with two aliases appears under
/// three keys but is allocated once.
#[derive(Debug, Default)]
pub struct DefinitionStore {
    /// Map of name/alias → overloads in registration order
    by_name: HashMap<String, Vec<Arc<Definition>>>,

    /// Distinct definitions in registration order
    all: Vec<Arc<Definition>>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its name and each alias. Never replaces.
    pub fn insert(&mut self, definition: Definition) -> Arc<Definition> {
        let definition = Arc::new(definition);

        for name in definition.names() {
            self.by_name
                .entry(name.to_string())
                .or_default()
                .push(Arc::clone(&definition));
        }

        self.all.push(Arc::clone(&definition));
        definition
    }

    /// Overloads registered under `name`, or an empty slice.
    pub fn get(&self, name: &str) -> &[Arc<Definition>] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All distinct definitions in registration order.
    pub fn definitions(&self) -> &[Arc<Definition>] {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
