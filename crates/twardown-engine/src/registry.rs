//! Named, priority-ordered processor registration.
//!
//! Both processor chains are [`PriorityRegistry`] instances: entries
//! are tried in descending priority, ties keep registration order, and
//! names are unique within a chain.

use thiserror::Error;

/// Error raised by chain registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A processor with this name is already registered in the chain.
    #[error("a processor named '{0}' is already registered")]
    DuplicateName(String),
    /// No processor with this name is registered in the chain.
    #[error("no processor named '{0}' is registered")]
    UnknownName(String),
}

/// A single chain entry: a name, a priority and the processor itself.
#[derive(Clone, Debug)]
pub struct Registration<T> {
    name: String,
    priority: i32,
    item: T,
}

impl<T> Registration<T> {
    /// Name the processor was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registration priority; higher runs first.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The registered processor.
    #[must_use]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Mutable access to the registered processor.
    pub fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

/// An ordered set of named processors.
#[derive(Clone, Debug)]
pub struct PriorityRegistry<T> {
    entries: Vec<Registration<T>>,
}

impl<T> Default for PriorityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityRegistry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a processor under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        item: T,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        // Highest priority first; equal priorities keep registration order.
        let position = self
            .entries
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            position,
            Registration {
                name,
                priority,
                item,
            },
        );
        Ok(())
    }

    /// Remove a processor by name and return it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownName`] if no entry matches.
    pub fn deregister(&mut self, name: &str) -> Result<T, RegistryError> {
        match self.entries.iter().position(|entry| entry.name == name) {
            Some(position) => Ok(self.entries.remove(position).item),
            None => Err(RegistryError::UnknownName(name.to_owned())),
        }
    }

    /// Whether a processor with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Number of registered processors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in trial order.
    pub fn iter(&self) -> std::slice::Iter<'_, Registration<T>> {
        self.entries.iter()
    }

    /// Iterate entries mutably in trial order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Registration<T>> {
        self.entries.iter_mut()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Registration<T>> {
        self.entries.get_mut(index)
    }
}
