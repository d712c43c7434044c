//! Dotted-path namespaces for publishing types and values.

use indexmap::IndexMap;
use robject_core::Value;
use thiserror::Error;

/// Errors raised while resolving a namespace path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("`{path}` is bound to a {kind}, not a namespace")]
    Conflict { path: String, kind: &'static str },

    #[error("namespace path `{0}` contains an empty segment")]
    EmptySegment(String),
}

/// A node in a namespace tree.
#[derive(Debug, Clone)]
pub enum Entry {
    Namespace(Namespace),
    Value(Value),
}

/// Tree of named entries addressed by dotted paths such as `app.models`.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: IndexMap<String, Entry>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the namespace at `path`, creating every missing segment.
    ///
    /// # Errors
    /// Fails if a segment is empty or already holds a value.
    pub fn resolve(&mut self, path: &str) -> Result<&mut Namespace, NamespaceError> {
        let mut current = self;
        let mut walked = String::new();

        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(NamespaceError::EmptySegment(path.to_string()));
            }
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let entry = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| {
                    tracing::trace!(segment, "creating namespace");
                    Entry::Namespace(Namespace::new())
                });
            current = match entry {
                Entry::Namespace(namespace) => namespace,
                Entry::Value(value) => {
                    return Err(NamespaceError::Conflict {
                        path: walked,
                        kind: value.kind_name(),
                    });
                }
            };
        }

        Ok(current)
    }

    /// Binds `value` at `path`, creating the enclosing namespaces.
    ///
    /// Returns the entry previously bound at `path`, if any.
    ///
    /// # Errors
    /// Fails if an enclosing segment already holds a value.
    pub fn publish(
        &mut self,
        path: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Entry>, NamespaceError> {
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (self.resolve(parent)?, leaf),
            None => (self, path),
        };
        if leaf.is_empty() {
            return Err(NamespaceError::EmptySegment(path.to_string()));
        }
        Ok(parent
            .entries
            .insert(leaf.to_string(), Entry::Value(value.into())))
    }

    /// Looks up the entry at `path` without creating anything.
    pub fn lookup(&self, path: &str) -> Option<&Entry> {
        let (parent, leaf) = match path.rsplit_once('.') {
            Some((parent, leaf)) => (self.lookup_namespace(parent)?, leaf),
            None => (self, path),
        };
        parent.entries.get(leaf)
    }

    /// Looks up the value bound at `path`.
    pub fn value(&self, path: &str) -> Option<&Value> {
        match self.lookup(path)? {
            Entry::Value(value) => Some(value),
            Entry::Namespace(_) => None,
        }
    }

    /// Looks up the namespace at `path`.
    pub fn lookup_namespace(&self, path: &str) -> Option<&Namespace> {
        path.split('.')
            .try_fold(self, |namespace, segment| match namespace.entries.get(segment)? {
                Entry::Namespace(inner) => Some(inner),
                Entry::Value(_) => None,
            })
    }

    /// Entry names of this namespace in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
