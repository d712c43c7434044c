use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::{Definition, ExtendsInitializer, MixinsInitializer, TypeBuilder};

/// A named step of the type pipeline
///
/// An initializer shapes the in-progress type from the definition. It must
/// do nothing when the definition lacks the key it handles.
pub trait Initializer: Send + Sync {
    fn apply(&self, ty: &mut TypeBuilder, definition: &Definition);
}

impl<F> Initializer for F
where
    F: Fn(&mut TypeBuilder, &Definition) + Send + Sync,
{
    fn apply(&self, ty: &mut TypeBuilder, definition: &Definition) {
        self(ty, definition)
    }
}

/// Ordered registry of initializers applied to every definition
///
/// Registration appends; registering an existing name replaces the
/// initializer without moving it. Nothing is ever removed.
#[derive(Clone, Default)]
pub struct InitializerRegistry {
    initializers: IndexMap<String, Arc<dyn Initializer>>,
}

impl InitializerRegistry {
    /// Creates a registry with no initializers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the core initializers, `extends` then `mixins`
    pub fn with_core() -> Self {
        let mut registry = Self::empty();
        registry.init_core();
        registry
    }

    /// Registers the core initializers
    pub fn init_core(&mut self) -> &mut Self {
        self.register(ExtendsInitializer::NAME, ExtendsInitializer);
        self.register(MixinsInitializer::NAME, MixinsInitializer);
        self
    }

    /// Appends an initializer, or replaces one registered under `name` in place
    pub fn register(
        &mut self,
        name: impl Into<String>,
        initializer: impl Initializer + 'static,
    ) -> &mut Self {
        let name = name.into();
        tracing::debug!(initializer = %name, "registering initializer");
        self.initializers.insert(name, Arc::new(initializer));
        self
    }

    /// Registered names in pipeline order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.initializers.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.initializers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.initializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initializers.is_empty()
    }

    /// Copies the current pipeline so it can run without holding a lock
    pub(crate) fn snapshot(&self) -> Vec<(String, Arc<dyn Initializer>)> {
        self.initializers
            .iter()
            .map(|(name, initializer)| (name.clone(), Arc::clone(initializer)))
            .collect()
    }
}

impl fmt::Debug for InitializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut TypeBuilder, _: &Definition) {}

    #[test]
    fn test_core_order() {
        let registry = InitializerRegistry::with_core();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["extends", "mixins"]);
    }

    #[test]
    fn test_register_appends() {
        let mut registry = InitializerRegistry::with_core();
        registry.register("statics", noop);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["extends", "mixins", "statics"]
        );
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut registry = InitializerRegistry::empty();
        registry.register("a", noop).register("b", noop).register("c", noop);
        registry.register("a", noop);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_reregister_replaces_initializer() {
        use crate::composition::TypeFactory;
        use crate::value::Value;
        use parking_lot::RwLock;

        let mut registry = InitializerRegistry::empty();
        registry.register("a", |ty: &mut TypeBuilder, _: &Definition| {
            ty.table_mut().insert("x", Value::Int(1));
        });
        registry.init_core();
        registry.register("a", |ty: &mut TypeBuilder, _: &Definition| {
            ty.table_mut().insert("x", Value::Int(2));
        });
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["a", "extends", "mixins"]
        );

        let registry = RwLock::new(registry);
        let ty = TypeFactory::new(&registry).define(Definition::new()).unwrap();
        assert_eq!(ty.lookup("x"), Some(Value::Int(2)));
    }

    #[test]
    fn test_empty_registry() {
        let registry = InitializerRegistry::empty();
        assert!(registry.is_empty());
        assert!(!registry.contains("extends"));
    }
}
