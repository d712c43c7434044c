use super::{Definition, Initializer, TypeBuilder};

/// Links a new type to the type named in `extends`
///
/// The child's table is chained to the parent's table and the parent is
/// recorded as the superclass. No parent instance is ever created, so the
/// parent's initializer never runs while defining a child.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendsInitializer;

impl ExtendsInitializer {
    pub const NAME: &'static str = "extends";
}

impl Initializer for ExtendsInitializer {
    fn apply(&self, ty: &mut TypeBuilder, definition: &Definition) {
        let Some(parent) = &definition.extends else {
            return;
        };
        tracing::trace!(child = %ty.id(), parent = %parent.id(), "linking parent table");
        ty.link_parent(parent);
    }
}

#[cfg(test)]
mod tests {
    use crate::composition::{Definition, InitializerRegistry, TypeFactory};
    use crate::value::Value;
    use parking_lot::RwLock;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_without_parent_chain_terminates() {
        let registry = RwLock::new(InitializerRegistry::with_core());
        let factory = TypeFactory::new(&registry);
        let ty = factory.define(Definition::new()).unwrap();
        assert!(ty.superclass().is_none());
        assert!(ty.table().parent().is_none());
        assert!(ty.lookup("missing").is_none());
    }

    #[test]
    fn test_parent_initializer_not_run_by_define() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = RwLock::new(InitializerRegistry::with_core());
        let factory = TypeFactory::new(&registry);

        let parent = factory
            .define(Definition::new().constructor(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Null)
            }))
            .unwrap();
        let child = factory.define(Definition::new().extends(&parent)).unwrap();
        child.instantiate(&[]).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(child.superclass(), Some(&parent));
        assert_eq!(child.table().parent(), Some(&parent));
    }
}
