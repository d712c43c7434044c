use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{CONSTRUCTOR, Definition, Initializer, InitializerRegistry, Type, TypeBuilder, TypeId};
use crate::error::{Error, Result};
use crate::function::Function;

static GLOBAL_REGISTRY: Lazy<RwLock<InitializerRegistry>> =
    Lazy::new(|| RwLock::new(InitializerRegistry::with_core()));

/// What the factory does with reserved names found in mixins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Leave reserved names out of the table without reporting them
    #[default]
    Skip,
    /// Fail `define` when a mixin declares a reserved name, or when the
    /// own members declare `constructor`
    Reject,
}

/// Assembles types by running every registered initializer over a definition
#[derive(Debug, Clone, Copy)]
pub struct TypeFactory<'r> {
    registry: &'r RwLock<InitializerRegistry>,
    policy: CollisionPolicy,
}

impl TypeFactory<'static> {
    /// A factory over the process-wide registry
    pub fn global() -> Self {
        Self::new(&GLOBAL_REGISTRY)
    }

    /// The process-wide registry, populated with the core initializers on first use
    pub fn global_registry() -> &'static RwLock<InitializerRegistry> {
        &GLOBAL_REGISTRY
    }
}

impl<'r> TypeFactory<'r> {
    /// Creates a factory over `registry` with the default collision policy
    pub fn new(registry: &'r RwLock<InitializerRegistry>) -> Self {
        Self {
            registry,
            policy: CollisionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn registry(&self) -> &'r RwLock<InitializerRegistry> {
        self.registry
    }

    /// Produces a finished type from `definition`.
    ///
    /// The registry is copied before the pipeline starts, so registrations
    /// made by an initializer only affect later calls.
    ///
    /// # Errors
    /// Returns an error only under [`CollisionPolicy::Reject`].
    pub fn define(&self, definition: Definition) -> Result<Type> {
        let pipeline = self.registry.read().snapshot();
        if self.policy == CollisionPolicy::Reject {
            validate(&definition, &pipeline)?;
        }
        Ok(assemble(definition, pipeline))
    }
}

fn validate(definition: &Definition, pipeline: &[(String, Arc<dyn Initializer>)]) -> Result<()> {
    let reserved = |name: &str| name == CONSTRUCTOR || pipeline.iter().any(|(n, _)| n == name);

    if definition.members.contains_key(CONSTRUCTOR) {
        return Err(Error::ReservedMember {
            name: CONSTRUCTOR.to_string(),
            origin: "own members".to_string(),
        });
    }
    for (index, mixin) in definition.mixins.iter().enumerate() {
        if let Some(name) = mixin.keys().find(|name| reserved(name)) {
            return Err(Error::ReservedMember {
                name: name.clone(),
                origin: format!("mixin #{index}"),
            });
        }
    }
    Ok(())
}

fn assemble(definition: Definition, pipeline: Vec<(String, Arc<dyn Initializer>)>) -> Type {
    let id = TypeId::generate();
    let reserved: Arc<[String]> = pipeline.iter().map(|(name, _)| name.clone()).collect();
    let initializer = definition.constructor.clone().unwrap_or_else(Function::noop);
    tracing::debug!(ty = %id, initializers = ?reserved, "defining type");

    let inner = Arc::new_cyclic(|this| {
        let mut builder = TypeBuilder::new(id, initializer, reserved.clone(), this.clone());
        for (name, initializer) in &pipeline {
            tracing::trace!(ty = %id, initializer = %name, "applying initializer");
            initializer.apply(&mut builder, &definition);
        }
        builder.finish()
    });
    Type::from_inner(inner)
}

/// Defines a type through the process-wide registry.
///
/// Reserved names in mixins are skipped silently, so this never fails.
pub fn define(definition: Definition) -> Type {
    let pipeline = GLOBAL_REGISTRY.read().snapshot();
    assemble(definition, pipeline)
}

/// Appends an initializer to the process-wide registry.
///
/// Only types defined after this call observe it.
pub fn register_initializer(name: impl Into<String>, initializer: impl Initializer + 'static) {
    GLOBAL_REGISTRY.write().register(name, initializer);
}
