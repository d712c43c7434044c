use std::fmt;
use std::sync::{Arc, Weak};

use super::{CONSTRUCTOR, MemberTable, TypeId};
use crate::error::Result;
use crate::function::Function;
use crate::instance::Instance;
use crate::value::Value;

pub(crate) struct TypeInner {
    id: TypeId,
    initializer: Function,
    table: MemberTable,
    superclass: Option<Type>,
}

/// A type produced by the factory
///
/// A type pairs its instance initializer with exactly one [`MemberTable`]
/// and optionally a superclass. Handles are cheap to clone and compare by
/// identity.
#[derive(Clone)]
pub struct Type(Arc<TypeInner>);

impl Type {
    pub(crate) fn from_inner(inner: Arc<TypeInner>) -> Self {
        Self(inner)
    }

    /// Returns the unique id of this type
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    /// Returns the member table instances resolve against
    pub fn table(&self) -> &MemberTable {
        &self.0.table
    }

    /// Returns the type this one was defined to extend
    pub fn superclass(&self) -> Option<&Type> {
        self.0.superclass.as_ref()
    }

    /// Resolves a member along the table chain
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.0.table.lookup(name)
    }

    /// Runs this type's initializer on an existing receiver.
    ///
    /// This is how a child constructor explicitly reuses its parent's.
    pub fn construct(&self, receiver: &mut Instance, args: &[Value]) -> Result<Value> {
        self.0.initializer.call(receiver, args)
    }

    /// Creates a new instance and runs the initializer on it
    pub fn instantiate(&self, args: &[Value]) -> Result<Instance> {
        let mut instance = Instance::new(self.clone());
        self.construct(&mut instance, args)?;
        Ok(instance)
    }

    /// Returns true if `ancestor` is this type or one of its superclasses
    pub fn is_subtype_of(&self, ancestor: &Type) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty == ancestor {
                return true;
            }
            current = ty.superclass();
        }
        false
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("id", &self.0.id)
            .field("table", &self.0.table)
            .field("superclass", &self.0.superclass.as_ref().map(Type::id))
            .finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.id)
    }
}

/// A type in the middle of its pass through the initializer pipeline
///
/// Initializers receive the builder mutably and shape the table and the
/// parent linkage. The builder is consumed when the pipeline finishes.
pub struct TypeBuilder {
    id: TypeId,
    initializer: Function,
    table: MemberTable,
    superclass: Option<Type>,
    reserved: Arc<[String]>,
    this: Weak<TypeInner>,
}

impl TypeBuilder {
    pub(crate) fn new(
        id: TypeId,
        initializer: Function,
        reserved: Arc<[String]>,
        this: Weak<TypeInner>,
    ) -> Self {
        Self {
            id,
            initializer,
            table: MemberTable::new(),
            superclass: None,
            reserved,
            this,
        }
    }

    /// Returns the id the finished type will carry
    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn table(&self) -> &MemberTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut MemberTable {
        &mut self.table
    }

    /// Chains the table to `parent`'s table and records the superclass.
    ///
    /// The parent's initializer is never run.
    pub fn link_parent(&mut self, parent: &Type) {
        self.table.set_parent(parent.clone());
        self.superclass = Some(parent.clone());
    }

    /// Points the table's `constructor` entry at the type being built
    pub fn bind_constructor(&mut self) {
        self.table.bind_constructor(self.this.clone());
    }

    /// Returns true if `name` is `constructor` or a registered initializer
    pub fn is_reserved(&self, name: &str) -> bool {
        name == CONSTRUCTOR || self.reserved.iter().any(|reserved| reserved == name)
    }

    pub(crate) fn finish(self) -> TypeInner {
        TypeInner {
            id: self.id,
            initializer: self.initializer,
            table: self.table,
            superclass: self.superclass,
        }
    }
}

impl fmt::Debug for TypeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBuilder")
            .field("id", &self.id)
            .field("table", &self.table)
            .field("reserved", &self.reserved)
            .finish()
    }
}
