//! Instances of composed types.

use crate::composition::{CONSTRUCTOR, Type};
use crate::error::{Error, Result};
use crate::function::Function;
use crate::value::{MemberMap, Value};

/// An instance of a [`Type`]
///
/// Member resolution checks the instance's own fields first, then the
/// type's member table chain.
#[derive(Debug, Clone)]
pub struct Instance {
    ty: Type,
    fields: MemberMap,
}

impl Instance {
    pub(crate) fn new(ty: Type) -> Self {
        Self {
            ty,
            fields: MemberMap::new(),
        }
    }

    /// Returns the type this instance was created from
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Fields assigned directly on this instance
    pub fn fields(&self) -> &MemberMap {
        &self.fields
    }

    /// Resolves `name` against the fields and then the type's table chain
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields
            .get(name)
            .cloned()
            .or_else(|| self.ty.lookup(name))
    }

    /// Assigns an own field, shadowing any member of the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.ty.table().contains(name)
    }

    /// Returns true if the instance was created from `ty` or a subtype of it
    pub fn is_instance_of(&self, ty: &Type) -> bool {
        self.ty.is_subtype_of(ty)
    }

    /// Calls the member `name` with this instance as receiver.
    ///
    /// # Errors
    /// Returns an error if the member does not resolve or is not callable,
    /// or whatever the member itself returns.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let member = self.get(name).ok_or_else(|| Error::UnknownMember {
            name: name.to_string(),
            ty: self.ty.id(),
        })?;
        self.invoke(name, &member, args)
    }

    /// Calls the superclass version of `name` on this instance.
    ///
    /// `from` is the type whose code is running. Resolution starts at its
    /// superclass, so the call keeps working from deeper subclasses.
    /// Calling `constructor` runs the superclass initializer.
    ///
    /// # Errors
    /// Returns [`Error::NoSuperclass`] if `from` has no superclass.
    pub fn call_super(&mut self, from: &Type, name: &str, args: &[Value]) -> Result<Value> {
        let parent = from
            .superclass()
            .ok_or(Error::NoSuperclass { ty: from.id() })?
            .clone();
        if name == CONSTRUCTOR {
            return parent.construct(self, args);
        }
        let member = parent.lookup(name).ok_or_else(|| Error::UnknownMember {
            name: name.to_string(),
            ty: parent.id(),
        })?;
        self.invoke(name, &member, args)
    }

    /// Resolves a function member and fixes its leading arguments
    ///
    /// # Errors
    /// Returns an error if the member is missing or is not a function.
    pub fn bind_member(&self, name: &str, leading: Vec<Value>) -> Result<Function> {
        match self.get(name) {
            Some(Value::Function(function)) => Ok(function.bind(leading)),
            Some(other) => Err(Error::NotCallable {
                name: name.to_string(),
                ty: self.ty.id(),
                kind: other.kind_name(),
            }),
            None => Err(Error::UnknownMember {
                name: name.to_string(),
                ty: self.ty.id(),
            }),
        }
    }

    /// Calls `name` on every instance that resolves it, skipping the rest.
    ///
    /// # Errors
    /// Stops at and returns the first error raised by a call.
    pub fn invoke_all(instances: &mut [Instance], name: &str, args: &[Value]) -> Result<()> {
        for instance in instances.iter_mut() {
            if let Some(member) = instance.get(name) {
                instance.invoke(name, &member, args)?;
            }
        }
        Ok(())
    }

    fn invoke(&mut self, name: &str, member: &Value, args: &[Value]) -> Result<Value> {
        match member {
            Value::Function(function) => function.call(self, args),
            Value::Type(ty) => ty.construct(self, args),
            other => Err(Error::NotCallable {
                name: name.to_string(),
                ty: self.ty.id(),
                kind: other.kind_name(),
            }),
        }
    }
}
