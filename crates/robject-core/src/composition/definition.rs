use super::Type;
use crate::function::Function;
use crate::value::{MemberMap, Value};

/// Declarative description of a type to produce
///
/// The three pipeline keys are explicit fields; everything else lives in
/// `members`. Custom initializers read their own keys from `members` by
/// the name they are registered under.
#[derive(Debug, Clone, Default)]
pub struct Definition {
    /// Initializes new instances
    pub constructor: Option<Function>,
    /// Parent type whose members are inherited
    pub extends: Option<Type>,
    /// Member maps merged after the own members, in order
    pub mixins: Vec<MemberMap>,
    /// Own members
    pub members: MemberMap,
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instance initializer
    #[must_use]
    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut crate::Instance, &[Value]) -> crate::Result<Value> + Send + Sync + 'static,
    {
        self.constructor = Some(Function::new(f));
        self
    }

    /// Sets the parent type
    #[must_use]
    pub fn extends(mut self, parent: &Type) -> Self {
        self.extends = Some(parent.clone());
        self
    }

    /// Appends a mixin
    #[must_use]
    pub fn mixin(mut self, mixin: MemberMap) -> Self {
        self.mixins.push(mixin);
        self
    }

    /// Declares an own member
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }

    /// Declares an own method
    #[must_use]
    pub fn method<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut crate::Instance, &[Value]) -> crate::Result<Value> + Send + Sync + 'static,
    {
        self.member(name, Function::new(f))
    }

    /// Looks up a key among the own members
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }
}
