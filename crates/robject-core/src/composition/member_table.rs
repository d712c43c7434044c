use std::fmt;
use std::sync::Weak;

use super::CONSTRUCTOR;
use super::object_type::{Type, TypeInner};
use crate::value::{MemberMap, Value};

/// Named behaviors of a type, chained to the parent type's table
///
/// Lookup checks this table's own members first and then walks the parent
/// links upward. The `constructor` entry is not stored in the member map:
/// once bound it always answers with the type that owns the table.
#[derive(Clone, Default)]
pub struct MemberTable {
    members: MemberMap,
    parent: Option<Type>,
    constructor: Option<Weak<TypeInner>>,
}

impl MemberTable {
    /// Creates an empty table with no parent link
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the type whose table this table is chained to
    pub fn parent(&self) -> Option<&Type> {
        self.parent.as_ref()
    }

    pub(crate) fn set_parent(&mut self, parent: Type) {
        self.parent = Some(parent);
    }

    pub(crate) fn bind_constructor(&mut self, owner: Weak<TypeInner>) {
        self.constructor = Some(owner);
    }

    /// Inserts or overwrites an own member, returning the previous value.
    ///
    /// `constructor` is never stored; it only resolves through the bound
    /// owner, so inserting it is ignored and returns `None`.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        if name == CONSTRUCTOR {
            tracing::trace!("ignoring direct insert of `{CONSTRUCTOR}`");
            return None;
        }
        self.members.insert(name, value)
    }

    /// Looks up a member declared directly on this table
    pub fn get_own(&self, name: &str) -> Option<Value> {
        if name == CONSTRUCTOR
            && let Some(owner) = self.constructor.as_ref().and_then(Weak::upgrade)
        {
            return Some(Value::Type(Type::from_inner(owner)));
        }
        self.members.get(name).cloned()
    }

    /// Looks up a member, searching this table and then every parent table
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.get_own(name) {
            return Some(value);
        }
        let mut current = self.parent.clone();
        while let Some(ty) = current {
            if let Some(value) = ty.table().get_own(name) {
                return Some(value);
            }
            current = ty.table().parent.clone();
        }
        None
    }

    /// Returns true if `name` resolves anywhere along the chain
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Returns true if this table answers `constructor` itself
    pub fn has_own_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Own members in insertion order, excluding `constructor`
    pub fn own_members(&self) -> &MemberMap {
        &self.members
    }

    /// Applies `callback` to every own member in insertion order
    pub fn each_own(&self, mut callback: impl FnMut(&str, &Value)) {
        for (name, value) in &self.members {
            callback(name, value);
        }
    }

    /// Number of own members, excluding `constructor`
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for MemberTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberTable")
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .field("parent", &self.parent.as_ref().map(Type::id))
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

impl fmt::Display for MemberTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constructor.is_some() {
            writeln!(f, "{CONSTRUCTOR} -> self")?;
        }
        for (name, value) in &self.members {
            writeln!(f, "{name}: {value}")?;
        }
        if self.parent.is_some() {
            writeln!(f, "parent -> linked")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut table = MemberTable::new();
        assert!(table.insert("x", Value::Int(1)).is_none());
        assert_eq!(table.insert("x", Value::Int(2)), Some(Value::Int(1)));
        assert_eq!(table.get_own("x"), Some(Value::Int(2)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_ignores_constructor() {
        let mut table = MemberTable::new();
        assert!(table.insert(CONSTRUCTOR, Value::Int(1)).is_none());
        assert!(table.own_members().is_empty());
        assert!(table.get_own(CONSTRUCTOR).is_none());
        assert_eq!(table.to_string(), "");
    }

    #[test]
    fn test_unbound_constructor_is_absent() {
        let table = MemberTable::new();
        assert!(!table.has_own_constructor());
        assert!(table.lookup(CONSTRUCTOR).is_none());
    }

    #[test]
    fn test_each_own_preserves_order() {
        let mut table = MemberTable::new();
        table.insert("b", Value::Int(1));
        table.insert("a", Value::Int(2));
        let mut names = Vec::new();
        table.each_own(|name, _| names.push(name.to_string()));
        assert_eq!(names, vec!["b", "a"]);
    }
}
