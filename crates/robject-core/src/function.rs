//! Shared callables used as constructors and members.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::instance::Instance;
use crate::value::Value;

type Callable = dyn Fn(&mut Instance, &[Value]) -> Result<Value> + Send + Sync;

/// A function invoked with a receiver instance and an argument list
///
/// Cloning is cheap and clones compare equal under [`Function::ptr_eq`].
#[derive(Clone)]
pub struct Function(Arc<Callable>);

impl Function {
    /// Wraps a closure as a function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A function that does nothing and returns `Null`
    pub fn noop() -> Self {
        Self::new(|_, _| Ok(Value::Null))
    }

    /// Invokes the function on `receiver`
    pub fn call(&self, receiver: &mut Instance, args: &[Value]) -> Result<Value> {
        (self.0)(receiver, args)
    }

    /// Returns true if both handles point to the same callable
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Fixes the leading argument positions to `leading`.
    ///
    /// Call arguments that fall in a bound position are dropped; only the
    /// arguments past the bound ones are appended. A call with no more
    /// arguments than were bound receives exactly the bound arguments.
    pub fn bind(&self, leading: Vec<Value>) -> Function {
        let inner = self.clone();
        Function::new(move |receiver, args| {
            if args.len() > leading.len() {
                let mut merged = leading.clone();
                merged.extend_from_slice(&args[leading.len()..]);
                inner.call(receiver, &merged)
            } else {
                inner.call(receiver, &leading)
            }
        })
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Arc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{Definition, define};

    fn collect_args() -> Function {
        Function::new(|_, args| Ok(Value::List(args.to_vec())))
    }

    #[test]
    fn test_bind_fixes_leading_positions() {
        let ty = define(Definition::new());
        let mut instance = ty.instantiate(&[]).unwrap();
        let bound = collect_args().bind(vec![Value::Int(1), Value::Int(2)]);

        let result = bound
            .call(
                &mut instance,
                &[Value::Int(10), Value::Int(20), Value::Int(30)],
            )
            .unwrap();
        assert_eq!(
            result,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(30)])
        );
    }

    #[test]
    fn test_bind_with_short_call() {
        let ty = define(Definition::new());
        let mut instance = ty.instantiate(&[]).unwrap();
        let bound = collect_args().bind(vec![Value::Int(1)]);

        let result = bound.call(&mut instance, &[Value::Int(9)]).unwrap();
        assert_eq!(result, Value::List(vec![Value::Int(1)]));
        let result = bound.call(&mut instance, &[]).unwrap();
        assert_eq!(result, Value::List(vec![Value::Int(1)]));
    }

    #[test]
    fn test_ptr_eq() {
        let f = Function::noop();
        assert!(f.ptr_eq(&f.clone()));
        assert!(!f.ptr_eq(&Function::noop()));
    }
}
