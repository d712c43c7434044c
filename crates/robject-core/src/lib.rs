//! Core object model for RObject.
//!
//! This crate provides dynamic values, the initializer pipeline that assembles
//! types from declarative definitions, and the instances those types produce.

pub mod composition;
pub mod error;
pub mod function;
pub mod instance;
pub mod value;

pub use composition::{
    CollisionPolicy, Definition, Initializer, InitializerRegistry, MemberTable, Type,
    TypeBuilder, TypeFactory, TypeId, define, register_initializer,
};
pub use error::{Error, Result};
pub use function::Function;
pub use instance::Instance;
pub use value::{MemberMap, Value};
