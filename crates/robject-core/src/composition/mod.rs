//! Type composition for RObject
//!
//! This module assembles types from declarative definitions:
//! - Ordered, extensible initializer registry
//! - Inheritance without running the parent's constructor
//! - Member merging from own members and mixins
//! - Explicit member tables with chained lookup
mod definition;
mod extends;
mod factory;
mod member_table;
mod mixins;
mod object_type;
mod registry;
mod type_id;

pub use definition::Definition;
pub use extends::ExtendsInitializer;
pub use factory::{CollisionPolicy, TypeFactory, define, register_initializer};
pub use member_table::MemberTable;
pub use mixins::MixinsInitializer;
pub use object_type::{Type, TypeBuilder};
pub use registry::{Initializer, InitializerRegistry};
pub use type_id::TypeId;

/// Name of the member that always resolves to the owning type
pub const CONSTRUCTOR: &str = "constructor";
