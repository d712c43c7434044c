//! Error types and result aliases for the RObject runtime.

use miette::Diagnostic;
use thiserror::Error;

use crate::composition::TypeId;

/// Main error type for the RObject runtime.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("member `{name}` is not defined on {ty}")]
    #[diagnostic(code(robject::member))]
    UnknownMember { name: String, ty: TypeId },

    #[error("member `{name}` on {ty} is a {kind}, not a function")]
    #[diagnostic(code(robject::member))]
    NotCallable {
        name: String,
        ty: TypeId,
        kind: &'static str,
    },

    #[error("{ty} has no superclass")]
    #[diagnostic(code(robject::member), help("only types defined with `extends` can call super"))]
    NoSuperclass { ty: TypeId },

    #[error("definition declares reserved member `{name}` in {origin}")]
    #[diagnostic(
        code(robject::definition),
        help("reserved names are `constructor` and every registered initializer")
    )]
    ReservedMember { name: String, origin: String },
}

/// Result type alias using the RObject Error type.
pub type Result<T> = std::result::Result<T, Error>;
