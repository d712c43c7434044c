//! Shared utilities for RObject: configuration, namespaces and sessions.

pub mod config;
pub mod namespace;
pub mod session;

pub use config::Config;
pub use namespace::{Entry, Namespace, NamespaceError};
pub use session::{FileBackend, MemoryBackend, Session, SessionBackend};
