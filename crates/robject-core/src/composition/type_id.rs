use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(TypeId::FIRST);

/// Unique identifier for types produced by the factory
///
/// TypeId is a lightweight, copyable identifier used in diagnostics and for
/// telling types apart without holding on to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u64);

impl TypeId {
    /// Creates a TypeId from a raw value
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw u64 value
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// First identifier handed out by [`TypeId::generate`]
    pub const FIRST: u64 = 1;

    /// Generates a new process-unique TypeId
    pub fn generate() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type#{}", self.0)
    }
}
