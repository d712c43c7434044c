use super::{Definition, Initializer, TypeBuilder};
use crate::value::MemberMap;

/// Merges own members and mixins into the new type's table
///
/// Sources are applied in order: the definition's own members first, then
/// each mixin as listed. Later sources overwrite earlier ones, so every mixin
/// wins over an own member of the same name. Reserved names are skipped in
/// every source. The `constructor` entry is bound to the new type last.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixinsInitializer;

impl MixinsInitializer {
    pub const NAME: &'static str = "mixins";

    fn merge(ty: &mut TypeBuilder, source: &MemberMap) {
        for (name, value) in source {
            if ty.is_reserved(name) {
                tracing::trace!(ty = %ty.id(), member = %name, "skipping reserved member");
                continue;
            }
            tracing::trace!(ty = %ty.id(), member = %name, "copying member");
            ty.table_mut().insert(name.clone(), value.clone());
        }
    }
}

impl Initializer for MixinsInitializer {
    fn apply(&self, ty: &mut TypeBuilder, definition: &Definition) {
        let sources = std::iter::once(&definition.members).chain(&definition.mixins);
        for source in sources {
            Self::merge(ty, source);
        }
        ty.bind_constructor();
    }
}
