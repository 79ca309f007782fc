//! Member scopes of classes.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use belfry_types::{ClassId, ClassTable};

use crate::declaration::Declaration;
use crate::scope::{Scope, ScopeKind};

/// Declared members of every class, keyed by the declaring class.
#[derive(Clone, Debug, Default)]
pub struct MemberIndex<'db> {
    members: HashMap<ClassId<'db>, Vec<Declaration<'db>>>,
}

impl<'db> MemberIndex<'db> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member declared directly in `class`.
    pub fn declare(&mut self, class: ClassId<'db>, member: Declaration<'db>) {
        self.members.entry(class).or_default().push(member);
    }

    pub fn declared_in(&self, class: ClassId<'db>) -> &[Declaration<'db>] {
        self.members.get(&class).map(Vec::as_slice).unwrap_or_default()
    }

    /// Build the member scope of `class`: its own members followed by inherited
    /// ones, nearest superclass first.
    ///
    /// A member overridden closer to `class` hides the inherited declaration.
    pub fn member_scope(
        &self,
        db: &'db dyn salsa::Database,
        classes: &ClassTable<'db>,
        class: ClassId<'db>,
    ) -> Arc<Scope<'db>> {
        let mut seen = HashSet::new();
        let mut declarations = Vec::new();

        for owner in classes.superclasses(db, class) {
            for member in self.declared_in(owner) {
                if seen.insert(member.override_key()) {
                    declarations.push(member.clone());
                }
            }
        }

        tracing::trace!(
            class = %class.qualified_name(db),
            members = declarations.len(),
            "built member scope"
        );
        Scope::new(class.name(db), ScopeKind::Member, declarations).into_shared()
    }
}
