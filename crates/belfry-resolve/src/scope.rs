//! Scopes: named, immutable bags of declarations.

use std::sync::Arc;

use belfry_core::Name;

use crate::declaration::Declaration;

/// What kind of source construct a scope stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// A block or function body.
    Local,
    /// Top-level declarations of the current package.
    Package,
    /// Members of a class and its supertypes.
    Member,
    ExplicitImport,
    StarImport,
    DefaultImport,
}

/// A scope. Shared between levels via `Arc` and never mutated after construction.
#[derive(Debug, PartialEq, Eq)]
pub struct Scope<'db> {
    pub name: Name,
    pub kind: ScopeKind,
    /// A match in this scope ends the walk: outer levels are not consulted.
    pub hides_outer: bool,
    declarations: Vec<Declaration<'db>>,
}

impl<'db> Scope<'db> {
    pub fn new(name: Name, kind: ScopeKind, declarations: Vec<Declaration<'db>>) -> Self {
        Self {
            name,
            kind,
            hides_outer: false,
            declarations,
        }
    }

    pub fn hiding_outer(mut self) -> Self {
        self.hides_outer = true;
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn declarations(&self) -> &[Declaration<'db>] {
        &self.declarations
    }

    /// Declarations named `name`, in declaration order.
    pub fn declarations_named(&self, name: Name) -> impl Iterator<Item = &Declaration<'db>> {
        self.declarations.iter().filter(move |d| d.name() == name)
    }
}
