//! Call-site information.

use belfry_core::{Name, PackagePath};
use belfry_types::{ClassId, Type};

/// The syntactic shape of the reference being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `x` or `a.x`: a property, or an object used as a value.
    VariableAccess,
    /// `f(...)` or `a.f(...)`.
    Function,
    /// `::f` or `A::f`: either a function or a property.
    CallableReference,
}

/// The receiver written before the dot, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExplicitReceiver<'db> {
    /// An ordinary expression of the given type.
    Expression { ty: Type<'db> },
    /// A package or class name used as a qualifier (`core.max`, `Color.RED`).
    ResolvedQualifier {
        package: PackagePath,
        class: Option<ClassId<'db>>,
    },
}

impl<'db> ExplicitReceiver<'db> {
    pub fn is_resolved_qualifier(&self) -> bool {
        matches!(self, ExplicitReceiver::ResolvedQualifier { .. })
    }
}

/// Everything known about the call site for one resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallInfo<'db> {
    pub name: Name,
    pub kind: CallKind,
    pub explicit_receiver: Option<ExplicitReceiver<'db>>,
    /// Argument types, in positional order. Only consulted for function calls.
    pub arguments: Vec<Type<'db>>,
}

impl<'db> CallInfo<'db> {
    pub fn new(kind: CallKind, name: Name) -> Self {
        Self {
            name,
            kind,
            explicit_receiver: None,
            arguments: Vec::new(),
        }
    }

    pub fn variable(name: Name) -> Self {
        Self::new(CallKind::VariableAccess, name)
    }

    pub fn function(name: Name, arguments: Vec<Type<'db>>) -> Self {
        Self {
            arguments,
            ..Self::new(CallKind::Function, name)
        }
    }

    pub fn callable_reference(name: Name) -> Self {
        Self::new(CallKind::CallableReference, name)
    }

    pub fn with_explicit_receiver(mut self, receiver: ExplicitReceiver<'db>) -> Self {
        self.explicit_receiver = Some(receiver);
        self
    }
}

/// How the explicit receiver participates in a particular candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExplicitReceiverKind {
    #[default]
    NoExplicitReceiver,
    DispatchReceiver,
    ExtensionReceiver,
    BothReceivers,
}

impl ExplicitReceiverKind {
    pub fn is_dispatch(self) -> bool {
        matches!(
            self,
            ExplicitReceiverKind::DispatchReceiver | ExplicitReceiverKind::BothReceivers
        )
    }
}
