//! Priority groups of tower levels.
//!
//! A [`TowerGroup`] is a path of [`TowerGroupKind`]s. Groups compare
//! lexicographically by kind, and a group sorts before every group it is a
//! proper prefix of. Levels are walked from the smallest group to the largest,
//! and a successful candidate at group `g` makes every level with a group
//! strictly greater than `g` irrelevant.

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

/// Priority among import scopes of the same depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportPriority {
    Explicit,
    Package,
    Star,
    Default,
}

/// One step of a tower group path. Declaration order is priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TowerGroupKind {
    Start,
    ClassifierPrioritized,
    Qualifier,
    Classifier,
    TopPrioritized(u32),
    /// A local scope; depth 0 is the innermost.
    Local(u32),
    Member,
    /// An implicit receiver or a non-local scope; depth 0 is the innermost.
    ImplicitOrNonLocal(u32),
    Import(ImportPriority),
    InvokeExtension,
    QualifierValue,
    Last,
}

/// Tie-breaker between groups with equal paths, used for `invoke` conventions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvokeResolvePriority {
    #[default]
    None,
    InvokeReceiver,
    CommonInvoke,
    InvokeExtension,
}

/// A totally ordered priority assigned to a tower level.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TowerGroup {
    kinds: SmallVec<[TowerGroupKind; 4]>,
    invoke_resolve_priority: InvokeResolvePriority,
}

impl TowerGroup {
    /// The empty path: sorts before every other group.
    pub fn empty() -> Self {
        Self {
            kinds: SmallVec::new(),
            invoke_resolve_priority: InvokeResolvePriority::None,
        }
    }

    pub fn of(kind: TowerGroupKind) -> Self {
        Self::empty().then(kind)
    }

    pub fn start() -> Self {
        Self::of(TowerGroupKind::Start)
    }

    pub fn local(depth: u32) -> Self {
        Self::of(TowerGroupKind::Local(depth))
    }

    pub fn member() -> Self {
        Self::of(TowerGroupKind::Member)
    }

    pub fn implicit(depth: u32) -> Self {
        Self::of(TowerGroupKind::ImplicitOrNonLocal(depth))
    }

    pub fn import(priority: ImportPriority) -> Self {
        Self::of(TowerGroupKind::Import(priority))
    }

    pub fn last() -> Self {
        Self::of(TowerGroupKind::Last)
    }

    /// Extend the path by one kind.
    pub fn then(mut self, kind: TowerGroupKind) -> Self {
        self.kinds.push(kind);
        self
    }

    pub fn with_invoke_priority(mut self, priority: InvokeResolvePriority) -> Self {
        self.invoke_resolve_priority = priority;
        self
    }

    pub fn kinds(&self) -> &[TowerGroupKind] {
        &self.kinds
    }

    pub fn invoke_resolve_priority(&self) -> InvokeResolvePriority {
        self.invoke_resolve_priority
    }
}

impl Display for TowerGroupKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TowerGroupKind::TopPrioritized(depth) => write!(f, "TopPrioritized({depth})"),
            TowerGroupKind::Local(depth) => write!(f, "Local({depth})"),
            TowerGroupKind::ImplicitOrNonLocal(depth) => write!(f, "Implicit({depth})"),
            TowerGroupKind::Import(priority) => write!(f, "Import({priority:?})"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl Display for TowerGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.kinds.is_empty() {
            f.write_str("Empty")?;
        }
        for (i, kind) in self.kinds.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{kind}")?;
        }
        if self.invoke_resolve_priority != InvokeResolvePriority::None {
            write!(f, " [{:?}]", self.invoke_resolve_priority)?;
        }
        Ok(())
    }
}
