//! The resolution tower and its walk.

use crate::call::{CallInfo, ExplicitReceiverKind};
use crate::tower::{CandidateFactory, Collector, TowerGroup, TowerScopeLevel, handle_level};

/// A level together with its priority.
pub struct TowerEntry<'l, 'db> {
    pub group: TowerGroup,
    pub explicit_receiver_kind: ExplicitReceiverKind,
    pub level: Box<dyn TowerScopeLevel<'db> + 'l>,
}

impl<'l, 'db> TowerEntry<'l, 'db> {
    pub fn new(group: TowerGroup, level: impl TowerScopeLevel<'db> + 'l) -> Self {
        Self {
            group,
            explicit_receiver_kind: ExplicitReceiverKind::NoExplicitReceiver,
            level: Box::new(level),
        }
    }

    pub fn with_explicit_receiver_kind(mut self, kind: ExplicitReceiverKind) -> Self {
        self.explicit_receiver_kind = kind;
        self
    }
}

/// Levels ordered by group. Entries with equal groups keep insertion order.
#[derive(Default)]
pub struct Tower<'l, 'db> {
    entries: Vec<TowerEntry<'l, 'db>>,
}

/// Why a walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEnd {
    /// Every level was visited.
    Exhausted,
    /// A level returned `Stop`.
    LevelStop,
    /// The collector had a success at a better group than the next level.
    Pruned,
}

/// Summary of a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkReport {
    pub visited: usize,
    pub end: WalkEnd,
}

impl<'l, 'db> Tower<'l, 'db> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TowerEntry<'l, 'db>) {
        let at = self.entries.partition_point(|e| e.group <= entry.group);
        self.entries.insert(at, entry);
    }

    pub fn entries(&self) -> &[TowerEntry<'l, 'db>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visit levels from the best group to the worst, stopping as soon as
    /// no remaining level can improve on what the collector holds.
    pub fn walk(
        &self,
        collector: &mut dyn Collector<'db>,
        factory: &CandidateFactory<'_, 'db>,
        call_info: &CallInfo<'db>,
    ) -> WalkReport {
        let mut visited = 0;

        for entry in &self.entries {
            if collector.should_stop_at_group(&entry.group) {
                tracing::debug!(group = %entry.group, visited, "pruned remaining levels");
                return WalkReport {
                    visited,
                    end: WalkEnd::Pruned,
                };
            }

            visited += 1;
            let result = handle_level(
                &mut *collector,
                factory,
                call_info,
                entry.explicit_receiver_kind,
                &entry.group,
                entry.level.as_ref(),
            );
            if result.is_stop() {
                tracing::debug!(group = %entry.group, visited, "level stopped the walk");
                return WalkReport {
                    visited,
                    end: WalkEnd::LevelStop,
                };
            }
        }

        WalkReport {
            visited,
            end: WalkEnd::Exhausted,
        }
    }
}

impl<'l, 'db> Extend<TowerEntry<'l, 'db>> for Tower<'l, 'db> {
    fn extend<I: IntoIterator<Item = TowerEntry<'l, 'db>>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

impl<'l, 'db> FromIterator<TowerEntry<'l, 'db>> for Tower<'l, 'db> {
    fn from_iter<I: IntoIterator<Item = TowerEntry<'l, 'db>>>(iter: I) -> Self {
        let mut tower = Tower::new();
        tower.extend(iter);
        tower
    }
}
