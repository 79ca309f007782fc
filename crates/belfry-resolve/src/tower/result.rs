//! Continuation signal returned by level queries.

use std::ops::{Add, AddAssign};

/// What a level query found, and whether the walk may go on.
///
/// Results of several queries merge with `+`. The merge is associative and
/// commutative, `NotFound` is its identity and `Stop` absorbs everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcessResult {
    /// Nothing matched.
    #[default]
    NotFound,
    /// Something matched; outer levels may still contribute.
    Found,
    /// Something matched and no outer level may be consulted.
    Stop,
}

impl ProcessResult {
    pub fn merge(self, other: ProcessResult) -> ProcessResult {
        self.max(other)
    }

    pub fn is_found(self) -> bool {
        self != ProcessResult::NotFound
    }

    pub fn is_stop(self) -> bool {
        self == ProcessResult::Stop
    }
}

impl Add for ProcessResult {
    type Output = ProcessResult;

    fn add(self, rhs: ProcessResult) -> ProcessResult {
        self.merge(rhs)
    }
}

impl AddAssign for ProcessResult {
    fn add_assign(&mut self, rhs: ProcessResult) {
        *self = self.merge(rhs);
    }
}
