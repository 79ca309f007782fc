//! Candidate collection.

use std::fmt;

use crate::tower::stages::ResolutionStageRunner;
use crate::tower::{Candidate, ResolutionContext, TowerGroup};

/// How well a candidate fits the call, from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CandidateApplicability {
    /// Declared but not accessible here.
    Hidden,
    WrongReceiver,
    ParameterMappingError,
    Inapplicable,
    /// Applicable only if a nullable receiver were non-null.
    UnsafeCall,
    ResolvedLowPriority,
    Resolved,
}

impl CandidateApplicability {
    pub fn is_success(self) -> bool {
        self >= CandidateApplicability::ResolvedLowPriority
    }
}

impl fmt::Display for CandidateApplicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CandidateApplicability::Hidden => "hidden",
            CandidateApplicability::WrongReceiver => "wrong receiver",
            CandidateApplicability::ParameterMappingError => "parameter mapping error",
            CandidateApplicability::Inapplicable => "inapplicable",
            CandidateApplicability::UnsafeCall => "unsafe call",
            CandidateApplicability::ResolvedLowPriority => "resolved with low priority",
            CandidateApplicability::Resolved => "resolved",
        };
        f.write_str(text)
    }
}

/// Accumulates candidates over a tower walk.
pub trait Collector<'db> {
    /// Judge `candidate`, found at `group`, and keep it if it is among the best.
    fn consume_candidate(
        &mut self,
        group: &TowerGroup,
        candidate: Candidate<'db>,
        context: ResolutionContext<'_, 'db>,
    ) -> CandidateApplicability;

    /// Whether a successful candidate has been kept.
    fn is_success(&self) -> bool;

    /// Whether levels at `group` can no longer change the outcome.
    fn should_stop_at_group(&self, group: &TowerGroup) -> bool;
}

/// Keeps every candidate that ties for the best applicability at the best group.
///
/// A better applicability always wins; among equal applicabilities the smaller
/// group wins.
pub struct CandidateCollector<'db> {
    runner: ResolutionStageRunner,
    candidates: Vec<Candidate<'db>>,
    applicability: CandidateApplicability,
    best_group: TowerGroup,
}

impl<'db> Default for CandidateCollector<'db> {
    fn default() -> Self {
        Self::new(ResolutionStageRunner)
    }
}

impl<'db> CandidateCollector<'db> {
    pub fn new(runner: ResolutionStageRunner) -> Self {
        Self {
            runner,
            candidates: Vec::new(),
            applicability: CandidateApplicability::Hidden,
            best_group: TowerGroup::last(),
        }
    }

    pub fn candidates(&self) -> &[Candidate<'db>] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<Candidate<'db>> {
        self.candidates
    }

    pub fn current_applicability(&self) -> CandidateApplicability {
        self.applicability
    }

    pub fn best_group(&self) -> &TowerGroup {
        &self.best_group
    }
}

impl<'db> Collector<'db> for CandidateCollector<'db> {
    fn consume_candidate(
        &mut self,
        group: &TowerGroup,
        candidate: Candidate<'db>,
        context: ResolutionContext<'_, 'db>,
    ) -> CandidateApplicability {
        let applicability = self.runner.process_candidate(&candidate, context);

        if applicability > self.applicability
            || (applicability == self.applicability && *group < self.best_group)
        {
            self.candidates.clear();
            self.applicability = applicability;
            self.best_group = group.clone();
        }

        if applicability == self.applicability && *group == self.best_group {
            tracing::debug!(
                candidate = %candidate.declaration.id(),
                %group,
                %applicability,
                "kept candidate"
            );
            self.candidates.push(candidate);
        } else {
            tracing::trace!(
                candidate = %candidate.declaration.id(),
                %group,
                %applicability,
                "discarded candidate"
            );
        }

        applicability
    }

    fn is_success(&self) -> bool {
        self.applicability.is_success()
    }

    fn should_stop_at_group(&self, group: &TowerGroup) -> bool {
        self.is_success() && self.best_group < *group
    }
}
