//! The result of resolving one call.

use belfry_core::{Diagnostic, DiagnosticKind, Name};

use crate::tower::{Candidate, CandidateApplicability, CandidateCollector};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionOutcome<'db> {
    /// Exactly one successful candidate.
    Resolved(Candidate<'db>),
    /// Several successful candidates; picking the most specific one is up to
    /// the caller.
    Ambiguous(Vec<Candidate<'db>>),
    /// Candidates were found but none of them fits.
    Inapplicable {
        applicability: CandidateApplicability,
        candidates: Vec<Candidate<'db>>,
    },
    Unresolved,
}

impl<'db> ResolutionOutcome<'db> {
    pub fn from_collector(collector: CandidateCollector<'db>) -> Self {
        let applicability = collector.current_applicability();
        let mut candidates = collector.into_candidates();

        if candidates.is_empty() {
            return ResolutionOutcome::Unresolved;
        }
        if !applicability.is_success() {
            return ResolutionOutcome::Inapplicable {
                applicability,
                candidates,
            };
        }
        if candidates.len() == 1 {
            ResolutionOutcome::Resolved(candidates.remove(0))
        } else {
            ResolutionOutcome::Ambiguous(candidates)
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    pub fn candidates(&self) -> &[Candidate<'db>] {
        match self {
            ResolutionOutcome::Resolved(candidate) => std::slice::from_ref(candidate),
            ResolutionOutcome::Ambiguous(candidates)
            | ResolutionOutcome::Inapplicable { candidates, .. } => candidates,
            ResolutionOutcome::Unresolved => &[],
        }
    }

    /// The error to report for this outcome, if any.
    pub fn diagnostic(&self, name: Name) -> Option<Diagnostic> {
        let diagnostic = match self {
            ResolutionOutcome::Resolved(_) => return None,
            ResolutionOutcome::Unresolved => Diagnostic::error(
                DiagnosticKind::UnresolvedReference,
                format!("unresolved reference `{name}`"),
            ),
            ResolutionOutcome::Ambiguous(candidates) => Diagnostic::error(
                DiagnosticKind::Ambiguity,
                format!(
                    "ambiguous reference `{name}`: {}",
                    candidate_list(candidates)
                ),
            ),
            ResolutionOutcome::Inapplicable {
                applicability,
                candidates,
            } => {
                let kind = match applicability {
                    CandidateApplicability::Hidden => DiagnosticKind::Invisible,
                    CandidateApplicability::UnsafeCall => DiagnosticKind::UnsafeCall,
                    _ => DiagnosticKind::InapplicableCandidate,
                };
                Diagnostic::error(
                    kind,
                    format!(
                        "no applicable candidate for `{name}` ({applicability}): {}",
                        candidate_list(candidates)
                    ),
                )
            }
        };
        Some(diagnostic)
    }
}

fn candidate_list(candidates: &[Candidate<'_>]) -> String {
    candidates
        .iter()
        .map(|c| c.declaration.id().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
