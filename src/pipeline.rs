//! Resolving the calls of a scenario and rendering the results.
//!
//! ```text
//! Scenario
//!     │
//!     ├── resolve_scenario → Vec<CallReport>
//!     │       ├── render_text
//!     │       └── render_json
//!     │
//!     └── render_tower
//! ```

use std::fmt::Write as _;

use belfry_core::Diagnostic;
use belfry_resolve::tower::{Candidate, ResolutionContext, WalkEnd, WalkReport};
use belfry_resolve::{ExplicitReceiverKind, ResolutionOutcome, resolve_call};
use belfry_types::TypeChecker;
use serde::Serialize;

use crate::scenario::{Scenario, ScenarioCall};

/// How a call resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Resolved,
    Ambiguous,
    Inapplicable,
    Unresolved,
}

/// The result of resolving one scenario call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallReport {
    pub call: String,
    pub status: CallStatus,
    /// Kept candidates, with their bound receivers.
    pub candidates: Vec<String>,
    /// Why the kept candidates do not fit; only set for inapplicable calls.
    pub applicability: Option<String>,
    pub diagnostic: Option<Diagnostic>,
    pub levels_visited: usize,
    pub walk_end: &'static str,
}

impl CallReport {
    fn new<'db>(
        db: &'db dyn salsa::Database,
        call: &ScenarioCall<'db>,
        outcome: &ResolutionOutcome<'db>,
        walk: WalkReport,
    ) -> Self {
        let (status, applicability) = match outcome {
            ResolutionOutcome::Resolved(_) => (CallStatus::Resolved, None),
            ResolutionOutcome::Ambiguous(_) => (CallStatus::Ambiguous, None),
            ResolutionOutcome::Inapplicable { applicability, .. } => {
                (CallStatus::Inapplicable, Some(applicability.to_string()))
            }
            ResolutionOutcome::Unresolved => (CallStatus::Unresolved, None),
        };
        Self {
            call: call.text.clone(),
            status,
            candidates: outcome
                .candidates()
                .iter()
                .map(|candidate| describe_candidate(db, candidate))
                .collect(),
            applicability,
            diagnostic: outcome.diagnostic(call.info.name),
            levels_visited: walk.visited,
            walk_end: match walk.end {
                WalkEnd::Exhausted => "exhausted",
                WalkEnd::LevelStop => "level_stop",
                WalkEnd::Pruned => "pruned",
            },
        }
    }
}

/// Resolve every call of `scenario`, in order.
pub fn resolve_scenario<'db>(
    db: &'db dyn salsa::Database,
    scenario: &Scenario<'db>,
) -> Vec<CallReport> {
    let checker = TypeChecker::new(db, &scenario.classes);
    let context = ResolutionContext::new(db, &checker, &scenario.config);

    scenario
        .calls
        .iter()
        .map(|call| {
            let (outcome, walk) = resolve_call(&scenario.tower, call.info.clone(), context);
            CallReport::new(db, call, &outcome, walk)
        })
        .collect()
}

fn describe_candidate<'db>(db: &'db dyn salsa::Database, candidate: &Candidate<'db>) -> String {
    let mut out = candidate.declaration.id().to_string();
    if let Some(dispatch) = candidate.dispatch_receiver {
        let _ = write!(out, " [dispatch {}]", dispatch.display(db));
    }
    if let Some(extension) = candidate.extension_receiver {
        let _ = write!(out, " [extension {}]", extension.display(db));
    }
    if let Some(invoke) = candidate.builtin_extension_receiver {
        let _ = write!(out, " [invoke {}]", invoke.display(db));
    }
    out
}

/// Human-readable rendering of call reports, one block per call.
pub fn render_text(reports: &[CallReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{} => {:?}", report.call, report.status);
        for candidate in &report.candidates {
            let _ = writeln!(out, "    candidate {candidate}");
        }
        if let Some(diagnostic) = &report.diagnostic {
            let _ = writeln!(out, "    {diagnostic}");
        }
        let _ = writeln!(
            out,
            "    visited {} level(s), {}",
            report.levels_visited, report.walk_end
        );
    }
    out
}

pub fn render_json(reports: &[CallReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

/// The scenario's tower, one level per line in walk order.
pub fn render_tower<'db>(db: &'db dyn salsa::Database, scenario: &Scenario<'db>) -> String {
    let mut out = String::new();
    for entry in scenario.tower.entries() {
        let _ = write!(out, "{}: {}", entry.group, entry.level.describe(db));
        if entry.explicit_receiver_kind != ExplicitReceiverKind::NoExplicitReceiver {
            let _ = write!(out, " ({:?})", entry.explicit_receiver_kind);
        }
        out.push('\n');
    }
    out
}
