//! Call candidate resolution over a tower of scope levels.
//!
//! A reference such as `foo`, `a.foo(1)` or `::foo` is resolved by walking an
//! ordered tower of levels (local scopes, implicit receivers, imports), asking
//! each level for the declarations named `foo` and keeping the best
//! candidates. The walk ends early once no remaining level can produce a
//! better candidate than one already found.
//!
//! ## Resolution Strategy
//!
//! 1. Levels are visited by [`TowerGroup`](tower::TowerGroup), best first
//! 2. Each level is queried per the call kind (see [`tower::handle_level`])
//! 3. The [`CandidateCollector`](tower::CandidateCollector) keeps the best
//!    candidates and tells the walk when to stop
//! 4. The kept candidates become a [`ResolutionOutcome`]

pub mod call;
pub mod config;
pub mod declaration;
pub mod members;
pub mod outcome;
pub mod receiver;
pub mod scope;
pub mod tower;

pub use call::{CallInfo, CallKind, ExplicitReceiver, ExplicitReceiverKind};
pub use config::ResolverConfig;
pub use declaration::{
    Declaration, DeclarationFlags, FunctionKind, FunctionSymbol, ObjectSymbol, PropertySymbol,
    ValueParameter,
};
pub use members::MemberIndex;
pub use outcome::ResolutionOutcome;
pub use receiver::{ReceiverSource, ReceiverValue};
pub use scope::{Scope, ScopeKind};

use tower::{CandidateCollector, CandidateFactory, ResolutionContext, Tower, WalkReport};

/// Resolve one call against `tower`.
///
/// This is the main entry point for candidate resolution.
pub fn resolve_call<'db>(
    tower: &Tower<'_, 'db>,
    call_info: CallInfo<'db>,
    context: ResolutionContext<'_, 'db>,
) -> (ResolutionOutcome<'db>, WalkReport) {
    let span = tracing::debug_span!("resolve_call", name = %call_info.name, kind = ?call_info.kind);
    let _guard = span.enter();

    let factory = CandidateFactory::new(context, call_info);
    let mut collector = CandidateCollector::default();
    let report = tower.walk(&mut collector, &factory, factory.call_info());

    let outcome = ResolutionOutcome::from_collector(collector);
    tracing::debug!(?report, resolved = outcome.is_resolved(), "resolution finished");
    (outcome, report)
}
