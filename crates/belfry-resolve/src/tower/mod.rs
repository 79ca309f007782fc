//! The resolution tower.
//!
//! ## Pipeline
//!
//! 1. [`Tower::walk`] visits levels in [`TowerGroup`] order
//! 2. [`handle_level`] queries a level per [`Token`] the call kind needs
//! 3. Matches are filtered, turned into [`Candidate`]s by the
//!    [`CandidateFactory`] and judged by the [`Collector`]
//! 4. The merged [`ProcessResult`] and the collector decide whether the walk
//!    goes on

mod candidate;
mod collector;
mod group;
mod handler;
mod level;
mod result;
mod stages;
mod walker;

pub use candidate::{Candidate, CandidateFactory, ResolutionContext};
pub use collector::{CandidateApplicability, CandidateCollector, Collector};
pub use group::{ImportPriority, InvokeResolvePriority, TowerGroup, TowerGroupKind};
pub use handler::handle_level;
pub use level::{
    ImportScopeLevel, LexicalScopeLevel, MemberScopeLevel, Token, TowerScopeLevel,
    TowerScopeLevelProcessor,
};
pub use result::ProcessResult;
pub use stages::ResolutionStageRunner;
pub use walker::{Tower, TowerEntry, WalkEnd, WalkReport};
