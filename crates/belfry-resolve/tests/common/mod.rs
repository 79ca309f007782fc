//! Common test utilities: stub levels, collectors and oracles.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use belfry_core::{CallableId, Name, PackagePath};
use belfry_resolve::tower::{
    Candidate, CandidateApplicability, Collector, ProcessResult, ResolutionContext, Token,
    TowerGroup, TowerScopeLevel, TowerScopeLevelProcessor,
};
use belfry_resolve::{Declaration, ReceiverValue, Scope, ScopeKind};
use belfry_types::{ClassId, SubtypeOracle, Type};

/// A non-null class type from a dotted name.
#[allow(dead_code)]
pub fn class_type<'db>(db: &'db dyn salsa::Database, fq_name: &str) -> Type<'db> {
    Type::simple(db, ClassId::from_fq_name(db, fq_name))
}

#[allow(dead_code)]
pub fn top_level(package: &str, name: &'static str) -> CallableId {
    CallableId::top_level(PackagePath::parse(package), Name::new(name))
}

/// One declaration a [`StubLevel`] reports, with the receivers it reports it with.
#[derive(Clone)]
pub struct StubMatch<'db> {
    pub declaration: Declaration<'db>,
    pub dispatch: Option<ReceiverValue<'db>>,
    pub extension: Option<ReceiverValue<'db>>,
}

/// A level that reports a fixed list of matches and records every query.
pub struct StubLevel<'db> {
    scope: Arc<Scope<'db>>,
    matches: Vec<StubMatch<'db>>,
    extension_receiver: Option<ReceiverValue<'db>>,
    hit_result: ProcessResult,
    pub queries: RefCell<Vec<Token>>,
}

#[allow(dead_code)]
impl<'db> StubLevel<'db> {
    pub fn new() -> Self {
        Self {
            scope: Scope::new(Name::new("stub"), ScopeKind::Local, Vec::new()).into_shared(),
            matches: Vec::new(),
            extension_receiver: None,
            hit_result: ProcessResult::Found,
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Report `declaration` with no receivers.
    pub fn with(self, declaration: impl Into<Declaration<'db>>) -> Self {
        self.with_match(StubMatch {
            declaration: declaration.into(),
            dispatch: None,
            extension: None,
        })
    }

    pub fn with_match(mut self, stub: StubMatch<'db>) -> Self {
        self.matches.push(stub);
        self
    }

    pub fn with_extension_receiver(mut self, receiver: ReceiverValue<'db>) -> Self {
        self.extension_receiver = Some(receiver);
        self
    }

    /// Return `result` instead of `Found` from queries that report something.
    pub fn with_hit_result(mut self, result: ProcessResult) -> Self {
        self.hit_result = result;
        self
    }

    pub fn queried(&self) -> Vec<Token> {
        self.queries.borrow().clone()
    }
}

impl<'db> TowerScopeLevel<'db> for StubLevel<'db> {
    fn process_elements_by_name(
        &self,
        token: Token,
        name: Name,
        processor: &mut dyn TowerScopeLevelProcessor<'db>,
    ) -> ProcessResult {
        self.queries.borrow_mut().push(token);
        let mut result = ProcessResult::NotFound;
        for stub in &self.matches {
            if stub.declaration.token() == token && stub.declaration.name() == name {
                processor.consume_candidate(
                    &stub.declaration,
                    stub.dispatch,
                    stub.extension,
                    &self.scope,
                    None,
                );
                result = self.hit_result;
            }
        }
        result
    }

    fn extension_receiver(&self) -> Option<ReceiverValue<'db>> {
        self.extension_receiver
    }

    fn describe(&self, _db: &'db dyn salsa::Database) -> String {
        "stub".to_owned()
    }
}

/// A collector that accepts everything and reports a fixed success state.
#[derive(Default)]
pub struct RecordingCollector<'db> {
    pub consumed: Vec<(TowerGroup, Candidate<'db>)>,
    pub success: bool,
}

#[allow(dead_code)]
impl<'db> RecordingCollector<'db> {
    pub fn succeeded() -> Self {
        Self {
            consumed: Vec::new(),
            success: true,
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.consumed
            .iter()
            .map(|(_, c)| c.declaration.id().to_string())
            .collect()
    }
}

impl<'db> Collector<'db> for RecordingCollector<'db> {
    fn consume_candidate(
        &mut self,
        group: &TowerGroup,
        candidate: Candidate<'db>,
        _context: ResolutionContext<'_, 'db>,
    ) -> CandidateApplicability {
        self.consumed.push((group.clone(), candidate));
        CandidateApplicability::Resolved
    }

    fn is_success(&self) -> bool {
        self.success
    }

    fn should_stop_at_group(&self, _group: &TowerGroup) -> bool {
        false
    }
}

/// An oracle with a fixed answer that counts how often it is asked.
pub struct FixedOracle {
    answer: bool,
    pub calls: Cell<usize>,
}

#[allow(dead_code)]
impl FixedOracle {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: Cell::new(0),
        }
    }
}

impl<'db> SubtypeOracle<'db> for FixedOracle {
    fn is_subtype_of(&self, _subtype: Type<'db>, _supertype: Type<'db>) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.answer
    }
}
