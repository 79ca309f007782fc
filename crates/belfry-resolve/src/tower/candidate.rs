//! Candidates and the factory that creates them.

use std::sync::Arc;

use belfry_types::SubtypeOracle;

use crate::ResolverConfig;
use crate::call::{CallInfo, ExplicitReceiverKind};
use crate::declaration::Declaration;
use crate::receiver::ReceiverValue;
use crate::scope::Scope;

/// The type-system session a resolution runs in.
#[derive(Clone, Copy)]
pub struct ResolutionContext<'a, 'db> {
    pub db: &'db dyn salsa::Database,
    pub oracle: &'a dyn SubtypeOracle<'db>,
    pub config: &'a ResolverConfig,
}

impl<'a, 'db> ResolutionContext<'a, 'db> {
    pub fn new(
        db: &'db dyn salsa::Database,
        oracle: &'a dyn SubtypeOracle<'db>,
        config: &'a ResolverConfig,
    ) -> Self {
        Self { db, oracle, config }
    }
}

/// One declaration occurrence bound to the receivers it would be called with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate<'db> {
    pub declaration: Declaration<'db>,
    pub dispatch_receiver: Option<ReceiverValue<'db>>,
    pub extension_receiver: Option<ReceiverValue<'db>>,
    /// Receiver of a built-in `invoke` extension the call goes through.
    pub builtin_extension_receiver: Option<ReceiverValue<'db>>,
    pub explicit_receiver_kind: ExplicitReceiverKind,
    pub scope: Arc<Scope<'db>>,
    pub call_info: Arc<CallInfo<'db>>,
}

/// Turns level matches into candidates for one call.
pub struct CandidateFactory<'a, 'db> {
    context: ResolutionContext<'a, 'db>,
    call_info: Arc<CallInfo<'db>>,
}

impl<'a, 'db> CandidateFactory<'a, 'db> {
    pub fn new(context: ResolutionContext<'a, 'db>, call_info: CallInfo<'db>) -> Self {
        Self {
            context,
            call_info: Arc::new(call_info),
        }
    }

    pub fn context(&self) -> ResolutionContext<'a, 'db> {
        self.context
    }

    pub fn call_info(&self) -> &CallInfo<'db> {
        &self.call_info
    }

    pub fn create_candidate(
        &self,
        declaration: &Declaration<'db>,
        explicit_receiver_kind: ExplicitReceiverKind,
        scope: &Arc<Scope<'db>>,
        dispatch_receiver: Option<ReceiverValue<'db>>,
        extension_receiver: Option<ReceiverValue<'db>>,
        builtin_extension_receiver: Option<ReceiverValue<'db>>,
    ) -> Candidate<'db> {
        Candidate {
            declaration: declaration.clone(),
            dispatch_receiver,
            extension_receiver,
            builtin_extension_receiver,
            explicit_receiver_kind,
            scope: Arc::clone(scope),
            call_info: Arc::clone(&self.call_info),
        }
    }
}
