//! Processing of a single tower level.
//!
//! [`handle_level`] turns a call kind into token queries against one level,
//! filters what the level reports, and feeds the survivors through the
//! candidate factory into the collector.

use std::sync::Arc;

use belfry_types::Type;

use crate::call::{CallInfo, CallKind, ExplicitReceiverKind};
use crate::declaration::{Declaration, FunctionKind};
use crate::receiver::ReceiverValue;
use crate::scope::Scope;
use crate::tower::{
    CandidateFactory, Collector, ProcessResult, Token, TowerGroup, TowerScopeLevel,
    TowerScopeLevelProcessor,
};

/// Query `level` for `call_info` and return the merged continuation signal.
///
/// - Variable access queries properties, then objects unless the collector
///   already has a success or the level is bound to an extension receiver.
/// - A function call queries functions only.
/// - A callable reference queries functions and then properties.
pub fn handle_level<'db>(
    collector: &mut dyn Collector<'db>,
    factory: &CandidateFactory<'_, 'db>,
    call_info: &CallInfo<'db>,
    explicit_receiver_kind: ExplicitReceiverKind,
    group: &TowerGroup,
    level: &dyn TowerScopeLevel<'db>,
) -> ProcessResult {
    let mut result = ProcessResult::NotFound;
    let name = call_info.name;
    let mut processor = LevelProcessor {
        call_info,
        explicit_receiver_kind,
        collector,
        factory,
        group,
    };

    match call_info.kind {
        CallKind::VariableAccess => {
            result += level.process_elements_by_name(Token::Properties, name, &mut processor);
            if !processor.collector.is_success() && level.extension_receiver().is_none() {
                result += level.process_elements_by_name(Token::Objects, name, &mut processor);
            }
        }
        CallKind::Function => {
            result += level.process_elements_by_name(Token::Functions, name, &mut processor);
        }
        CallKind::CallableReference => {
            result += level.process_elements_by_name(Token::Functions, name, &mut processor);
            result += level.process_elements_by_name(Token::Properties, name, &mut processor);
        }
    }

    tracing::trace!(%name, kind = ?call_info.kind, %group, ?result, "level processed");
    result
}

/// Bridges level matches to the collector for one level.
struct LevelProcessor<'a, 'f, 'db> {
    call_info: &'a CallInfo<'db>,
    explicit_receiver_kind: ExplicitReceiverKind,
    collector: &'a mut dyn Collector<'db>,
    factory: &'a CandidateFactory<'f, 'db>,
    group: &'a TowerGroup,
}

impl<'db> LevelProcessor<'_, '_, 'db> {
    /// Default-package extension functions called on an explicit receiver are
    /// dropped when the receiver cannot possibly match their declared receiver.
    ///
    /// Every condition has to hold; the subtype oracle is consulted last.
    fn is_filtered_out(
        &self,
        declaration: &Declaration<'db>,
        dispatch_receiver: Option<ReceiverValue<'db>>,
        extension_receiver: Option<ReceiverValue<'db>>,
    ) -> bool {
        let Declaration::Function(function) = declaration else {
            return false;
        };
        if function.kind != FunctionKind::Named || dispatch_receiver.is_some() {
            return false;
        }
        let Some(extension_receiver) = extension_receiver else {
            return false;
        };
        match &self.call_info.explicit_receiver {
            Some(receiver) if !receiver.is_resolved_qualifier() => {}
            _ => return false,
        }

        let context = self.factory.context();
        if !context.config.is_default_package(&function.id.package) {
            return false;
        }

        let db = context.db;
        if !extension_receiver.ty.is_class_like(db) {
            return false;
        }
        let Some(declared) = function.receiver_type.filter(|ty| ty.is_class_like(db)) else {
            return false;
        };

        let relaxed: Type<'db> = declared.star_projected(db, true);
        !context.oracle.is_subtype_of(extension_receiver.ty, relaxed)
    }
}

impl<'db> TowerScopeLevelProcessor<'db> for LevelProcessor<'_, '_, 'db> {
    fn consume_candidate(
        &mut self,
        declaration: &Declaration<'db>,
        dispatch_receiver: Option<ReceiverValue<'db>>,
        extension_receiver: Option<ReceiverValue<'db>>,
        scope: &Arc<Scope<'db>>,
        builtin_extension_receiver: Option<ReceiverValue<'db>>,
    ) {
        // Dropped candidates leave no trace; to the caller they were never found.
        if self.is_filtered_out(declaration, dispatch_receiver, extension_receiver) {
            return;
        }

        let candidate = self.factory.create_candidate(
            declaration,
            self.explicit_receiver_kind,
            scope,
            dispatch_receiver,
            extension_receiver,
            builtin_extension_receiver,
        );
        self.collector
            .consume_candidate(self.group, candidate, self.factory.context());
    }
}
