//! Per-candidate applicability checks.
//!
//! Each stage looks at one aspect of a candidate and reports the best
//! applicability that aspect allows. The runner keeps the worst of them and
//! stops at the first stage that rules the candidate out.

use belfry_types::Type;

use crate::call::CallKind;
use crate::declaration::{Declaration, FunctionSymbol};
use crate::receiver::ReceiverValue;
use crate::tower::{Candidate, CandidateApplicability, ResolutionContext};

type Stage = for<'a, 'db> fn(&Candidate<'db>, ResolutionContext<'a, 'db>) -> CandidateApplicability;

const STAGES: &[(&str, Stage)] = &[
    ("visibility", check_visibility),
    ("extension receiver", check_extension_receiver),
    ("dispatch receiver", check_dispatch_receiver),
    ("arguments", check_arguments),
    ("priority", check_priority),
];

/// Runs the stages in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolutionStageRunner;

impl ResolutionStageRunner {
    pub fn process_candidate<'db>(
        &self,
        candidate: &Candidate<'db>,
        context: ResolutionContext<'_, 'db>,
    ) -> CandidateApplicability {
        let mut applicability = CandidateApplicability::Resolved;
        for (name, stage) in STAGES {
            applicability = applicability.min(stage(candidate, context));
            if !applicability.is_success() {
                tracing::trace!(
                    candidate = %candidate.declaration.id(),
                    stage = *name,
                    %applicability,
                    "candidate rejected"
                );
                break;
            }
        }
        applicability
    }
}

fn check_visibility<'db>(
    candidate: &Candidate<'db>,
    _context: ResolutionContext<'_, 'db>,
) -> CandidateApplicability {
    if candidate.declaration.flags().hidden {
        CandidateApplicability::Hidden
    } else {
        CandidateApplicability::Resolved
    }
}

/// The extension receiver must be bound exactly when the declaration is an
/// extension, and must fit the declared receiver type.
fn check_extension_receiver<'db>(
    candidate: &Candidate<'db>,
    context: ResolutionContext<'_, 'db>,
) -> CandidateApplicability {
    match (candidate.declaration.receiver_type(), candidate.extension_receiver) {
        (None, None) => CandidateApplicability::Resolved,
        (Some(_), None) | (None, Some(_)) => CandidateApplicability::WrongReceiver,
        (Some(declared), Some(receiver)) => receiver_fits(context, receiver, declared),
    }
}

fn receiver_fits<'db>(
    context: ResolutionContext<'_, 'db>,
    receiver: ReceiverValue<'db>,
    declared: Type<'db>,
) -> CandidateApplicability {
    let db = context.db;
    let declared = erase_parameters(context, declared);
    if context.oracle.is_subtype_of(receiver.ty, declared) {
        return CandidateApplicability::Resolved;
    }
    if receiver.ty.is_nullable(db)
        && context
            .oracle
            .is_subtype_of(receiver.ty.with_nullability(db, false), declared)
    {
        return CandidateApplicability::UnsafeCall;
    }
    CandidateApplicability::WrongReceiver
}

/// Calling through a nullable explicit receiver is unsafe.
fn check_dispatch_receiver<'db>(
    candidate: &Candidate<'db>,
    context: ResolutionContext<'_, 'db>,
) -> CandidateApplicability {
    match candidate.dispatch_receiver {
        Some(receiver)
            if candidate.explicit_receiver_kind.is_dispatch()
                && receiver.ty.is_nullable(context.db) =>
        {
            CandidateApplicability::UnsafeCall
        }
        _ => CandidateApplicability::Resolved,
    }
}

/// Map arguments to parameters positionally and check their types.
fn check_arguments<'db>(
    candidate: &Candidate<'db>,
    context: ResolutionContext<'_, 'db>,
) -> CandidateApplicability {
    let call = &candidate.call_info;
    let (CallKind::Function, Declaration::Function(function)) = (call.kind, &candidate.declaration)
    else {
        return CandidateApplicability::Resolved;
    };

    let Some(parameter_types) = map_arguments(function, call.arguments.len()) else {
        return CandidateApplicability::ParameterMappingError;
    };

    let all_fit = call
        .arguments
        .iter()
        .zip(parameter_types)
        .all(|(&argument, parameter)| {
            context
                .oracle
                .is_subtype_of(argument, erase_parameters(context, parameter))
        });
    if all_fit {
        CandidateApplicability::Resolved
    } else {
        CandidateApplicability::Inapplicable
    }
}

/// The parameter type each of `count` positional arguments lands in, or `None`
/// if the arguments cannot be mapped.
fn map_arguments<'db>(function: &FunctionSymbol<'db>, count: usize) -> Option<Vec<Type<'db>>> {
    let parameters = &function.value_parameters;
    let vararg = parameters.iter().find(|p| p.is_vararg);
    let required = parameters
        .iter()
        .filter(|p| !p.has_default && !p.is_vararg)
        .count();

    if count < required || (vararg.is_none() && count > parameters.len()) {
        return None;
    }

    // Arguments past the fixed parameters all land in the vararg.
    let fixed: Vec<_> = parameters.iter().filter(|p| !p.is_vararg).collect();
    (0..count)
        .map(|i| fixed.get(i).copied().or(vararg).map(|p| p.ty))
        .collect()
}

fn check_priority<'db>(
    candidate: &Candidate<'db>,
    _context: ResolutionContext<'_, 'db>,
) -> CandidateApplicability {
    if candidate.declaration.flags().low_priority {
        CandidateApplicability::ResolvedLowPriority
    } else {
        CandidateApplicability::Resolved
    }
}

/// Generic declarations are checked against their star projection; inferring
/// type arguments is left to a later phase.
fn erase_parameters<'db>(context: ResolutionContext<'_, 'db>, ty: Type<'db>) -> Type<'db> {
    let db = context.db;
    if !ty.mentions_parameters(db) {
        return ty;
    }
    if ty.is_class_like(db) {
        return ty.star_projected(db, ty.is_nullable(db));
    }
    // A bare type parameter accepts anything.
    Type::error(db)
}
