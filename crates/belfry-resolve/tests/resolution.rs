//! End-to-end resolution against real levels, the nominal type checker and
//! the candidate collector.

mod common;

use std::sync::Arc;

use belfry_core::{CallableId, Name, PackagePath};
use belfry_resolve::tower::{
    CandidateApplicability, ImportPriority, ImportScopeLevel, LexicalScopeLevel,
    MemberScopeLevel, ResolutionContext, Tower, TowerEntry, TowerGroup, TowerGroupKind,
};
use belfry_resolve::{
    CallInfo, Declaration, DeclarationFlags, ExplicitReceiver, ExplicitReceiverKind, FunctionSymbol,
    MemberIndex, PropertySymbol, ReceiverValue, ResolutionOutcome, ResolverConfig, Scope,
    ScopeKind, ValueParameter, resolve_call,
};
use belfry_types::{ClassId, ClassInfo, ClassKind, ClassTable, Type, TypeChecker};
use insta::assert_snapshot;

use common::{class_type, top_level};

struct World<'db> {
    db: &'db dyn salsa::Database,
    classes: ClassTable<'db>,
    config: ResolverConfig,
}

impl<'db> World<'db> {
    fn new(db: &'db dyn salsa::Database) -> Self {
        let mut classes = ClassTable::new(ClassId::from_fq_name(db, "core.Any"));
        for name in ["core.Int", "core.String", "core.Unit", "app.Shape"] {
            classes.insert(ClassInfo::new(ClassId::from_fq_name(db, name), ClassKind::Class));
        }
        let square = ClassId::from_fq_name(db, "app.Square");
        classes.insert(
            ClassInfo::new(square, ClassKind::Class)
                .with_supertypes(vec![class_type(db, "app.Shape")]),
        );
        Self {
            db,
            classes,
            config: ResolverConfig::default(),
        }
    }

    fn ty(&self, fq_name: &str) -> Type<'db> {
        class_type(self.db, fq_name)
    }

    fn resolve(&self, tower: &Tower<'_, 'db>, call: CallInfo<'db>) -> ResolutionOutcome<'db> {
        let checker = TypeChecker::new(self.db, &self.classes);
        let context = ResolutionContext::new(self.db, &checker, &self.config);
        resolve_call(tower, call, context).0
    }
}

fn scope<'db>(kind: ScopeKind, declarations: Vec<Declaration<'db>>) -> Arc<Scope<'db>> {
    Scope::new(Name::new("test"), kind, declarations).into_shared()
}

fn message(outcome: &ResolutionOutcome<'_>, name: &'static str) -> String {
    outcome
        .diagnostic(Name::new(name))
        .map(|d| format!("{} [{}]", d, d.kind))
        .unwrap_or_else(|| "resolved".to_owned())
}

#[test]
fn local_declaration_wins_over_import() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let int = world.ty("core.Int");

    let local = LexicalScopeLevel::new(scope(
        ScopeKind::Local,
        vec![PropertySymbol::new(top_level("", "count"), int).into()],
    ));
    let import = ImportScopeLevel::new(scope(
        ScopeKind::ExplicitImport,
        vec![PropertySymbol::new(top_level("lib", "count"), int).into()],
    ));
    let tower: Tower = [
        TowerEntry::new(TowerGroup::import(ImportPriority::Explicit), import),
        TowerEntry::new(TowerGroup::local(0), local),
    ]
    .into_iter()
    .collect();

    let outcome = world.resolve(&tower, CallInfo::variable(Name::new("count")));
    let ResolutionOutcome::Resolved(candidate) = &outcome else {
        panic!("expected a resolved candidate, got {outcome:?}");
    };
    assert_eq!(candidate.declaration.id().to_string(), "count");
}

#[test]
fn overloads_are_chosen_by_argument_types() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let int = world.ty("core.Int");
    let string = world.ty("core.String");
    let unit = world.ty("core.Unit");

    let print_int = FunctionSymbol::new(top_level("app", "print"), unit)
        .with_parameters(vec![ValueParameter::new(Name::new("value"), int)]);
    let print_string = FunctionSymbol::new(top_level("app", "print"), unit)
        .with_parameters(vec![ValueParameter::new(Name::new("value"), string)]);
    let level = LexicalScopeLevel::new(scope(
        ScopeKind::Package,
        vec![print_int.into(), print_string.clone().into()],
    ));
    let tower: Tower = [TowerEntry::new(TowerGroup::implicit(0), level)]
        .into_iter()
        .collect();

    let outcome = world.resolve(&tower, CallInfo::function(Name::new("print"), vec![string]));
    assert_eq!(outcome.candidates().len(), 1);
    assert_eq!(
        outcome.candidates()[0].declaration,
        Declaration::from(print_string)
    );

    let outcome = world.resolve(&tower, CallInfo::function(Name::new("print"), vec![]));
    assert_snapshot!(
        message(&outcome, "print"),
        @"ERROR: no applicable candidate for `print` (parameter mapping error): app.print, app.print [inapplicable candidate]"
    );

    let shape = world.ty("app.Shape");
    let outcome = world.resolve(&tower, CallInfo::function(Name::new("print"), vec![shape]));
    assert_snapshot!(
        message(&outcome, "print"),
        @"ERROR: no applicable candidate for `print` (inapplicable): app.print, app.print [inapplicable candidate]"
    );
}

#[test]
fn defaults_and_varargs_relax_arity() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let (int, unit) = (world.ty("core.Int"), world.ty("core.Unit"));

    let log = FunctionSymbol::new(top_level("app", "log"), unit).with_parameters(vec![
        ValueParameter::new(Name::new("level"), int).with_default(),
        ValueParameter::new(Name::new("values"), int).vararg(),
    ]);
    let level = LexicalScopeLevel::new(scope(ScopeKind::Package, vec![log.into()]));
    let tower: Tower = [TowerEntry::new(TowerGroup::implicit(0), level)]
        .into_iter()
        .collect();

    for args in [vec![], vec![int], vec![int, int, int]] {
        let outcome = world.resolve(&tower, CallInfo::function(Name::new("log"), args));
        assert!(outcome.is_resolved(), "{outcome:?}");
    }
    let outcome = world.resolve(
        &tower,
        CallInfo::function(Name::new("log"), vec![int, world.ty("core.String")]),
    );
    assert!(!outcome.is_resolved());
}

#[test]
fn better_applicability_at_a_worse_group_wins() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let (int, unit) = (world.ty("core.Int"), world.ty("core.Unit"));

    let local = LexicalScopeLevel::new(scope(
        ScopeKind::Local,
        vec![FunctionSymbol::new(top_level("", "run"), unit)
            .with_parameters(vec![ValueParameter::new(Name::new("n"), int)])
            .into()],
    ));
    let package = LexicalScopeLevel::new(scope(
        ScopeKind::Package,
        vec![FunctionSymbol::new(top_level("app", "run"), unit).into()],
    ));
    let tower: Tower = [
        TowerEntry::new(TowerGroup::local(0), local),
        TowerEntry::new(TowerGroup::implicit(0), package),
    ]
    .into_iter()
    .collect();

    let outcome = world.resolve(&tower, CallInfo::function(Name::new("run"), vec![]));
    let ResolutionOutcome::Resolved(candidate) = &outcome else {
        panic!("expected app.run, got {outcome:?}");
    };
    assert_eq!(candidate.declaration.id().to_string(), "app.run");
}

#[test]
fn low_priority_loses_within_a_group() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let unit = world.ty("core.Unit");
    let deprecated = DeclarationFlags {
        low_priority: true,
        ..DeclarationFlags::default()
    };

    let level = LexicalScopeLevel::new(scope(
        ScopeKind::Package,
        vec![
            FunctionSymbol::new(top_level("app", "old"), unit)
                .with_flags(deprecated)
                .into(),
        ],
    ));
    let fresh = LexicalScopeLevel::new(scope(
        ScopeKind::Package,
        vec![FunctionSymbol::new(top_level("lib", "old"), unit).into()],
    ));
    let tower: Tower = [
        TowerEntry::new(TowerGroup::implicit(0), level),
        TowerEntry::new(TowerGroup::implicit(0), fresh),
    ]
    .into_iter()
    .collect();

    let outcome = world.resolve(&tower, CallInfo::function(Name::new("old"), vec![]));
    assert_eq!(outcome.candidates()[0].declaration.id().to_string(), "lib.old");
    assert!(outcome.is_resolved());
}

#[test]
fn hidden_and_ambiguous_diagnostics() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let unit = world.ty("core.Unit");
    let hidden = DeclarationFlags {
        hidden: true,
        ..DeclarationFlags::default()
    };

    let private = LexicalScopeLevel::new(scope(
        ScopeKind::Package,
        vec![
            FunctionSymbol::new(top_level("lib", "secret"), unit)
                .with_flags(hidden)
                .into(),
        ],
    ));
    let tower: Tower = [TowerEntry::new(TowerGroup::implicit(0), private)]
        .into_iter()
        .collect();
    let outcome = world.resolve(&tower, CallInfo::function(Name::new("secret"), vec![]));
    assert_snapshot!(
        message(&outcome, "secret"),
        @"ERROR: no applicable candidate for `secret` (hidden): lib.secret [invisible reference]"
    );

    let star = ImportScopeLevel::new(scope(
        ScopeKind::StarImport,
        vec![
            FunctionSymbol::new(top_level("a", "go"), unit).into(),
            FunctionSymbol::new(top_level("b", "go"), unit).into(),
        ],
    ));
    let tower: Tower = [TowerEntry::new(TowerGroup::import(ImportPriority::Star), star)]
        .into_iter()
        .collect();
    let outcome = world.resolve(&tower, CallInfo::function(Name::new("go"), vec![]));
    assert_snapshot!(
        message(&outcome, "go"),
        @"ERROR: ambiguous reference `go`: a.go, b.go [ambiguous reference]"
    );

    let outcome = world.resolve(&tower, CallInfo::function(Name::new("missing"), vec![]));
    assert!(outcome.candidates().is_empty());
    assert_snapshot!(
        message(&outcome, "missing"),
        @"ERROR: unresolved reference `missing` [unresolved reference]"
    );
}

#[test]
fn member_call_on_nullable_receiver_is_unsafe() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let int = world.ty("core.Int");
    let shape_class = ClassId::from_fq_name(&db, "app.Shape");
    let square_class = ClassId::from_fq_name(&db, "app.Square");

    let mut members = MemberIndex::new();
    members.declare(
        shape_class,
        FunctionSymbol::new(
            CallableId::member(PackagePath::parse("app"), Name::new("Shape"), Name::new("area")),
            int,
        )
        .into(),
    );
    let scope = members.member_scope(&db, &world.classes, square_class);

    let nullable_square = world.ty("app.Square").with_nullability(&db, true);
    let level = MemberScopeLevel::new(ReceiverValue::explicit(nullable_square), scope.clone());
    let tower: Tower = [TowerEntry::new(TowerGroup::member(), level)
        .with_explicit_receiver_kind(ExplicitReceiverKind::DispatchReceiver)]
    .into_iter()
    .collect();
    let call = CallInfo::function(Name::new("area"), vec![])
        .with_explicit_receiver(ExplicitReceiver::Expression { ty: nullable_square });

    let outcome = world.resolve(&tower, call.clone());
    assert!(matches!(
        outcome,
        ResolutionOutcome::Inapplicable {
            applicability: CandidateApplicability::UnsafeCall,
            ..
        }
    ));
    assert_snapshot!(
        message(&outcome, "area"),
        @"ERROR: no applicable candidate for `area` (unsafe call): app.Shape.area [unsafe call]"
    );

    let level = MemberScopeLevel::new(ReceiverValue::explicit(world.ty("app.Square")), scope);
    let tower: Tower = [TowerEntry::new(TowerGroup::member(), level)
        .with_explicit_receiver_kind(ExplicitReceiverKind::DispatchReceiver)]
    .into_iter()
    .collect();
    assert!(world.resolve(&tower, call).is_resolved());
}

#[test]
fn extension_receiver_is_checked_against_the_declaration() {
    let db = salsa::DatabaseImpl::new();
    let world = World::new(&db);
    let int = world.ty("core.Int");
    let (shape, square) = (world.ty("app.Shape"), world.ty("app.Square"));

    let area = FunctionSymbol::new(top_level("geo", "area"), int).with_receiver(shape);
    let extensions = scope(ScopeKind::ExplicitImport, vec![area.into()]);
    let build = |receiver| {
        let level = ImportScopeLevel::new(extensions.clone())
            .with_extension_receiver(ReceiverValue::explicit(receiver));
        let entry = TowerEntry::new(
            TowerGroup::import(ImportPriority::Explicit).then(TowerGroupKind::InvokeExtension),
            level,
        )
        .with_explicit_receiver_kind(ExplicitReceiverKind::ExtensionReceiver);
        [entry].into_iter().collect::<Tower>()
    };
    let call = |receiver| {
        CallInfo::function(Name::new("area"), vec![])
            .with_explicit_receiver(ExplicitReceiver::Expression { ty: receiver })
    };

    assert!(world.resolve(&build(square), call(square)).is_resolved());

    let nullable = square.with_nullability(&db, true);
    let outcome = world.resolve(&build(nullable), call(nullable));
    assert!(matches!(
        outcome,
        ResolutionOutcome::Inapplicable {
            applicability: CandidateApplicability::UnsafeCall,
            ..
        }
    ));

    let string = world.ty("core.String");
    let outcome = world.resolve(&build(string), call(string));
    assert!(matches!(
        outcome,
        ResolutionOutcome::Inapplicable {
            applicability: CandidateApplicability::WrongReceiver,
            ..
        }
    ));
}
