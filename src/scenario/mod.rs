//! Scenario files.
//!
//! A scenario is a JSON document describing a class hierarchy, a set of
//! scopes, the tower built from them, and the calls to resolve against it.
//! Loading turns it into the resolver's own types; see [`load_scenario_str`].

mod error;
mod group_syntax;
mod model;
mod syntax;
mod type_syntax;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use belfry_core::{CallableId, Name, PackagePath};
use belfry_resolve::tower::{
    ImportScopeLevel, InvokeResolvePriority, LexicalScopeLevel, MemberScopeLevel, Tower,
    TowerEntry,
};
use belfry_resolve::{
    CallInfo, CallKind, Declaration, DeclarationFlags, ExplicitReceiver, ExplicitReceiverKind,
    FunctionKind, FunctionSymbol, MemberIndex, ObjectSymbol, PropertySymbol, ReceiverValue,
    ResolverConfig, Scope, ScopeKind, ValueParameter,
};
use belfry_types::{ClassId, ClassInfo, ClassKind, ClassTable};

pub use error::{ScenarioError, ScenarioErrorKind, ScenarioResult};
pub use group_syntax::parse_group;

use model::{
    CallKindSpec, CallReceiverSpec, CallSpec, ClassKindSpec, ClassSpec, ConfigSpec,
    DeclarationSpec, ExplicitReceiverKindSpec, InvokePrioritySpec, LevelKindSpec, LevelSpec,
    ReceiverSpec, ScenarioFile, ScopeKindSpec, ScopeSpec,
};
use type_syntax::{TypeSyntax, parse_type_parameter};

/// A call to resolve, with the text it was written as.
#[derive(Clone, Debug)]
pub struct ScenarioCall<'db> {
    pub text: String,
    pub info: CallInfo<'db>,
}

/// A loaded scenario.
pub struct Scenario<'db> {
    pub config: ResolverConfig,
    pub classes: ClassTable<'db>,
    pub members: MemberIndex<'db>,
    /// Named scopes, in declaration order.
    pub scopes: Vec<Arc<Scope<'db>>>,
    pub tower: Tower<'db, 'db>,
    pub calls: Vec<ScenarioCall<'db>>,
}

pub fn load_scenario_file<'db>(
    db: &'db dyn salsa::Database,
    path: &Path,
) -> ScenarioResult<Scenario<'db>> {
    let text = std::fs::read_to_string(path).map_err(|e| ScenarioError::io(path, e))?;
    tracing::debug!(path = %path.display(), "loading scenario");
    load_scenario_str(db, &text)
}

pub fn load_scenario_str<'db>(
    db: &'db dyn salsa::Database,
    text: &str,
) -> ScenarioResult<Scenario<'db>> {
    let file: ScenarioFile = serde_json::from_str(text)?;
    let mut loader = Loader::new(db, file.config);

    loader.load_classes(file.classes)?;
    loader.load_scopes(file.scopes)?;
    let tower = loader.load_tower(file.tower)?;
    let calls = file
        .calls
        .into_iter()
        .map(|call| loader.call(call))
        .collect::<ScenarioResult<Vec<_>>>()?;

    tracing::debug!(
        scopes = loader.scope_order.len(),
        levels = tower.len(),
        calls = calls.len(),
        "scenario loaded"
    );
    Ok(Scenario {
        config: loader.config,
        classes: loader.classes,
        members: loader.members,
        scopes: loader.scope_order,
        tower,
        calls,
    })
}

/// A class whose members are being loaded.
struct Owner<'db> {
    class: ClassId<'db>,
    type_parameters: Vec<Name>,
}

struct Loader<'db> {
    db: &'db dyn salsa::Database,
    config: ResolverConfig,
    classes: ClassTable<'db>,
    members: MemberIndex<'db>,
    scopes: HashMap<String, Arc<Scope<'db>>>,
    scope_order: Vec<Arc<Scope<'db>>>,
}

impl<'db> Loader<'db> {
    fn new(db: &'db dyn salsa::Database, spec: ConfigSpec) -> Self {
        let mut config = ResolverConfig::default();
        if let Some(package) = spec.default_package {
            config = config.with_default_package(PackagePath::parse(&package));
        }
        if let Some(root) = spec.root_class {
            config = config.with_root_class(root);
        }
        let classes = ClassTable::new(ClassId::from_fq_name(db, &config.root_class));
        Self {
            db,
            config,
            classes,
            members: MemberIndex::new(),
            scopes: HashMap::new(),
            scope_order: Vec::new(),
        }
    }

    /// Classes are registered before any supertype or member is parsed, so
    /// declarations may refer to classes declared later in the file.
    fn load_classes(&mut self, specs: Vec<ClassSpec>) -> ScenarioResult<()> {
        let db = self.db;
        let mut owners = Vec::with_capacity(specs.len());
        for spec in &specs {
            let id = ClassId::from_fq_name(db, &spec.name);
            let type_parameters = spec
                .type_parameters
                .iter()
                .map(|text| parse_type_parameter(text))
                .collect::<ScenarioResult<Vec<_>>>()?;
            let owner = Owner {
                class: id,
                type_parameters: type_parameters.iter().map(|p| p.name).collect(),
            };
            self.classes.insert(
                ClassInfo::new(id, class_kind(spec.kind)).with_type_parameters(type_parameters),
            );
            owners.push(owner);
        }

        for (spec, owner) in specs.into_iter().zip(owners) {
            let syntax =
                TypeSyntax::new(db, &self.classes).with_parameters(&owner.type_parameters);
            let supertypes = spec
                .supertypes
                .iter()
                .map(|text| syntax.parse(text))
                .collect::<ScenarioResult<Vec<_>>>()?;

            let mut members = Vec::with_capacity(spec.members.len());
            for member in spec.members {
                members.push(declaration(db, &self.classes, Some(&owner), member)?);
            }

            if let Some(info) = self.classes.get(owner.class).cloned() {
                self.classes.insert(info.with_supertypes(supertypes));
            }
            for member in members {
                self.members.declare(owner.class, member);
            }
        }
        Ok(())
    }

    fn load_scopes(&mut self, specs: Vec<ScopeSpec>) -> ScenarioResult<()> {
        for spec in specs {
            let declarations = spec
                .declarations
                .into_iter()
                .map(|d| declaration(self.db, &self.classes, None, d))
                .collect::<ScenarioResult<Vec<_>>>()?;
            let mut scope = Scope::new(
                Name::from_dynamic(&spec.name),
                scope_kind(spec.kind),
                declarations,
            );
            if spec.hides_outer {
                scope = scope.hiding_outer();
            }
            let scope = scope.into_shared();
            self.scopes.insert(spec.name, Arc::clone(&scope));
            self.scope_order.push(scope);
        }
        Ok(())
    }

    fn load_tower(&self, specs: Vec<LevelSpec>) -> ScenarioResult<Tower<'db, 'db>> {
        let mut tower = Tower::new();
        for spec in specs {
            // An explicit `invoke_priority` overrides a `[...]` suffix in the group.
            let group = match spec.invoke_priority {
                InvokePrioritySpec::None => parse_group(&spec.group)?,
                priority => {
                    parse_group(&spec.group)?.with_invoke_priority(invoke_priority(priority))
                }
            };
            let entry = match spec.level {
                LevelKindSpec::Lexical {
                    scope,
                    extension_receiver,
                } => {
                    let mut level = LexicalScopeLevel::new(self.scope(&scope)?);
                    if let Some(receiver) = extension_receiver {
                        level = level.with_extension_receiver(self.receiver(&receiver)?);
                    }
                    TowerEntry::new(group, level)
                }
                LevelKindSpec::Member {
                    dispatch_receiver,
                    scope,
                    extension_receiver,
                    invoke_receiver,
                } => {
                    let dispatch = self.receiver(&dispatch_receiver)?;
                    let scope = match scope {
                        Some(name) => self.scope(&name)?,
                        None => {
                            let class = dispatch.ty.class_id(self.db).ok_or_else(|| {
                                ScenarioError::bad_type(
                                    dispatch_receiver.ty.as_str(),
                                    "member levels need a class-typed dispatch receiver",
                                )
                            })?;
                            self.members.member_scope(self.db, &self.classes, class)
                        }
                    };
                    let mut level = MemberScopeLevel::new(dispatch, scope);
                    if let Some(receiver) = extension_receiver {
                        level = level.with_extension_receiver(self.receiver(&receiver)?);
                    }
                    if let Some(receiver) = invoke_receiver {
                        level = level.with_invoke_receiver(self.receiver(&receiver)?);
                    }
                    TowerEntry::new(group, level)
                }
                LevelKindSpec::Import {
                    scope,
                    extension_receiver,
                } => {
                    let mut level = ImportScopeLevel::new(self.scope(&scope)?);
                    if let Some(receiver) = extension_receiver {
                        level = level.with_extension_receiver(self.receiver(&receiver)?);
                    }
                    TowerEntry::new(group, level)
                }
            };
            let receiver_kind = explicit_receiver_kind(spec.explicit_receiver_kind);
            tower.push(entry.with_explicit_receiver_kind(receiver_kind));
        }
        Ok(tower)
    }

    fn scope(&self, name: &str) -> ScenarioResult<Arc<Scope<'db>>> {
        self.scopes
            .get(name)
            .cloned()
            .ok_or_else(|| ScenarioError::unknown_scope(name))
    }

    fn receiver(&self, spec: &ReceiverSpec) -> ScenarioResult<ReceiverValue<'db>> {
        let ty = TypeSyntax::new(self.db, &self.classes).parse(&spec.ty)?;
        Ok(if spec.explicit {
            ReceiverValue::explicit(ty)
        } else {
            match &spec.label {
                Some(label) => ReceiverValue::implicit(ty, Name::from_dynamic(label)),
                None => ReceiverValue::this(ty),
            }
        })
    }

    fn call(&self, spec: CallSpec) -> ScenarioResult<ScenarioCall<'db>> {
        let db = self.db;
        let syntax = TypeSyntax::new(db, &self.classes);
        let kind = match spec.kind {
            CallKindSpec::Variable => CallKind::VariableAccess,
            CallKindSpec::Function => CallKind::Function,
            CallKindSpec::CallableReference => CallKind::CallableReference,
        };

        let mut info = CallInfo::new(kind, Name::from_dynamic(&spec.name));
        info.arguments = spec
            .arguments
            .iter()
            .map(|text| syntax.parse(text))
            .collect::<ScenarioResult<Vec<_>>>()?;
        info.explicit_receiver = match &spec.receiver {
            None => None,
            Some(CallReceiverSpec::Expression(text)) => Some(ExplicitReceiver::Expression {
                ty: syntax.parse(text)?,
            }),
            Some(CallReceiverSpec::Package(package)) => Some(ExplicitReceiver::ResolvedQualifier {
                package: PackagePath::parse(package),
                class: None,
            }),
            Some(CallReceiverSpec::Class(name)) => {
                let class = ClassId::from_fq_name(db, name);
                if !self.classes.contains(class) {
                    return Err(ScenarioError::unknown_class(name.as_str()));
                }
                Some(ExplicitReceiver::ResolvedQualifier {
                    package: class.package(db).clone(),
                    class: Some(class),
                })
            }
        };

        Ok(ScenarioCall {
            text: call_text(&spec),
            info,
        })
    }
}

fn declaration<'db>(
    db: &'db dyn salsa::Database,
    classes: &ClassTable<'db>,
    owner: Option<&Owner<'db>>,
    spec: DeclarationSpec,
) -> ScenarioResult<Declaration<'db>> {
    match spec {
        DeclarationSpec::Function {
            name,
            constructor,
            receiver,
            type_parameters,
            parameters,
            returns,
            hidden,
            low_priority,
        } => {
            let in_scope = parameters_in_scope(owner, &type_parameters)?;
            let syntax = TypeSyntax::new(db, classes).with_parameters(&in_scope);
            let value_parameters = parameters
                .iter()
                .map(|p| {
                    let mut parameter =
                        ValueParameter::new(Name::from_dynamic(&p.name), syntax.parse(&p.ty)?);
                    if p.default {
                        parameter = parameter.with_default();
                    }
                    if p.vararg {
                        parameter = parameter.vararg();
                    }
                    Ok(parameter)
                })
                .collect::<ScenarioResult<Vec<_>>>()?;

            let id = callable_id(db, owner, &name);
            let mut symbol = FunctionSymbol::new(id, syntax.parse(&returns)?)
                .with_parameters(value_parameters)
                .with_flags(DeclarationFlags {
                    hidden,
                    low_priority,
                });
            if constructor {
                symbol = symbol.with_kind(FunctionKind::Constructor);
            }
            if let Some(receiver) = receiver {
                symbol = symbol.with_receiver(syntax.parse(&receiver)?);
            }
            Ok(symbol.into())
        }
        DeclarationSpec::Property {
            name,
            receiver,
            type_parameters,
            ty,
            hidden,
            low_priority,
        } => {
            let in_scope = parameters_in_scope(owner, &type_parameters)?;
            let syntax = TypeSyntax::new(db, classes).with_parameters(&in_scope);
            let id = callable_id(db, owner, &name);
            let mut symbol = PropertySymbol::new(id, syntax.parse(&ty)?)
                .with_flags(DeclarationFlags {
                    hidden,
                    low_priority,
                });
            if let Some(receiver) = receiver {
                symbol = symbol.with_receiver(syntax.parse(&receiver)?);
            }
            Ok(symbol.into())
        }
        DeclarationSpec::Object { class, hidden } => {
            let id = ClassId::from_fq_name(db, &class);
            if !classes.contains(id) {
                return Err(ScenarioError::unknown_class(class));
            }
            let mut symbol = ObjectSymbol::new(db, id);
            symbol.flags.hidden = hidden;
            Ok(symbol.into())
        }
    }
}

/// The owner's type parameters followed by the declaration's own.
fn parameters_in_scope(owner: Option<&Owner<'_>>, own: &[String]) -> ScenarioResult<Vec<Name>> {
    let mut names: Vec<Name> = owner
        .map(|owner| owner.type_parameters.clone())
        .unwrap_or_default();
    for text in own {
        names.push(parse_type_parameter(text)?.name);
    }
    Ok(names)
}

fn callable_id<'db>(
    db: &'db dyn salsa::Database,
    owner: Option<&Owner<'db>>,
    name: &str,
) -> CallableId {
    match owner {
        Some(owner) => CallableId::member(
            owner.class.package(db).clone(),
            owner.class.name(db),
            Name::from_dynamic(name),
        ),
        None => match name.rsplit_once('.') {
            Some((package, name)) => {
                CallableId::top_level(PackagePath::parse(package), Name::from_dynamic(name))
            }
            None => CallableId::top_level(PackagePath::root(), Name::from_dynamic(name)),
        },
    }
}

/// `T`, `out T` or `in T`.
fn call_text(spec: &CallSpec) -> String {
    let reference = matches!(spec.kind, CallKindSpec::CallableReference);
    let separator = if reference { "::" } else { "." };

    let mut text = String::new();
    match &spec.receiver {
        Some(CallReceiverSpec::Expression(ty)) => {
            let _ = write!(text, "<{ty}>{separator}");
        }
        Some(CallReceiverSpec::Package(path) | CallReceiverSpec::Class(path)) => {
            let _ = write!(text, "{path}{separator}");
        }
        None if reference => text.push_str("::"),
        None => {}
    }
    text.push_str(&spec.name);
    if matches!(spec.kind, CallKindSpec::Function) {
        let _ = write!(text, "({})", spec.arguments.join(", "));
    }
    text
}

fn class_kind(spec: ClassKindSpec) -> ClassKind {
    match spec {
        ClassKindSpec::Class => ClassKind::Class,
        ClassKindSpec::Interface => ClassKind::Interface,
        ClassKindSpec::Object => ClassKind::Object,
        ClassKindSpec::Enum => ClassKind::Enum,
    }
}

fn scope_kind(spec: ScopeKindSpec) -> ScopeKind {
    match spec {
        ScopeKindSpec::Local => ScopeKind::Local,
        ScopeKindSpec::Package => ScopeKind::Package,
        ScopeKindSpec::Member => ScopeKind::Member,
        ScopeKindSpec::ExplicitImport => ScopeKind::ExplicitImport,
        ScopeKindSpec::StarImport => ScopeKind::StarImport,
        ScopeKindSpec::DefaultImport => ScopeKind::DefaultImport,
    }
}

fn invoke_priority(spec: InvokePrioritySpec) -> InvokeResolvePriority {
    match spec {
        InvokePrioritySpec::None => InvokeResolvePriority::None,
        InvokePrioritySpec::InvokeReceiver => InvokeResolvePriority::InvokeReceiver,
        InvokePrioritySpec::CommonInvoke => InvokeResolvePriority::CommonInvoke,
        InvokePrioritySpec::InvokeExtension => InvokeResolvePriority::InvokeExtension,
    }
}

fn explicit_receiver_kind(spec: ExplicitReceiverKindSpec) -> ExplicitReceiverKind {
    match spec {
        ExplicitReceiverKindSpec::None => ExplicitReceiverKind::NoExplicitReceiver,
        ExplicitReceiverKindSpec::Dispatch => ExplicitReceiverKind::DispatchReceiver,
        ExplicitReceiverKindSpec::Extension => ExplicitReceiverKind::ExtensionReceiver,
        ExplicitReceiverKindSpec::Both => ExplicitReceiverKind::BothReceivers,
    }
}
