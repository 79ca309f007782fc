//! Tower levels: the places a name is looked up in.

use std::fmt::Write as _;
use std::sync::Arc;

use belfry_core::Name;

use crate::declaration::Declaration;
use crate::receiver::ReceiverValue;
use crate::scope::Scope;
use crate::tower::ProcessResult;

/// The kind of declaration a level is queried for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Properties,
    Functions,
    /// Objects used as values.
    Objects,
}

/// Receives every declaration a level reports.
pub trait TowerScopeLevelProcessor<'db> {
    fn consume_candidate(
        &mut self,
        declaration: &Declaration<'db>,
        dispatch_receiver: Option<ReceiverValue<'db>>,
        extension_receiver: Option<ReceiverValue<'db>>,
        scope: &Arc<Scope<'db>>,
        builtin_extension_receiver: Option<ReceiverValue<'db>>,
    );
}

/// One place to look for a name.
///
/// A level never mutates anything it is given other than through the
/// processor, and querying it twice reports the same declarations twice.
pub trait TowerScopeLevel<'db> {
    /// Report every declaration named `name` that is visible as `token`,
    /// calling `processor` once per match in the level's own order.
    fn process_elements_by_name(
        &self,
        token: Token,
        name: Name,
        processor: &mut dyn TowerScopeLevelProcessor<'db>,
    ) -> ProcessResult;

    /// The extension receiver this level is bound to, if any.
    fn extension_receiver(&self) -> Option<ReceiverValue<'db>>;

    /// A one-line description for tower dumps.
    fn describe(&self, db: &'db dyn salsa::Database) -> String;
}

impl<'db, L: TowerScopeLevel<'db> + ?Sized> TowerScopeLevel<'db> for &L {
    fn process_elements_by_name(
        &self,
        token: Token,
        name: Name,
        processor: &mut dyn TowerScopeLevelProcessor<'db>,
    ) -> ProcessResult {
        (**self).process_elements_by_name(token, name, processor)
    }

    fn extension_receiver(&self) -> Option<ReceiverValue<'db>> {
        (**self).extension_receiver()
    }

    fn describe(&self, db: &'db dyn salsa::Database) -> String {
        (**self).describe(db)
    }
}

/// Receivers a scope's matches are reported with.
#[derive(Clone, Copy, Default)]
struct Binding<'db> {
    dispatch: Option<ReceiverValue<'db>>,
    extension: Option<ReceiverValue<'db>>,
    invoke: Option<ReceiverValue<'db>>,
}

/// Report the matches of one scope.
///
/// With an extension receiver bound only extension callables match, without
/// one only non-extension callables do. Objects never take receivers.
fn process_scope<'db>(
    scope: &Arc<Scope<'db>>,
    token: Token,
    name: Name,
    binding: Binding<'db>,
    processor: &mut dyn TowerScopeLevelProcessor<'db>,
) -> ProcessResult {
    let mut found = false;

    for declaration in scope.declarations_named(name) {
        if declaration.token() != token {
            continue;
        }
        match token {
            Token::Objects => {
                if binding.extension.is_some() {
                    continue;
                }
                processor.consume_candidate(declaration, None, None, scope, None);
            }
            Token::Properties | Token::Functions => {
                if declaration.is_extension() != binding.extension.is_some() {
                    continue;
                }
                let invoke = binding.invoke.filter(|_| token == Token::Functions);
                processor.consume_candidate(
                    declaration,
                    binding.dispatch,
                    binding.extension,
                    scope,
                    invoke,
                );
            }
        }
        found = true;
    }

    match (found, scope.hides_outer) {
        (false, _) => ProcessResult::NotFound,
        (true, false) => ProcessResult::Found,
        (true, true) => ProcessResult::Stop,
    }
}

fn describe_extension<'db>(
    out: &mut String,
    db: &'db dyn salsa::Database,
    extension: Option<ReceiverValue<'db>>,
) {
    if let Some(extension) = extension {
        let _ = write!(out, " with extension receiver {}", extension.display(db));
    }
}

/// A local or package scope.
#[derive(Clone, Debug)]
pub struct LexicalScopeLevel<'db> {
    scope: Arc<Scope<'db>>,
    extension_receiver: Option<ReceiverValue<'db>>,
}

impl<'db> LexicalScopeLevel<'db> {
    pub fn new(scope: Arc<Scope<'db>>) -> Self {
        Self {
            scope,
            extension_receiver: None,
        }
    }

    pub fn with_extension_receiver(mut self, receiver: ReceiverValue<'db>) -> Self {
        self.extension_receiver = Some(receiver);
        self
    }
}

impl<'db> TowerScopeLevel<'db> for LexicalScopeLevel<'db> {
    fn process_elements_by_name(
        &self,
        token: Token,
        name: Name,
        processor: &mut dyn TowerScopeLevelProcessor<'db>,
    ) -> ProcessResult {
        let binding = Binding {
            extension: self.extension_receiver,
            ..Binding::default()
        };
        process_scope(&self.scope, token, name, binding, processor)
    }

    fn extension_receiver(&self) -> Option<ReceiverValue<'db>> {
        self.extension_receiver
    }

    fn describe(&self, db: &'db dyn salsa::Database) -> String {
        let mut out = format!("{:?} scope {}", self.scope.kind, self.scope.name);
        describe_extension(&mut out, db, self.extension_receiver);
        out
    }
}

/// The member scope of a dispatch receiver.
///
/// Member extensions (extensions declared inside a class) are reported when
/// an extension receiver is bound as well.
#[derive(Clone, Debug)]
pub struct MemberScopeLevel<'db> {
    dispatch_receiver: ReceiverValue<'db>,
    scope: Arc<Scope<'db>>,
    extension_receiver: Option<ReceiverValue<'db>>,
    invoke_receiver: Option<ReceiverValue<'db>>,
}

impl<'db> MemberScopeLevel<'db> {
    pub fn new(dispatch_receiver: ReceiverValue<'db>, scope: Arc<Scope<'db>>) -> Self {
        Self {
            dispatch_receiver,
            scope,
            extension_receiver: None,
            invoke_receiver: None,
        }
    }

    pub fn with_extension_receiver(mut self, receiver: ReceiverValue<'db>) -> Self {
        self.extension_receiver = Some(receiver);
        self
    }

    /// Bind the receiver of a built-in `invoke` extension, reported with
    /// every function match.
    pub fn with_invoke_receiver(mut self, receiver: ReceiverValue<'db>) -> Self {
        self.invoke_receiver = Some(receiver);
        self
    }
}

impl<'db> TowerScopeLevel<'db> for MemberScopeLevel<'db> {
    fn process_elements_by_name(
        &self,
        token: Token,
        name: Name,
        processor: &mut dyn TowerScopeLevelProcessor<'db>,
    ) -> ProcessResult {
        let binding = Binding {
            dispatch: Some(self.dispatch_receiver),
            extension: self.extension_receiver,
            invoke: self.invoke_receiver,
        };
        process_scope(&self.scope, token, name, binding, processor)
    }

    fn extension_receiver(&self) -> Option<ReceiverValue<'db>> {
        self.extension_receiver
    }

    fn describe(&self, db: &'db dyn salsa::Database) -> String {
        let mut out = format!("members of {}", self.dispatch_receiver.display(db));
        describe_extension(&mut out, db, self.extension_receiver);
        if let Some(invoke) = self.invoke_receiver {
            let _ = write!(out, " with invoke receiver {}", invoke.display(db));
        }
        out
    }
}

/// An explicit, star or default import scope.
#[derive(Clone, Debug)]
pub struct ImportScopeLevel<'db> {
    scope: Arc<Scope<'db>>,
    extension_receiver: Option<ReceiverValue<'db>>,
}

impl<'db> ImportScopeLevel<'db> {
    pub fn new(scope: Arc<Scope<'db>>) -> Self {
        Self {
            scope,
            extension_receiver: None,
        }
    }

    pub fn with_extension_receiver(mut self, receiver: ReceiverValue<'db>) -> Self {
        self.extension_receiver = Some(receiver);
        self
    }
}

impl<'db> TowerScopeLevel<'db> for ImportScopeLevel<'db> {
    fn process_elements_by_name(
        &self,
        token: Token,
        name: Name,
        processor: &mut dyn TowerScopeLevelProcessor<'db>,
    ) -> ProcessResult {
        let binding = Binding {
            extension: self.extension_receiver,
            ..Binding::default()
        };
        process_scope(&self.scope, token, name, binding, processor)
    }

    fn extension_receiver(&self) -> Option<ReceiverValue<'db>> {
        self.extension_receiver
    }

    fn describe(&self, db: &'db dyn salsa::Database) -> String {
        let mut out = format!("import {}", self.scope.name);
        describe_extension(&mut out, db, self.extension_receiver);
        out
    }
}
