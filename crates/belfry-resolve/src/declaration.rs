//! Declarations that a scope can contain.
//!
//! Resolution only needs the shape of a declaration, never its body: its
//! identity, whether it is an extension, its parameters and a couple of
//! visibility flags.

use belfry_core::{CallableId, Name, PackagePath};
use belfry_types::{ClassId, Type};

use crate::tower::Token;

/// A declaration that a name can resolve to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration<'db> {
    Property(PropertySymbol<'db>),
    Function(FunctionSymbol<'db>),
    /// A singleton object used as a value.
    Object(ObjectSymbol<'db>),
}

/// A property, possibly an extension property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySymbol<'db> {
    pub id: CallableId,
    pub receiver_type: Option<Type<'db>>,
    pub return_type: Type<'db>,
    pub flags: DeclarationFlags,
}

/// Whether a function is an ordinary named function or a constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Named,
    Constructor,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueParameter<'db> {
    pub name: Name,
    pub ty: Type<'db>,
    pub has_default: bool,
    /// A vararg parameter absorbs every remaining argument; `ty` is the element type.
    pub is_vararg: bool,
}

impl<'db> ValueParameter<'db> {
    pub fn new(name: Name, ty: Type<'db>) -> Self {
        Self {
            name,
            ty,
            has_default: false,
            is_vararg: false,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn vararg(mut self) -> Self {
        self.is_vararg = true;
        self
    }
}

/// A function or constructor, possibly an extension function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSymbol<'db> {
    pub id: CallableId,
    pub kind: FunctionKind,
    pub receiver_type: Option<Type<'db>>,
    pub value_parameters: Vec<ValueParameter<'db>>,
    pub return_type: Type<'db>,
    pub flags: DeclarationFlags,
}

impl<'db> FunctionSymbol<'db> {
    pub fn new(id: CallableId, return_type: Type<'db>) -> Self {
        Self {
            id,
            kind: FunctionKind::Named,
            receiver_type: None,
            value_parameters: Vec::new(),
            return_type,
            flags: DeclarationFlags::default(),
        }
    }

    pub fn with_kind(mut self, kind: FunctionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_receiver(mut self, receiver_type: Type<'db>) -> Self {
        self.receiver_type = Some(receiver_type);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<ValueParameter<'db>>) -> Self {
        self.value_parameters = parameters;
        self
    }

    pub fn with_flags(mut self, flags: DeclarationFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl<'db> PropertySymbol<'db> {
    pub fn new(id: CallableId, return_type: Type<'db>) -> Self {
        Self {
            id,
            receiver_type: None,
            return_type,
            flags: DeclarationFlags::default(),
        }
    }

    pub fn with_receiver(mut self, receiver_type: Type<'db>) -> Self {
        self.receiver_type = Some(receiver_type);
        self
    }

    pub fn with_flags(mut self, flags: DeclarationFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// An object declaration. Its name is the simple name of its class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSymbol<'db> {
    pub class: ClassId<'db>,
    pub id: CallableId,
    pub flags: DeclarationFlags,
}

impl<'db> ObjectSymbol<'db> {
    pub fn new(db: &'db dyn salsa::Database, class: ClassId<'db>) -> Self {
        Self {
            class,
            id: CallableId::top_level(class.package(db).clone(), class.name(db)),
            flags: DeclarationFlags::default(),
        }
    }
}

/// Visibility-related flags shared by every declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DeclarationFlags {
    /// Present in scope but not accessible from the call site.
    pub hidden: bool,
    /// Loses to any other successful candidate in the same group.
    pub low_priority: bool,
}

/// The part of a declaration that an override replaces.
///
/// Two member declarations with the same key shadow each other; the one
/// declared nearest to the receiver class wins.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverrideKey<'db> {
    token: Token,
    name: Name,
    receiver_type: Option<Type<'db>>,
    parameter_types: Vec<Type<'db>>,
}

impl<'db> Declaration<'db> {
    pub fn id(&self) -> &CallableId {
        match self {
            Declaration::Property(p) => &p.id,
            Declaration::Function(f) => &f.id,
            Declaration::Object(o) => &o.id,
        }
    }

    pub fn name(&self) -> Name {
        self.id().name
    }

    pub fn package(&self) -> &PackagePath {
        &self.id().package
    }

    /// The token kind under which this declaration is found.
    pub fn token(&self) -> Token {
        match self {
            Declaration::Property(_) => Token::Properties,
            Declaration::Function(_) => Token::Functions,
            Declaration::Object(_) => Token::Objects,
        }
    }

    /// The declared extension receiver type, if this is an extension.
    pub fn receiver_type(&self) -> Option<Type<'db>> {
        match self {
            Declaration::Property(p) => p.receiver_type,
            Declaration::Function(f) => f.receiver_type,
            Declaration::Object(_) => None,
        }
    }

    pub fn is_extension(&self) -> bool {
        self.receiver_type().is_some()
    }

    pub fn flags(&self) -> DeclarationFlags {
        match self {
            Declaration::Property(p) => p.flags,
            Declaration::Function(f) => f.flags,
            Declaration::Object(o) => o.flags,
        }
    }

    /// The function symbol, if this is a function or constructor.
    pub fn as_function(&self) -> Option<&FunctionSymbol<'db>> {
        match self {
            Declaration::Function(f) => Some(f),
            _ => None,
        }
    }

    /// The type of the value this declaration evaluates to when used as a
    /// variable or called.
    pub fn result_type(&self, db: &'db dyn salsa::Database) -> Type<'db> {
        match self {
            Declaration::Property(p) => p.return_type,
            Declaration::Function(f) => f.return_type,
            Declaration::Object(o) => Type::simple(db, o.class),
        }
    }

    pub fn override_key(&self) -> OverrideKey<'db> {
        OverrideKey {
            token: self.token(),
            name: self.name(),
            receiver_type: self.receiver_type(),
            parameter_types: self
                .as_function()
                .map(|f| f.value_parameters.iter().map(|p| p.ty).collect())
                .unwrap_or_default(),
        }
    }
}

impl<'db> From<PropertySymbol<'db>> for Declaration<'db> {
    fn from(symbol: PropertySymbol<'db>) -> Self {
        Declaration::Property(symbol)
    }
}

impl<'db> From<FunctionSymbol<'db>> for Declaration<'db> {
    fn from(symbol: FunctionSymbol<'db>) -> Self {
        Declaration::Function(symbol)
    }
}

impl<'db> From<ObjectSymbol<'db>> for Declaration<'db> {
    fn from(symbol: ObjectSymbol<'db>) -> Self {
        Declaration::Object(symbol)
    }
}
