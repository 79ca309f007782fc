//! Interned types.
//!
//! Only the shapes name resolution cares about are modelled: class types with
//! use-site projected arguments, type parameters, and an error type that is
//! compatible with everything to keep one bad declaration from cascading.

use std::fmt::{self, Display, Formatter};

use belfry_core::Name;

use crate::ClassId;

/// A type.
#[salsa::interned(debug)]
pub struct Type<'db> {
    #[returns(ref)]
    pub kind: TypeKind<'db>,
}

/// The different kinds of types.
#[derive(Clone, Debug, PartialEq, Eq, Hash, salsa::Update)]
pub enum TypeKind<'db> {
    /// A class-like type: a class, interface or object applied to arguments.
    Class {
        class: ClassId<'db>,
        args: Vec<TypeArg<'db>>,
        nullable: bool,
    },

    /// A reference to a type parameter in scope.
    Parameter { name: Name, nullable: bool },

    /// Error type (used when a type could not be determined).
    Error,
}

/// A type argument, possibly projected at the use site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, salsa::Update)]
pub enum TypeArg<'db> {
    /// `*`: any argument.
    Star,
    Invariant(Type<'db>),
    /// `out T`
    Out(Type<'db>),
    /// `in T`
    In(Type<'db>),
}

impl<'db> TypeArg<'db> {
    pub fn ty(&self) -> Option<Type<'db>> {
        match self {
            TypeArg::Star => None,
            TypeArg::Invariant(ty) | TypeArg::Out(ty) | TypeArg::In(ty) => Some(*ty),
        }
    }
}

impl<'db> Type<'db> {
    pub fn class(
        db: &'db dyn salsa::Database,
        class: ClassId<'db>,
        args: Vec<TypeArg<'db>>,
        nullable: bool,
    ) -> Self {
        Self::new(
            db,
            TypeKind::Class {
                class,
                args,
                nullable,
            },
        )
    }

    /// A non-null class type without arguments.
    pub fn simple(db: &'db dyn salsa::Database, class: ClassId<'db>) -> Self {
        Self::class(db, class, Vec::new(), false)
    }

    pub fn parameter(db: &'db dyn salsa::Database, name: Name, nullable: bool) -> Self {
        Self::new(db, TypeKind::Parameter { name, nullable })
    }

    pub fn error(db: &'db dyn salsa::Database) -> Self {
        Self::new(db, TypeKind::Error)
    }

    /// Whether this is a class-like type (as opposed to a type parameter or error).
    pub fn is_class_like(self, db: &'db dyn salsa::Database) -> bool {
        matches!(self.kind(db), TypeKind::Class { .. })
    }

    pub fn is_error(self, db: &'db dyn salsa::Database) -> bool {
        matches!(self.kind(db), TypeKind::Error)
    }

    pub fn is_nullable(self, db: &'db dyn salsa::Database) -> bool {
        match self.kind(db) {
            TypeKind::Class { nullable, .. } | TypeKind::Parameter { nullable, .. } => *nullable,
            TypeKind::Error => false,
        }
    }

    /// The class of a class-like type.
    pub fn class_id(self, db: &'db dyn salsa::Database) -> Option<ClassId<'db>> {
        match self.kind(db) {
            TypeKind::Class { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// The arguments of a class-like type; empty for other types.
    pub fn args(self, db: &'db dyn salsa::Database) -> &'db [TypeArg<'db>] {
        match self.kind(db) {
            TypeKind::Class { args, .. } => args.as_slice(),
            _ => &[],
        }
    }

    /// Whether a type parameter occurs anywhere in this type.
    pub fn mentions_parameters(self, db: &'db dyn salsa::Database) -> bool {
        match self.kind(db) {
            TypeKind::Parameter { .. } => true,
            TypeKind::Class { args, .. } => args
                .iter()
                .filter_map(TypeArg::ty)
                .any(|ty| ty.mentions_parameters(db)),
            TypeKind::Error => false,
        }
    }

    /// The same type with its nullability replaced.
    pub fn with_nullability(self, db: &'db dyn salsa::Database, nullable: bool) -> Self {
        match self.kind(db) {
            TypeKind::Class {
                class,
                args,
                nullable: current,
            } if *current != nullable => Self::class(db, *class, args.clone(), nullable),
            TypeKind::Parameter {
                name,
                nullable: current,
            } if *current != nullable => Self::parameter(db, *name, nullable),
            _ => self,
        }
    }

    /// The same class with every argument replaced by `*`.
    ///
    /// `Map<K, V>` becomes `Map<*, *>`. Non-class types are returned unchanged.
    pub fn star_projected(self, db: &'db dyn salsa::Database, nullable: bool) -> Self {
        match self.kind(db) {
            TypeKind::Class { class, args, .. } => {
                Self::class(db, *class, vec![TypeArg::Star; args.len()], nullable)
            }
            _ => self,
        }
    }

    /// Render the type as source text, e.g. `core.List<out app.Shape>?`.
    pub fn display(self, db: &'db dyn salsa::Database) -> impl Display + 'db {
        TypeDisplay { db, ty: self }
    }
}

struct TypeDisplay<'db> {
    db: &'db dyn salsa::Database,
    ty: Type<'db>,
}

impl<'db> TypeDisplay<'db> {
    fn write_arg(&self, f: &mut Formatter<'_>, arg: &TypeArg<'db>) -> fmt::Result {
        let (prefix, ty) = match arg {
            TypeArg::Star => return f.write_str("*"),
            TypeArg::Invariant(ty) => ("", ty),
            TypeArg::Out(ty) => ("out ", ty),
            TypeArg::In(ty) => ("in ", ty),
        };
        let inner = TypeDisplay {
            db: self.db,
            ty: *ty,
        };
        write!(f, "{prefix}{inner}")
    }
}

impl Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.ty.kind(self.db) {
            TypeKind::Class {
                class,
                args,
                nullable,
            } => {
                write!(f, "{}", class.qualified_name(self.db))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        self.write_arg(f, arg)?;
                    }
                    f.write_str(">")?;
                }
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            TypeKind::Parameter { name, nullable } => {
                write!(f, "{name}")?;
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            TypeKind::Error => f.write_str("<error>"),
        }
    }
}
