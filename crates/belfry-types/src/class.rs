//! Class identities and the class hierarchy.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::{self, Display, Formatter};

use belfry_core::{Name, PackagePath};

use crate::Type;

/// A unique identifier for a class, interface or object declaration.
///
/// ClassId is interned so that the same (package, name) always produces the
/// same id, regardless of where it's created.
#[salsa::interned(debug)]
pub struct ClassId<'db> {
    /// The declaring package (e.g., `core.collections`).
    #[returns(ref)]
    pub package: PackagePath,
    /// The simple class name.
    pub name: Name,
}

impl<'db> ClassId<'db> {
    /// Intern a class from its dotted fully qualified name (`core.collections.List`).
    pub fn from_fq_name(db: &'db dyn salsa::Database, fq_name: &str) -> Self {
        let (package, name) = match fq_name.rsplit_once('.') {
            Some((package, name)) => (PackagePath::parse(package), name),
            None => (PackagePath::root(), fq_name),
        };
        Self::new(db, package, Name::from_dynamic(name))
    }

    /// Displayable dotted name like `core.collections.List`.
    pub fn qualified_name(self, db: &'db dyn salsa::Database) -> impl Display + 'db {
        QualifiedClassName {
            package: self.package(db),
            name: self.name(db),
        }
    }
}

struct QualifiedClassName<'a> {
    package: &'a PackagePath,
    name: Name,
}

impl Display for QualifiedClassName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.package.is_root() {
            write!(f, "{}.", self.package)?;
        }
        write!(f, "{}", self.name)
    }
}

/// What sort of classifier a class declaration is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    /// A singleton; its name can be used as a value.
    Object,
    Enum,
}

/// Declaration-site variance of a type parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variance {
    #[default]
    Invariant,
    Out,
    In,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameter {
    pub name: Name,
    pub variance: Variance,
}

impl TypeParameter {
    pub fn invariant(name: Name) -> Self {
        Self {
            name,
            variance: Variance::Invariant,
        }
    }
}

/// Everything the type checker needs to know about one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo<'db> {
    pub id: ClassId<'db>,
    pub kind: ClassKind,
    pub type_parameters: Vec<TypeParameter>,
    /// Direct supertypes, written in terms of this class's type parameters.
    pub supertypes: Vec<Type<'db>>,
}

impl<'db> ClassInfo<'db> {
    pub fn new(id: ClassId<'db>, kind: ClassKind) -> Self {
        Self {
            id,
            kind,
            type_parameters: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    pub fn with_type_parameters(mut self, type_parameters: Vec<TypeParameter>) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    pub fn with_supertypes(mut self, supertypes: Vec<Type<'db>>) -> Self {
        self.supertypes = supertypes;
        self
    }
}

/// The class hierarchy of one resolution session.
///
/// Every class implicitly extends the root class (`core.Any` by default),
/// which is registered on construction.
#[derive(Clone, Debug)]
pub struct ClassTable<'db> {
    root: ClassId<'db>,
    classes: HashMap<ClassId<'db>, ClassInfo<'db>>,
}

impl<'db> ClassTable<'db> {
    pub fn new(root: ClassId<'db>) -> Self {
        let mut classes = HashMap::new();
        classes.insert(root, ClassInfo::new(root, ClassKind::Class));
        Self { root, classes }
    }

    /// The class every other class is a subclass of.
    pub fn root(&self) -> ClassId<'db> {
        self.root
    }

    /// Register a class, replacing any previous registration with the same id.
    pub fn insert(&mut self, info: ClassInfo<'db>) {
        self.classes.insert(info.id, info);
    }

    pub fn get(&self, id: ClassId<'db>) -> Option<&ClassInfo<'db>> {
        self.classes.get(&id)
    }

    pub fn contains(&self, id: ClassId<'db>) -> bool {
        self.classes.contains_key(&id)
    }

    pub fn kind(&self, id: ClassId<'db>) -> Option<ClassKind> {
        self.get(id).map(|info| info.kind)
    }

    /// Direct supertypes of `id`; empty for unknown classes.
    pub fn supertypes(&self, id: ClassId<'db>) -> &[Type<'db>] {
        self.get(id)
            .map(|info| info.supertypes.as_slice())
            .unwrap_or_default()
    }

    /// `id` followed by all of its superclasses in breadth-first order, nearest first.
    ///
    /// The root class always comes last. Cycles in a malformed hierarchy are cut.
    pub fn superclasses(
        &self,
        db: &'db dyn salsa::Database,
        id: ClassId<'db>,
    ) -> Vec<ClassId<'db>> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id]);

        while let Some(class) = queue.pop_front() {
            if class == self.root || !seen.insert(class) {
                continue;
            }
            order.push(class);
            for supertype in self.supertypes(class) {
                if let Some(superclass) = supertype.class_id(db) {
                    queue.push_back(superclass);
                }
            }
        }

        order.push(self.root);
        order
    }
}
