//! Package paths and callable identities.

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::Name;

/// A dotted package path such as `core.collections`.
///
/// The empty path is the root package.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, salsa::Update)]
pub struct PackagePath(SmallVec<[Name; 4]>);

impl PackagePath {
    /// The root package.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(segments: impl IntoIterator<Item = Name>) -> Self {
        Self(segments.into_iter().collect())
    }

    /// Parse a dotted path. Empty segments are ignored, so `""` is the root.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.split('.')
                .filter(|segment| !segment.is_empty())
                .map(Name::from_dynamic),
        )
    }

    pub fn segments(&self) -> &[Name] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `prefix` is this path or one of its ancestors.
    ///
    /// Every path starts with the root package.
    pub fn starts_with(&self, prefix: &PackagePath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl Display for PackagePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PackagePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PackagePath({self})")
    }
}

/// The identity of a callable declaration: package, optional containing class, name.
///
/// Members share the package of their class; top-level callables have no class.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, salsa::Update)]
pub struct CallableId {
    pub package: PackagePath,
    pub class_name: Option<Name>,
    pub name: Name,
}

impl CallableId {
    pub fn top_level(package: PackagePath, name: Name) -> Self {
        Self {
            package,
            class_name: None,
            name,
        }
    }

    pub fn member(package: PackagePath, class_name: Name, name: Name) -> Self {
        Self {
            package,
            class_name: Some(class_name),
            name,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.class_name.is_none()
    }
}

impl Display for CallableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.package.is_root() {
            write!(f, "{}.", self.package)?;
        }
        if let Some(class_name) = self.class_name {
            write!(f, "{class_name}.")?;
        }
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for CallableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CallableId({self})")
    }
}
