//! Resolver configuration.

use belfry_core::PackagePath;

/// Knobs that change how candidates are filtered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Root of the implicitly imported standard library. Extension functions
    /// declared here or in a subpackage are subject to receiver filtering.
    pub default_package: PackagePath,
    /// Fully qualified name of the class every class extends.
    pub root_class: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_package: PackagePath::parse("core"),
            root_class: "core.Any".to_owned(),
        }
    }
}

impl ResolverConfig {
    pub fn with_default_package(mut self, package: PackagePath) -> Self {
        self.default_package = package;
        self
    }

    pub fn with_root_class(mut self, root_class: impl Into<String>) -> Self {
        self.root_class = root_class.into();
        self
    }

    /// Whether `package` is the default package or one of its subpackages.
    pub fn is_default_package(&self, package: &PackagePath) -> bool {
        package.starts_with(&self.default_package)
    }
}
