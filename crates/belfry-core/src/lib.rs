//! Shared vocabulary for the belfry resolver: interned names, package paths,
//! callable identities and diagnostics.

pub mod diagnostic;
pub mod name;
pub mod path;

pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSeverity};
pub use name::Name;
pub use path::{CallableId, PackagePath};
