//! The slice of the type system that name resolution consults: class
//! identities, the class hierarchy, interned types and subtyping.

pub mod class;
pub mod subtyping;
pub mod types;

pub use class::{ClassId, ClassInfo, ClassKind, ClassTable, TypeParameter, Variance};
pub use subtyping::{SubtypeOracle, TypeChecker};
pub use types::{Type, TypeArg, TypeKind};
