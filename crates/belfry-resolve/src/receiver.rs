//! Receiver values bound to tower levels.

use std::fmt::{self, Display, Formatter};

use belfry_core::{Name, names};
use belfry_types::Type;

names! {
    /// Label of the innermost implicit receiver.
    THIS => "this",
}

/// Where a receiver value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReceiverSource {
    /// The expression written before the dot.
    Explicit,
    /// An implicit receiver in scope, named by its label (`this@Outer`).
    Implicit(Name),
}

/// A value that can stand in the dispatch or extension receiver position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReceiverValue<'db> {
    pub ty: Type<'db>,
    pub source: ReceiverSource,
}

impl<'db> ReceiverValue<'db> {
    pub fn explicit(ty: Type<'db>) -> Self {
        Self {
            ty,
            source: ReceiverSource::Explicit,
        }
    }

    /// The innermost implicit receiver, labelled `this`.
    pub fn this(ty: Type<'db>) -> Self {
        Self::implicit(ty, THIS())
    }

    pub fn implicit(ty: Type<'db>, label: Name) -> Self {
        Self {
            ty,
            source: ReceiverSource::Implicit(label),
        }
    }

    pub fn is_explicit(&self) -> bool {
        self.source == ReceiverSource::Explicit
    }

    pub fn display(&self, db: &'db dyn salsa::Database) -> impl Display + 'db {
        ReceiverDisplay { db, value: *self }
    }
}

struct ReceiverDisplay<'db> {
    db: &'db dyn salsa::Database,
    value: ReceiverValue<'db>,
}

impl Display for ReceiverDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.value.source {
            ReceiverSource::Explicit => write!(f, "<explicit>: ")?,
            ReceiverSource::Implicit(label) if label == THIS() => f.write_str("this: ")?,
            ReceiverSource::Implicit(label) => write!(f, "this@{label}: ")?,
        }
        write!(f, "{}", self.value.ty.display(self.db))
    }
}
