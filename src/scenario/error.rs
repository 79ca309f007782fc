//! Errors raised while loading a scenario.

use std::path::PathBuf;

use derive_more::{Display, Error};

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Display, Debug, Error)]
#[display("{kind}")]
pub struct ScenarioError {
    kind: Box<ScenarioErrorKind>,
}

impl<E> From<E> for ScenarioError
where
    ScenarioErrorKind: From<E>,
{
    fn from(error: E) -> Self {
        ScenarioError {
            kind: Box::new(ScenarioErrorKind::from(error)),
        }
    }
}

impl ScenarioError {
    pub fn kind(&self) -> &ScenarioErrorKind {
        &self.kind
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScenarioErrorKind::Io {
            path: path.into(),
            source,
        }
        .into()
    }

    pub(crate) fn unknown_class(name: impl Into<String>) -> Self {
        ScenarioErrorKind::UnknownClass(name.into()).into()
    }

    pub(crate) fn unknown_scope(name: impl Into<String>) -> Self {
        ScenarioErrorKind::UnknownScope(name.into()).into()
    }

    pub(crate) fn bad_type(text: impl Into<String>, reason: &'static str) -> Self {
        ScenarioErrorKind::BadType {
            text: text.into(),
            reason,
        }
        .into()
    }

    pub(crate) fn bad_group(text: impl Into<String>) -> Self {
        ScenarioErrorKind::BadGroup(text.into()).into()
    }
}

#[derive(Display, Debug, Error)]
pub enum ScenarioErrorKind {
    #[display("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("invalid scenario: {_0}")]
    Json(serde_json::Error),

    #[display("unknown class `{_0}`")]
    UnknownClass(#[error(not(source))] String),

    #[display("unknown scope `{_0}`")]
    UnknownScope(#[error(not(source))] String),

    #[display("malformed type `{text}`: {reason}")]
    BadType { text: String, reason: &'static str },

    #[display("malformed tower group `{_0}`")]
    BadGroup(#[error(not(source))] String),
}

impl From<serde_json::Error> for ScenarioErrorKind {
    fn from(error: serde_json::Error) -> Self {
        ScenarioErrorKind::Json(error)
    }
}
