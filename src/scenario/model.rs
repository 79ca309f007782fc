//! The on-disk shape of a scenario file.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioFile {
    #[serde(default)]
    pub config: ConfigSpec,
    #[serde(default)]
    pub classes: Vec<ClassSpec>,
    #[serde(default)]
    pub scopes: Vec<ScopeSpec>,
    #[serde(default)]
    pub tower: Vec<LevelSpec>,
    #[serde(default)]
    pub calls: Vec<CallSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigSpec {
    pub default_package: Option<String>,
    pub root_class: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ClassSpec {
    /// Fully qualified, e.g. `app.Shape`.
    pub name: String,
    #[serde(default)]
    pub kind: ClassKindSpec,
    /// `T`, `out E` or `in K`.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub members: Vec<DeclarationSpec>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ClassKindSpec {
    #[default]
    Class,
    Interface,
    Object,
    Enum,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScopeSpec {
    pub name: String,
    pub kind: ScopeKindSpec,
    #[serde(default)]
    pub hides_outer: bool,
    #[serde(default)]
    pub declarations: Vec<DeclarationSpec>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScopeKindSpec {
    Local,
    Package,
    Member,
    ExplicitImport,
    StarImport,
    DefaultImport,
}

/// A declaration. Top-level names are qualified (`core.max`); members use
/// their simple name.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum DeclarationSpec {
    Function {
        name: String,
        #[serde(default)]
        constructor: bool,
        receiver: Option<String>,
        #[serde(default)]
        type_parameters: Vec<String>,
        #[serde(default)]
        parameters: Vec<ParameterSpec>,
        returns: String,
        #[serde(default)]
        hidden: bool,
        #[serde(default)]
        low_priority: bool,
    },
    Property {
        name: String,
        receiver: Option<String>,
        #[serde(default)]
        type_parameters: Vec<String>,
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        hidden: bool,
        #[serde(default)]
        low_priority: bool,
    },
    Object {
        class: String,
        #[serde(default)]
        hidden: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub vararg: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LevelSpec {
    /// Dotted group path such as `local(0)` or `implicit(1).member`, with an
    /// optional `[common_invoke]` style invoke-priority suffix.
    pub group: String,
    #[serde(default)]
    pub invoke_priority: InvokePrioritySpec,
    #[serde(default)]
    pub explicit_receiver_kind: ExplicitReceiverKindSpec,
    #[serde(flatten)]
    pub level: LevelKindSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub(crate) enum LevelKindSpec {
    Lexical {
        scope: String,
        extension_receiver: Option<ReceiverSpec>,
    },
    /// Without `scope`, the members of the dispatch receiver's class.
    Member {
        dispatch_receiver: ReceiverSpec,
        scope: Option<String>,
        extension_receiver: Option<ReceiverSpec>,
        invoke_receiver: Option<ReceiverSpec>,
    },
    Import {
        scope: String,
        extension_receiver: Option<ReceiverSpec>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReceiverSpec {
    #[serde(rename = "type")]
    pub ty: String,
    /// Label of an implicit receiver; `this` when omitted.
    pub label: Option<String>,
    #[serde(default)]
    pub explicit: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum InvokePrioritySpec {
    #[default]
    None,
    InvokeReceiver,
    CommonInvoke,
    InvokeExtension,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ExplicitReceiverKindSpec {
    #[default]
    None,
    Dispatch,
    Extension,
    Both,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CallSpec {
    pub kind: CallKindSpec,
    pub name: String,
    pub receiver: Option<CallReceiverSpec>,
    #[serde(default)]
    pub arguments: Vec<String>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CallKindSpec {
    Variable,
    Function,
    CallableReference,
}

/// `{"expression": "app.Shape"}`, `{"package": "core"}` or `{"class": "app.Color"}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CallReceiverSpec {
    Expression(String),
    Package(String),
    Class(String),
}
