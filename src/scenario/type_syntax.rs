//! Parsing of type strings such as `core.Map<out core.String, *>?`.
//!
//! ```text
//! type := name ('<' arg (',' arg)* '>')? '?'?
//! arg  := '*' | ('out' | 'in') type | type
//! name := ident ('.' ident)*
//! ```
//!
//! Dotted names refer to classes. A bare name is a type parameter if one is
//! in scope with that name, and a root-package class otherwise.

use belfry_core::Name;
use belfry_types::{ClassId, ClassTable, Type, TypeArg, TypeParameter, Variance};
use winnow::combinator::{alt, delimited, opt, preceded, separated, terminated};
use winnow::prelude::*;

use super::error::{ScenarioError, ScenarioResult};
use super::syntax::{dotted_name, ident, ws, ws1};

/// A type as written, before names are looked up.
#[derive(Debug, Clone)]
struct RawType<'a> {
    name: &'a str,
    args: Vec<RawArg<'a>>,
    nullable: bool,
}

#[derive(Debug, Clone)]
enum RawArg<'a> {
    Star,
    Out(RawType<'a>),
    In(RawType<'a>),
    Invariant(RawType<'a>),
}

fn raw_type<'a>(input: &mut &'a str) -> ModalResult<RawType<'a>> {
    let name = dotted_name.parse_next(input)?;
    let args: Option<Vec<RawArg<'a>>> = opt(preceded(
        ws,
        delimited(
            ('<', ws),
            separated(1.., terminated(raw_arg, ws), (',', ws)),
            '>',
        ),
    ))
    .parse_next(input)?;
    let nullable = opt(preceded(ws, '?')).parse_next(input)?.is_some();

    Ok(RawType {
        name,
        args: args.unwrap_or_default(),
        nullable,
    })
}

fn raw_arg<'a>(input: &mut &'a str) -> ModalResult<RawArg<'a>> {
    alt((
        '*'.value(RawArg::Star),
        preceded(("out", ws1), raw_type).map(RawArg::Out),
        preceded(("in", ws1), raw_type).map(RawArg::In),
        raw_type.map(RawArg::Invariant),
    ))
    .parse_next(input)
}

fn variance(input: &mut &str) -> ModalResult<Variance> {
    opt(alt((
        terminated("out", ws1).value(Variance::Out),
        terminated("in", ws1).value(Variance::In),
    )))
    .map(|variance| variance.unwrap_or(Variance::Invariant))
    .parse_next(input)
}

/// Parse a class type parameter declaration: `T`, `out E` or `in K`.
pub(crate) fn parse_type_parameter(text: &str) -> ScenarioResult<TypeParameter> {
    let mut input = text;
    let (variance, name) = delimited(ws, (variance, ident), ws)
        .parse_next(&mut input)
        .map_err(|_| ScenarioError::bad_type(text, "malformed type parameter"))?;
    if !input.is_empty() {
        return Err(ScenarioError::bad_type(text, "malformed type parameter"));
    }
    Ok(TypeParameter {
        name: Name::from_dynamic(name),
        variance,
    })
}

pub(crate) struct TypeSyntax<'a, 'db> {
    db: &'db dyn salsa::Database,
    classes: &'a ClassTable<'db>,
    parameters: &'a [Name],
}

impl<'a, 'db> TypeSyntax<'a, 'db> {
    pub(crate) fn new(db: &'db dyn salsa::Database, classes: &'a ClassTable<'db>) -> Self {
        Self {
            db,
            classes,
            parameters: &[],
        }
    }

    /// Treat `parameters` as type parameters in scope.
    pub(crate) fn with_parameters(mut self, parameters: &'a [Name]) -> Self {
        self.parameters = parameters;
        self
    }

    pub(crate) fn parse(&self, text: &str) -> ScenarioResult<Type<'db>> {
        let mut input = text;
        let raw = delimited(ws, raw_type, ws)
            .parse_next(&mut input)
            .map_err(|_| ScenarioError::bad_type(text, "expected a type name"))?;
        if !input.is_empty() {
            return Err(ScenarioError::bad_type(text, "unexpected trailing input"));
        }
        self.resolve(text, raw)
    }

    fn resolve(&self, text: &str, raw: RawType<'_>) -> ScenarioResult<Type<'db>> {
        if !raw.name.contains('.') {
            let parameter = Name::from_dynamic(raw.name);
            if self.parameters.contains(&parameter) {
                if !raw.args.is_empty() {
                    return Err(ScenarioError::bad_type(
                        text,
                        "type parameters take no arguments",
                    ));
                }
                return Ok(Type::parameter(self.db, parameter, raw.nullable));
            }
        }

        let class = ClassId::from_fq_name(self.db, raw.name);
        let Some(info) = self.classes.get(class) else {
            return Err(ScenarioError::unknown_class(raw.name));
        };
        let arity = info.type_parameters.len();
        if !raw.args.is_empty() && raw.args.len() != arity {
            return Err(ScenarioError::bad_type(text, "wrong number of type arguments"));
        }
        // A raw generic class is read as its star projection.
        let args = if raw.args.is_empty() {
            vec![TypeArg::Star; arity]
        } else {
            raw.args
                .into_iter()
                .map(|arg| self.resolve_arg(text, arg))
                .collect::<ScenarioResult<Vec<_>>>()?
        };
        Ok(Type::class(self.db, class, args, raw.nullable))
    }

    fn resolve_arg(&self, text: &str, arg: RawArg<'_>) -> ScenarioResult<TypeArg<'db>> {
        Ok(match arg {
            RawArg::Star => TypeArg::Star,
            RawArg::Out(ty) => TypeArg::Out(self.resolve(text, ty)?),
            RawArg::In(ty) => TypeArg::In(self.resolve(text, ty)?),
            RawArg::Invariant(ty) => TypeArg::Invariant(self.resolve(text, ty)?),
        })
    }
}
