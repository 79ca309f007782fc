//! Lexical parsers shared by the type and tower group syntaxes.

use winnow::combinator::separated;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Skip whitespace.
pub(super) fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

/// At least one whitespace character.
pub(super) fn ws1(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

/// Parse an identifier: a letter or `_`, then letters, digits and `_`.
pub(super) fn ident<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Parse a dot-separated name such as `core.collections.List`.
pub(super) fn dotted_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    separated(1.., ident, '.')
        .map(|()| ())
        .take()
        .parse_next(input)
}

/// Parse a run of letters, digits and `_`, such as a group kind or its depth.
pub(super) fn word<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}
