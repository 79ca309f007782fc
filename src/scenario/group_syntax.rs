//! Parsing of tower group paths such as `implicit(1).member`.
//!
//! ```text
//! group    := ('empty' | kind ('.' kind)*) ('[' priority ']')?
//! kind     := word ('(' word ')')?
//! priority := word
//! ```
//!
//! Words are matched without regard to case or underscores, so every group
//! parses back from its `Display` output, including `Empty` and a
//! ` [CommonInvoke]` invoke-priority suffix.

use belfry_resolve::tower::{ImportPriority, InvokeResolvePriority, TowerGroup, TowerGroupKind};
use winnow::ascii::Caseless;
use winnow::combinator::{alt, delimited, opt, preceded, separated};
use winnow::prelude::*;

use super::error::{ScenarioError, ScenarioResult};
use super::syntax::{word, ws};

/// Parse a group path such as `local(0)`, `Import(Star)` or
/// `implicit(0).invoke_extension [InvokeReceiver]`.
pub fn parse_group(text: &str) -> ScenarioResult<TowerGroup> {
    let mut input = text;
    let group = delimited(ws, group, ws)
        .parse_next(&mut input)
        .map_err(|_| ScenarioError::bad_group(text))?;
    if !input.is_empty() {
        return Err(ScenarioError::bad_group(text));
    }
    Ok(group)
}

fn group(input: &mut &str) -> ModalResult<TowerGroup> {
    let group = alt((
        Caseless("empty").value(TowerGroup::empty()),
        separated(1.., group_kind, (ws, '.', ws)).map(|kinds: Vec<TowerGroupKind>| {
            kinds.into_iter().fold(TowerGroup::empty(), TowerGroup::then)
        }),
    ))
    .parse_next(input)?;

    let priority = opt(preceded(
        ws,
        delimited(('[', ws), word.verify_map(invoke_priority), (ws, ']')),
    ))
    .parse_next(input)?;

    Ok(match priority {
        Some(priority) => group.with_invoke_priority(priority),
        None => group,
    })
}

fn group_kind(input: &mut &str) -> ModalResult<TowerGroupKind> {
    (word, opt(delimited(('(', ws), word, (ws, ')'))))
        .verify_map(|(head, arg)| kind(head, arg))
        .parse_next(input)
}

/// `Import_Star` and `importstar` are the same word.
fn normalized(word: &str) -> String {
    word.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn kind(head: &str, arg: Option<&str>) -> Option<TowerGroupKind> {
    let depth = |arg: &str| arg.parse::<u32>().ok();

    let kind = match (normalized(head).as_str(), arg) {
        ("start", None) => TowerGroupKind::Start,
        ("classifierprioritized", None) => TowerGroupKind::ClassifierPrioritized,
        ("qualifier", None) => TowerGroupKind::Qualifier,
        ("classifier", None) => TowerGroupKind::Classifier,
        ("topprioritized", Some(arg)) => TowerGroupKind::TopPrioritized(depth(arg)?),
        ("local", Some(arg)) => TowerGroupKind::Local(depth(arg)?),
        ("member", None) => TowerGroupKind::Member,
        ("implicit", Some(arg)) => TowerGroupKind::ImplicitOrNonLocal(depth(arg)?),
        ("import", Some(arg)) => TowerGroupKind::Import(match normalized(arg).as_str() {
            "explicit" => ImportPriority::Explicit,
            "package" => ImportPriority::Package,
            "star" => ImportPriority::Star,
            "default" => ImportPriority::Default,
            _ => return None,
        }),
        ("invokeextension", None) => TowerGroupKind::InvokeExtension,
        ("qualifiervalue", None) => TowerGroupKind::QualifierValue,
        ("last", None) => TowerGroupKind::Last,
        _ => return None,
    };
    Some(kind)
}

fn invoke_priority(word: &str) -> Option<InvokeResolvePriority> {
    let priority = match normalized(word).as_str() {
        "none" => InvokeResolvePriority::None,
        "invokereceiver" => InvokeResolvePriority::InvokeReceiver,
        "commoninvoke" => InvokeResolvePriority::CommonInvoke,
        "invokeextension" => InvokeResolvePriority::InvokeExtension,
        _ => return None,
    };
    Some(priority)
}
