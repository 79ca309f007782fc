//! Common test utilities for scenario tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Write a scenario to a temporary `.json` file.
#[allow(dead_code)]
pub fn scenario_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".json").expect("Failed to create temp file");
    file.write_all(json.as_bytes())
        .expect("Failed to write scenario");
    file
}

/// Shapes in a small app, resolved against local, member, package and
/// default-import levels.
#[allow(dead_code)]
pub const SHAPES: &str = r#"{
    "classes": [
        { "name": "core.Int" },
        { "name": "core.String" },
        { "name": "app.Shape", "kind": "interface",
          "members": [
              { "kind": "function", "name": "area", "returns": "core.Int" },
              { "kind": "property", "name": "label", "type": "core.String" }
          ] },
        { "name": "app.Square", "supertypes": ["app.Shape"],
          "members": [{ "kind": "property", "name": "side", "type": "core.Int" }] },
        { "name": "app.Color", "kind": "object" }
    ],
    "scopes": [
        { "name": "main", "kind": "local",
          "declarations": [{ "kind": "property", "name": "app.size", "type": "core.Int" }] },
        { "name": "app", "kind": "package",
          "declarations": [
              { "kind": "function", "name": "app.describe", "returns": "core.String",
                "parameters": [{ "name": "shape", "type": "app.Shape" }] },
              { "kind": "property", "name": "app.secret", "type": "core.Int", "hidden": true },
              { "kind": "object", "class": "app.Color" }
          ] },
        { "name": "core", "kind": "default_import",
          "declarations": [
              { "kind": "function", "name": "core.max", "returns": "core.Int",
                "parameters": [
                    { "name": "a", "type": "core.Int" },
                    { "name": "b", "type": "core.Int" }
                ] },
              { "kind": "function", "name": "core.length", "receiver": "core.String",
                "returns": "core.Int" },
              { "kind": "function", "name": "core.shout", "receiver": "core.Int",
                "returns": "core.String" }
          ] }
    ],
    "tower": [
        { "group": "import(default)", "level": "import", "scope": "core",
          "extension_receiver": { "type": "core.String", "explicit": true },
          "explicit_receiver_kind": "extension" },
        { "group": "local(0)", "level": "lexical", "scope": "main" },
        { "group": "implicit(1)", "level": "lexical", "scope": "app" },
        { "group": "implicit(0)", "level": "member",
          "dispatch_receiver": { "type": "app.Square" } },
        { "group": "import(default)", "level": "import", "scope": "core" }
    ],
    "calls": [
        { "kind": "variable", "name": "size" },
        { "kind": "variable", "name": "side" },
        { "kind": "function", "name": "area" },
        { "kind": "function", "name": "max", "arguments": ["core.Int", "core.Int"] },
        { "kind": "function", "name": "max", "arguments": ["core.Int"] },
        { "kind": "variable", "name": "Color" },
        { "kind": "function", "name": "describe", "arguments": ["app.Square"] },
        { "kind": "function", "name": "describe", "arguments": ["core.Int"] },
        { "kind": "variable", "name": "secret" },
        { "kind": "function", "name": "length", "receiver": { "expression": "core.String" } },
        { "kind": "function", "name": "shout", "receiver": { "expression": "core.String" } },
        { "kind": "callable_reference", "name": "area" },
        { "kind": "variable", "name": "nothing" }
    ]
}"#;
