//! Scenario-driven front end for the belfry resolver.
//!
//! A scenario file describes classes, scopes, a tower and a list of calls;
//! [`scenario`] loads it and [`pipeline`] resolves and reports each call.

pub mod pipeline;
pub mod scenario;

pub use pipeline::{
    CallReport, CallStatus, render_json, render_text, render_tower, resolve_scenario,
};
pub use scenario::{Scenario, ScenarioError, load_scenario_file, load_scenario_str};
