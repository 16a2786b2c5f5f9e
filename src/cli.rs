//! CLI domain: parse, route, output, and presentation only.
//! Index building itself lives in the route module.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_index_json, format_index_text, IndexOutcome};
pub use route::RunContext;
