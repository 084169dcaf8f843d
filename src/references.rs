//! `@agent` reference extraction from document bodies.
//!
//! Agent bodies mention the agents they delegate to as `@name` tokens. This
//! module turns those mentions into an ordered dependency list. It is a pure
//! function of the body text and the set of names known for the current run.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([a-z0-9][a-z0-9-]*\*?)").expect("Invalid reference token regex")
});

/// The one wildcard token that is expanded.
pub const EXECUTOR_WILDCARD: &str = "executor-*";

/// Members of the executor family, in expansion order.
pub const EXECUTOR_FAMILY: [&str; 2] = ["executor-core", "executor-advanced"];

/// Result of resolving the references in one body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved agent names, unique, in first-mention order.
    pub resolved: Vec<String>,
    /// Tokens that did not resolve, unique, in first-mention order.
    pub unresolved: Vec<String>,
}

impl Resolution {
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Extract and resolve every `@token` in `body` against `known_names`.
///
/// - `@executor-*` expands to [`EXECUTOR_FAMILY`] whether or not those agents exist.
/// - Any other token ending in `*` is unresolved.
/// - A token equal to a known name resolves to it.
/// - Everything else is unresolved.
pub fn extract(body: &str, known_names: &HashSet<String>) -> Resolution {
    let mut resolved = OrderedSet::default();
    let mut unresolved = OrderedSet::default();

    for caps in REFERENCE_REGEX.captures_iter(body) {
        let token = &caps[1];
        if token == EXECUTOR_WILDCARD {
            for member in EXECUTOR_FAMILY {
                resolved.insert(member);
            }
        } else if token.ends_with('*') {
            unresolved.insert(token);
        } else if known_names.contains(token) {
            resolved.insert(token);
        } else {
            unresolved.insert(token);
        }
    }

    Resolution {
        resolved: resolved.items,
        unresolved: unresolved.items,
    }
}

#[derive(Default)]
struct OrderedSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedSet {
    fn insert(&mut self, value: &str) {
        if self.seen.insert(value.to_string()) {
            self.items.push(value.to_string());
        }
    }
}
