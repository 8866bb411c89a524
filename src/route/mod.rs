//! # Route Definitions
//!
//! A [`RouteDefinition`] owns one compiled pattern plus the metadata used to
//! arbitrate between routes: domain, scheme and method filters, the
//! cacheable flag, default argument values and the set of arguments a link
//! must supply to be built from this route.
//!
//! Each definition works in both directions:
//!
//! - **Inbound**: [`RouteDefinition::matches`] tests a [`Request`](crate::request::Request)
//!   and, on success, writes the handler identifier and extracted arguments into it.
//! - **Outbound**: [`RouteDefinition::matches_identifier`] decides whether a
//!   link request has this route's shape, and [`RouteDefinition::build_url`]
//!   renders the reverse template.
//!
//! ```rust
//! use bidirouter::request::{QueryArgs, Request};
//! use bidirouter::route::RouteDefinition;
//!
//! let route = RouteDefinition::new(None, r"/link{n:\d}/", "app:main:show").unwrap();
//!
//! let mut request = Request::new("localhost", "/link7/");
//! assert!(route.matches(&mut request));
//! assert_eq!(request.query_arg("n"), Some("7"));
//!
//! let mut args = QueryArgs::new();
//! args.insert("n".to_string(), "7".to_string());
//! assert!(route.matches_identifier("app:main:show", &args));
//! assert_eq!(route.build_url("http://localhost/", &args, false), "./link7/");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

mod builder;
mod definition;
#[cfg(test)]
mod tests;

pub use builder::RouteDefinitionBuilder;
pub use definition::RouteDefinition;

/// Default argument values; `None` marks a placeholder with no default
pub type DefaultArgs = BTreeMap<String, Option<String>>;

/// What a link must supply for one argument to be built from a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Any supplied value is accepted (placeholders)
    Any,
    /// Exactly this value, or absence of the argument for `None`
    Value(Option<String>),
}

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ -]+").expect("separator regex should be valid"));

/// Reduce a value to a lowercase ASCII slug.
///
/// Non-ASCII characters and anything outside `[A-Za-z0-9_ -]` are dropped,
/// runs of spaces and hyphens become a single `-`, and leading or trailing
/// `-` and `.` are trimmed.
///
/// ```rust
/// use bidirouter::route::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  a -- b  "), "a-b");
/// ```
#[must_use]
pub fn slugify(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    SEPARATOR_RUN
        .replace_all(&kept, "-")
        .trim_matches(|c: char| c == '-' || c == '.')
        .to_string()
}
