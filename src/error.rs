use std::fmt;

/// Errors surfaced by route compilation, matching and identifier parsing.
///
/// Link generation (`Router::make`) never returns one of these: when no
/// friendly URL can be produced it falls back to a query-string URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No registered definition matched the request
    RouteNotFound {
        /// The request URL that failed to match
        url: String,
    },
    /// Handler identifier has fewer than three separator-delimited segments
    InvalidIdentifier {
        /// The offending identifier
        identifier: String,
    },
    /// Route pattern could not be compiled into a matcher
    InvalidPattern {
        /// The raw pattern as registered
        pattern: String,
        /// What was wrong with it
        reason: String,
    },
}

impl RouterError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the "no route matched" failure returned by `Router::match_request`
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouterError::RouteNotFound { .. })
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::RouteNotFound { url } => write!(f, "Route {url} not found"),
            RouterError::InvalidIdentifier { identifier } => {
                write!(f, "Invalid controller identifier - {identifier}")
            }
            RouterError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid route pattern '{pattern}': {reason}")
            }
        }
    }
}

impl std::error::Error for RouterError {}
