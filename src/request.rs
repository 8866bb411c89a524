//! Per-request record consumed and filled in by the router.
//!
//! The router reads `domain`, `url`, `scheme`, `method`, `base_url` and
//! `handler_id`; everything else is written during `Router::match_request`.
//! One `Request` belongs to one logical request and must not be shared
//! across concurrent matches.

use http::Method;
use std::collections::BTreeMap;

/// Query arguments, keyed by name
pub type QueryArgs = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Host the request was addressed to, e.g. `shop.example.com`
    pub domain: String,
    /// Request path, e.g. `/user/12/`
    pub url: String,
    /// Scheme, e.g. `http` or `https`
    pub scheme: String,
    pub method: Method,
    /// Absolute base used for direct links, e.g. `http://example.com/`
    pub base_url: String,
    /// Pre-resolved handler identifier; when set, pattern matching is skipped
    pub handler_id: Option<String>,
    /// Query arguments; route arguments are merged in on a successful match
    pub query_args: QueryArgs,
    pub cacheable: bool,
    /// URL of the matched route rebuilt from the resolved arguments
    pub self_url: Option<String>,
    pub resolved_lang: Option<String>,
    pub resolved_controller: Option<String>,
    pub resolved_action: Option<String>,
}

impl Request {
    /// Create a `GET` request over `http` with `base_url` derived from `domain`
    pub fn new(domain: impl Into<String>, url: impl Into<String>) -> Self {
        let domain = domain.into();
        let base_url = format!("http://{domain}/");
        Self {
            domain,
            url: url.into(),
            scheme: "http".to_string(),
            method: Method::GET,
            base_url,
            handler_id: None,
            query_args: QueryArgs::new(),
            cacheable: false,
            self_url: None,
            resolved_lang: None,
            resolved_controller: None,
            resolved_action: None,
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_handler_id(mut self, handler_id: impl Into<String>) -> Self {
        self.handler_id = Some(handler_id.into());
        self
    }

    #[must_use]
    pub fn with_query_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_args.insert(name.into(), value.into());
        self
    }

    /// Get a resolved query argument by name
    #[inline]
    #[must_use]
    pub fn query_arg(&self, name: &str) -> Option<&str> {
        self.query_args.get(name).map(String::as_str)
    }
}
