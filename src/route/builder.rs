use http::Method;

use super::{DefaultArgs, RouteDefinition};
use crate::error::RouterError;

/// Builder for creating a [`RouteDefinition`] with a fluent API
///
/// # Example
///
/// ```rust
/// use bidirouter::route::RouteDefinition;
/// use http::Method;
///
/// let route = RouteDefinition::builder(r"/user/{id:\d}/", "app:user:show")
///     .domain("account")
///     .scheme("https")
///     .method(Method::GET)
///     .cacheable(true)
///     .build()
///     .expect("valid route");
///
/// assert_eq!(route.reverse_template(), "/user/:id/");
/// ```
#[derive(Debug, Clone)]
pub struct RouteDefinitionBuilder {
    domain: Option<String>,
    pattern: String,
    handler_id: String,
    default_args: DefaultArgs,
    force_subdomain_as_path: bool,
    scheme: Option<String>,
    method: Option<Method>,
    cacheable: bool,
    slug_arguments: bool,
}

impl RouteDefinitionBuilder {
    /// Start a definition for `pattern` resolving to `handler_id`, valid on any domain
    pub fn new(pattern: impl Into<String>, handler_id: impl Into<String>) -> Self {
        Self {
            domain: None,
            pattern: pattern.into(),
            handler_id: handler_id.into(),
            default_args: DefaultArgs::new(),
            force_subdomain_as_path: false,
            scheme: None,
            method: None,
            cacheable: false,
            slug_arguments: false,
        }
    }

    /// Restrict the route to a domain.
    ///
    /// Either a bare host prefix such as `shop` (treated as a subdomain when
    /// generating URLs) or a fully qualified `https://example.com`.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Same as [`domain`](Self::domain) but accepts `None` for "any domain"
    pub fn maybe_domain(mut self, domain: Option<&str>) -> Self {
        self.domain = domain.map(str::to_string);
        self
    }

    /// Seed an argument value used when the request or link does not supply one
    pub fn default_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_args.insert(name.into(), Some(value.into()));
        self
    }

    /// Replace the seeded arguments wholesale
    pub fn default_args(mut self, args: DefaultArgs) -> Self {
        self.default_args = args;
        self
    }

    /// Fold the domain into a leading path segment instead of matching it as a host.
    ///
    /// Used where real subdomain routing is not available: domain `blog` with
    /// pattern `/{id:\d}/` becomes pattern `/blog/{id:\d}/` on any domain.
    pub fn force_subdomain_as_path(mut self, force: bool) -> Self {
        self.force_subdomain_as_path = force;
        self
    }

    /// Only match requests whose scheme contains `scheme`; generated URLs use it
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Only match requests with this method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn cacheable(mut self, cacheable: bool) -> Self {
        self.cacheable = cacheable;
        self
    }

    /// Reduce generated argument values to ASCII slugs (see [`super::slugify`])
    pub fn slug_arguments(mut self, slug: bool) -> Self {
        self.slug_arguments = slug;
        self
    }

    /// Compile the pattern and domain filter.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the pattern or domain
    /// cannot be compiled.
    pub fn build(self) -> Result<RouteDefinition, RouterError> {
        let mut domain = self.domain.filter(|d| !d.is_empty());
        let mut pattern = self.pattern;

        if self.force_subdomain_as_path {
            if let Some(folded) = domain.take() {
                pattern = format!("/{folded}{pattern}");
            }
        }

        RouteDefinition::compile(
            domain,
            pattern,
            self.handler_id,
            self.default_args,
            super::definition::RouteOptions {
                scheme: self.scheme.filter(|s| !s.is_empty()),
                method: self.method,
                cacheable: self.cacheable,
                slug_arguments: self.slug_arguments,
            },
        )
    }
}
