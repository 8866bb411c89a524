use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::identifier::{Identifier, IdentifierFormat};
use crate::error::RouterError;
use crate::request::{QueryArgs, Request};
use crate::route::{DefaultArgs, RouteDefinition};
use crate::runtime_config::RouterConfig;

/// Context recorded from the last request the router resolved.
///
/// Link generation inherits missing identifier components and the base URL
/// from here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub base_url: String,
    pub identifier: Option<String>,
    pub lang: Option<String>,
    pub controller: Option<String>,
    pub action: Option<String>,
}

impl RouteContext {
    fn parts(&self) -> Identifier {
        Identifier {
            lang: self.lang.clone(),
            controller: self.controller.clone(),
            action: self.action.clone(),
        }
    }
}

/// Bidirectional router: resolves requests to handler identifiers and
/// builds URLs back from identifiers and arguments.
///
/// Definitions are indexed twice: by handler identifier, for link
/// generation, and by domain filter, for matching. Domain buckets are tried
/// in descending key order so specific domains precede the catch-all bucket
/// of routes without a domain filter; within a bucket, registration order
/// wins.
///
/// Build the table once, then clone one router per worker: definitions are
/// shared behind `Arc` and `match_request` records per-router context.
#[derive(Debug, Clone)]
pub struct Router {
    config: RouterConfig,
    identifiers: IdentifierFormat,
    by_identifier: HashMap<String, Vec<Arc<RouteDefinition>>>,
    by_domain: BTreeMap<String, Vec<Arc<RouteDefinition>>>,
    context: RouteContext,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create an empty router with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            identifiers: IdentifierFormat::from_config(&config),
            config,
            by_identifier: HashMap::new(),
            by_domain: BTreeMap::new(),
            context: RouteContext::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Context recorded from the last resolved request
    #[must_use]
    pub fn context(&self) -> &RouteContext {
        &self.context
    }

    /// Register a definition in both indices, after any already registered
    pub fn register(&mut self, definition: RouteDefinition) -> &mut Self {
        let definition = Arc::new(definition);
        let domain = definition.domain().unwrap_or_default().to_string();

        debug!(
            handler_id = %definition.handler_id(),
            domain = %domain,
            pattern = %definition.pattern(),
            "Route registered"
        );

        self.by_identifier
            .entry(definition.handler_id().to_string())
            .or_default()
            .push(Arc::clone(&definition));
        self.by_domain.entry(domain).or_default().push(definition);
        self
    }

    /// Compile and register a route in one step.
    ///
    /// With `force_subdomain_as_path` and a domain, the domain becomes the
    /// leading path segment instead of a host filter.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the route cannot be compiled.
    pub fn add_route(
        &mut self,
        domain: Option<&str>,
        pattern: &str,
        handler_id: &str,
        default_args: DefaultArgs,
        force_subdomain_as_path: bool,
    ) -> Result<&mut Self, RouterError> {
        let definition = RouteDefinition::builder(pattern, handler_id)
            .maybe_domain(domain)
            .default_args(default_args)
            .force_subdomain_as_path(force_subdomain_as_path)
            .build()?;
        Ok(self.register(definition))
    }

    /// Clear the identifier index.
    ///
    /// The domain index is kept, so inbound matching keeps working while
    /// link generation falls back to query-string URLs until routes are
    /// registered again.
    pub fn reset(&mut self) -> &mut Self {
        info!(
            identifiers = self.by_identifier.len(),
            "Identifier index cleared"
        );
        self.by_identifier.clear();
        self
    }

    /// Number of registered definitions
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.by_domain.values().map(Vec::len).sum()
    }

    /// Definitions registered for a handler identifier, in registration order
    #[must_use]
    pub fn routes_for(&self, identifier: &str) -> &[Arc<RouteDefinition>] {
        self.by_identifier
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Domain bucket keys in match priority order; `""` is the catch-all bucket
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.by_domain.keys().rev().map(String::as_str)
    }

    /// Print all registered routes to stdout in match priority order
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.route_count());
        for (domain, bucket) in self.by_domain.iter().rev() {
            for definition in bucket {
                println!(
                    "[route] {}{} -> {}",
                    domain,
                    definition.pattern(),
                    definition.handler_id()
                );
            }
        }
    }

    /// Resolve a request to a handler identifier and its arguments.
    ///
    /// A request that already carries a handler identifier is only resolved
    /// into its language, controller and action. Otherwise every domain
    /// bucket is scanned in priority order and the first matching definition
    /// wins. On success the request holds the handler identifier, resolved
    /// components, merged query arguments and a self URL.
    ///
    /// # Errors
    ///
    /// [`RouterError::RouteNotFound`] when nothing matches,
    /// [`RouterError::InvalidIdentifier`] when the pre-set or matched handler
    /// identifier is malformed.
    pub fn match_request(&mut self, request: &mut Request) -> Result<(), RouterError> {
        debug!(
            domain = %request.domain,
            url = %request.url,
            method = %request.method,
            "Route match attempt"
        );
        let match_start = Instant::now();

        self.resolve_domain(request);
        self.retrieve_request(request)?;

        if let Some(identifier) = request.handler_id.clone().filter(|id| !id.is_empty()) {
            let resolved = self.resolve_identifier(Some(identifier.as_str()))?;
            self.resolve_component(request, &resolved)?;
            request.handler_id = Some(resolved);
            self.retrieve_request(request)?;

            debug!(
                handler_id = ?request.handler_id,
                "Pre-resolved handler identifier, pattern matching skipped"
            );
            return Ok(());
        }

        let matched = self
            .by_domain
            .values()
            .rev()
            .flat_map(|bucket| bucket.iter())
            .find(|definition| definition.matches(request))
            .map(Arc::clone);

        let Some(route) = matched else {
            warn!(
                domain = %request.domain,
                url = %request.url,
                duration_us = match_start.elapsed().as_micros(),
                "No route matched"
            );
            return Err(RouterError::RouteNotFound {
                url: request.url.clone(),
            });
        };

        self.resolve_component(request, route.handler_id())?;
        self.retrieve_request(request)?;
        request.self_url = Some(self.make(None, &request.query_args, false, false));

        info!(
            domain = %request.domain,
            url = %request.url,
            handler_id = %route.handler_id(),
            route_pattern = %route.pattern(),
            query_args = ?request.query_args,
            duration_us = match_start.elapsed().as_micros(),
            "Route matched"
        );

        Ok(())
    }

    /// Build a URL for a handler identifier.
    ///
    /// `None` or a partial identifier inherits missing components from the
    /// last resolved request. The first definition registered for the
    /// identifier whose argument shape fits `args` builds a friendly URL;
    /// otherwise, or when `normal` is requested, the result is the
    /// query-string form `?controller=<identifier>&<args>`. `absolute`
    /// prefixes the base URL. Never fails.
    #[must_use]
    pub fn make(
        &self,
        identifier: Option<&str>,
        args: &QueryArgs,
        normal: bool,
        absolute: bool,
    ) -> String {
        let absolute = self.config.absolute_links || absolute;

        let identifier = match self.resolve_identifier(identifier) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(error = %err, "Generating normal link for invalid identifier");
                return self.normal_url(identifier.unwrap_or_default(), args, absolute);
            }
        };

        if !(self.config.normal_links || normal) {
            let route = self
                .routes_for(&identifier)
                .iter()
                .find(|definition| definition.matches_identifier(&identifier, args));

            if let Some(route) = route {
                return route.build_url(&self.context.base_url, args, absolute);
            }

            debug!(
                handler_id = %identifier,
                args = ?args,
                "No route fits link arguments, generating normal link"
            );
        }

        self.normal_url(&identifier, args, absolute)
    }

    /// Resolve a possibly partial identifier against the last request context.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidIdentifier`] for identifiers with fewer
    /// than three segments.
    pub fn resolve_identifier(&self, identifier: Option<&str>) -> Result<String, RouterError> {
        let parts = self.identifiers.parse(identifier, &self.context.parts())?;
        Ok(self.identifiers.format(&parts))
    }

    /// Query-string fallback link
    fn normal_url(&self, identifier: &str, args: &QueryArgs, absolute: bool) -> String {
        let controller = args
            .get("controller")
            .cloned()
            .unwrap_or_else(|| self.identifiers.sanitize(identifier));

        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("controller", &controller);
        for (name, value) in args.iter().filter(|(name, _)| *name != "controller") {
            query.append_pair(name, value);
        }
        let url = format!("?{}", query.finish());

        if absolute {
            format!("{}/{}", self.context.base_url.trim_end_matches('/'), url)
        } else {
            url
        }
    }

    /// Strip a registered subdomain from the request base URL.
    ///
    /// `http://shop.example.com/` becomes `http://example.com/` when `shop`
    /// is a registered domain filter, so links for other domains are built
    /// from the canonical base. Only the first registered domain found at the
    /// start of the host, in match priority order, is stripped.
    fn resolve_domain(&self, request: &mut Request) {
        if request.base_url.matches('.').count() <= 1 {
            return;
        }

        let host_start = request.base_url.find("//").map_or(0, |pos| pos + 2);
        let Some(host) = request.base_url.get(host_start..) else {
            return;
        };

        let stripped = self
            .by_domain
            .keys()
            .rev()
            .filter(|domain| !domain.is_empty())
            .find_map(|domain| {
                host.strip_prefix(domain.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
            })
            .map(|rest| format!("{}{}", &request.base_url[..host_start], rest));

        if let Some(base_url) = stripped {
            request.base_url = base_url;
        }
    }

    /// Decompose an identifier into the request's language, controller and action
    fn resolve_component(&self, request: &mut Request, identifier: &str) -> Result<(), RouterError> {
        let current = Identifier {
            lang: request.resolved_lang.clone(),
            controller: request.resolved_controller.clone(),
            action: request.resolved_action.clone(),
        };
        let parts = self
            .identifiers
            .parse(Some(identifier), &Identifier::default())?
            .or(&current);

        request.resolved_lang = parts.lang;
        request.resolved_controller = parts
            .controller
            .map(|controller| self.identifiers.namespace(&controller));
        request.resolved_action = parts.action;
        Ok(())
    }

    /// Record the request's base URL and identifier as the link context
    fn retrieve_request(&mut self, request: &Request) -> Result<(), RouterError> {
        let parts = self
            .identifiers
            .parse(request.handler_id.as_deref(), &Identifier::default())?;

        self.context = RouteContext {
            base_url: request.base_url.clone(),
            identifier: request.handler_id.clone(),
            lang: parts.lang,
            controller: parts.controller,
            action: parts.action,
        };
        Ok(())
    }
}
