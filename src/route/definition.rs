use http::Method;
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::BTreeMap;

use super::{slugify, DefaultArgs, Requirement, RouteDefinitionBuilder};
use crate::error::RouterError;
use crate::pattern::{compile_domain, compile_pattern, has_scheme, strip_scheme, CompiledPattern, TemplatePart};
use crate::request::{QueryArgs, Request};

/// Filters and flags set through [`RouteDefinitionBuilder`]
#[derive(Debug, Clone, Default)]
pub(crate) struct RouteOptions {
    pub scheme: Option<String>,
    pub method: Option<Method>,
    pub cacheable: bool,
    pub slug_arguments: bool,
}

/// One compiled route: a URL shape mapped to a handler identifier.
///
/// Immutable after construction apart from the memoised absolute domain used
/// by [`build_url`](Self::build_url), which is computed from the first base
/// URL it is given and reused afterwards.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    handler_id: String,
    domain: Option<String>,
    raw_pattern: String,
    default_args: DefaultArgs,
    required_args: BTreeMap<String, Requirement>,
    options: RouteOptions,
    pattern: CompiledPattern,
    domain_regex: Regex,
    rebuilt_domain: OnceCell<String>,
}

impl RouteDefinition {
    /// Start building a definition for `pattern` resolving to `handler_id`
    pub fn builder(pattern: impl Into<String>, handler_id: impl Into<String>) -> RouteDefinitionBuilder {
        RouteDefinitionBuilder::new(pattern, handler_id)
    }

    /// Compile a definition with no default arguments and no filters besides the domain.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the pattern cannot be compiled.
    pub fn new(domain: Option<&str>, pattern: &str, handler_id: &str) -> Result<Self, RouterError> {
        Self::builder(pattern, handler_id).maybe_domain(domain).build()
    }

    pub(crate) fn compile(
        domain: Option<String>,
        raw_pattern: String,
        handler_id: String,
        mut default_args: DefaultArgs,
        options: RouteOptions,
    ) -> Result<Self, RouterError> {
        let pattern = compile_pattern(&raw_pattern)?;
        let domain_regex = compile_domain(domain.as_deref())?;

        let mut required_args = BTreeMap::new();
        for placeholder in pattern.placeholders() {
            default_args.entry(placeholder.name.clone()).or_insert(None);
            required_args.insert(placeholder.name.clone(), Requirement::Any);
        }

        // Without placeholders the link shape is the exact set of defaults
        if required_args.is_empty() {
            required_args = default_args
                .iter()
                .map(|(name, value)| (name.clone(), Requirement::Value(value.clone())))
                .collect();
        }

        Ok(Self {
            handler_id,
            domain,
            raw_pattern,
            default_args,
            required_args,
            options,
            pattern,
            domain_regex,
            rebuilt_domain: OnceCell::new(),
        })
    }

    #[must_use]
    pub fn handler_id(&self) -> &str {
        &self.handler_id
    }

    /// Domain filter, `None` when the route serves every domain
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Pattern as compiled, after any subdomain folding
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.raw_pattern
    }

    #[must_use]
    pub fn reverse_template(&self) -> &str {
        self.pattern.reverse_template()
    }

    #[must_use]
    pub fn compiled(&self) -> &CompiledPattern {
        &self.pattern
    }

    #[must_use]
    pub fn default_args(&self) -> &DefaultArgs {
        &self.default_args
    }

    #[must_use]
    pub fn required_args(&self) -> &BTreeMap<String, Requirement> {
        &self.required_args
    }

    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.options.scheme.as_deref()
    }

    #[must_use]
    pub fn method(&self) -> Option<&Method> {
        self.options.method.as_ref()
    }

    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.options.cacheable
    }

    /// Test the request against this route and, on success, resolve it.
    ///
    /// Scheme, method, domain and path must all match. On success the request
    /// receives this route's handler identifier and cacheable flag, and the
    /// route arguments (captured values over defaults) are merged into
    /// `request.query_args`, replacing prior values of the same name. An
    /// argument whose default is `None` removes the prior value.
    pub fn matches(&self, request: &mut Request) -> bool {
        if let Some(scheme) = &self.options.scheme {
            if !request.scheme.contains(scheme.as_str()) {
                return false;
            }
        }

        if let Some(method) = &self.options.method {
            if *method != request.method {
                return false;
            }
        }

        if !self.domain_regex.is_match(&request.domain) {
            return false;
        }

        let Some(captures) = self.pattern.regex().captures(&request.url) else {
            return false;
        };

        let mut arguments = self.default_args.clone();
        for (name, value) in arguments.iter_mut() {
            if let Some(captured) = captures.name(name) {
                *value = Some(captured.as_str().to_string());
            }
        }

        request.handler_id = Some(self.handler_id.clone());
        request.cacheable = self.options.cacheable;
        for (name, value) in arguments {
            match value {
                Some(value) => request.query_args.insert(name, value),
                None => request.query_args.remove(&name),
            };
        }

        true
    }

    /// Check whether a link to `identifier` with `args` has this route's shape.
    ///
    /// Every required argument must be satisfied: a placeholder needs some
    /// supplied value, a literal requirement needs that exact value (or its
    /// absence when the requirement is `None`). A route without any
    /// requirement never matches by identifier alone.
    #[must_use]
    pub fn matches_identifier(&self, identifier: &str, args: &QueryArgs) -> bool {
        if self.handler_id != identifier || self.required_args.is_empty() {
            return false;
        }

        self.required_args.iter().all(|(name, requirement)| {
            let supplied = args.get(name).map(String::as_str);
            match requirement {
                Requirement::Any => supplied.is_some(),
                Requirement::Value(expected) => supplied == expected.as_deref(),
            }
        })
    }

    /// Build a friendly URL from the reverse template.
    ///
    /// Supplied arguments override defaults. Arguments named in the template
    /// are substituted; the rest are appended as a query string unless empty
    /// or equal to this route's default. The result is relative (`./...`)
    /// unless `absolute` is set or the route has a domain filter, in which
    /// case it is prefixed with the rebuilt domain.
    #[must_use]
    pub fn build_url(&self, base_url: &str, args: &QueryArgs, absolute: bool) -> String {
        let mut merged: BTreeMap<&str, Option<&str>> = self
            .default_args
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
            .collect();
        for (name, value) in args {
            merged.insert(name.as_str(), Some(value.as_str()));
        }

        let mut substitutions: BTreeMap<&str, String> = BTreeMap::new();
        let mut query: Vec<(&str, String)> = Vec::new();

        for (name, value) in merged {
            if self.pattern.has_token(name) {
                let substituted = match value {
                    // an unreplaced `:name` token means "use default"
                    Some(v) if v.strip_prefix(':') != Some(name) => self.render_value(v),
                    _ => String::new(),
                };
                substitutions.insert(name, substituted);
            } else if let Some(value) = value.filter(|v| !v.is_empty()) {
                let default = self.default_args.get(name).and_then(Option::as_deref);
                if default != Some(value) {
                    query.push((name, self.render_value(value)));
                }
            }
        }

        let mut url = String::with_capacity(self.raw_pattern.len() + 16);
        for part in self.pattern.template_parts() {
            match part {
                TemplatePart::Literal(literal) => url.push_str(literal),
                TemplatePart::Token(name) => {
                    if let Some(value) = substitutions.get(name.as_str()) {
                        url.push_str(value);
                    }
                }
            }
        }
        let mut url = collapse_slashes(&url);

        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }

        if absolute || self.domain.is_some() {
            let base = self.rebuild_domain(base_url);
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches(|c: char| c == '.' || c == '/')
            )
        } else if url.starts_with('?') {
            url
        } else {
            format!(".{url}")
        }
    }

    /// Absolute domain to prefix generated URLs with.
    ///
    /// The route scheme replaces the scheme of `base_url`. Without a domain
    /// filter the base itself is used; a fully qualified filter is used
    /// verbatim; a bare filter is spliced in as a subdomain of the base.
    fn rebuild_domain(&self, base_url: &str) -> String {
        let base = match &self.options.scheme {
            Some(scheme) if has_scheme(base_url) => {
                format!("{}://{}", scheme.to_lowercase(), strip_scheme(base_url))
            }
            _ => base_url.to_string(),
        };

        self.rebuilt_domain
            .get_or_init(|| match &self.domain {
                None => base.clone(),
                Some(domain) if has_scheme(domain) => domain.clone(),
                Some(domain) => match base.find("//") {
                    Some(pos) => format!("{}{}.{}", &base[..pos + 2], domain, &base[pos + 2..]),
                    None => format!("{domain}.{base}"),
                },
            })
            .clone()
    }

    fn render_value(&self, value: &str) -> String {
        if self.options.slug_arguments {
            slugify(value)
        } else {
            value.to_string()
        }
    }
}

fn collapse_slashes(url: &str) -> String {
    let mut collapsed = String::with_capacity(url.len());
    let mut previous_slash = false;
    for c in url.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        collapsed.push(c);
    }
    collapsed
}
