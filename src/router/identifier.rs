//! Handler identifier parsing.
//!
//! Identifiers have the shape `[lang:]controller:action`, where `lang` is
//! exactly two ASCII letters and `action` is `[0-9A-Za-z_]*`. The controller
//! is everything in between and may itself carry a module prefix
//! (`module:path`), e.g. `pl:app:front:Main:index` is language `pl`,
//! controller `app:front:Main`, action `index`.

use crate::error::RouterError;
use crate::runtime_config::RouterConfig;

/// The three components of a handler identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifier {
    pub lang: Option<String>,
    pub controller: Option<String>,
    pub action: Option<String>,
}

impl Identifier {
    /// Fill every missing component from `fallback`
    #[must_use]
    pub fn or(self, fallback: &Identifier) -> Identifier {
        Identifier {
            lang: self.lang.or_else(|| fallback.lang.clone()),
            controller: self.controller.or_else(|| fallback.controller.clone()),
            action: self.action.or_else(|| fallback.action.clone()),
        }
    }
}

/// Separators used to split identifiers and to rewrite controller paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierFormat {
    module_separator: String,
    namespace_separator: String,
    namespace_controller: String,
}

impl IdentifierFormat {
    pub fn new(
        module_separator: impl Into<String>,
        namespace_separator: impl Into<String>,
        namespace_controller: impl Into<String>,
    ) -> Self {
        Self {
            module_separator: module_separator.into(),
            namespace_separator: namespace_separator.into(),
            namespace_controller: namespace_controller.into(),
        }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(
            config.module_separator.as_str(),
            config.namespace_separator.as_str(),
            config.namespace_controller.as_str(),
        )
    }

    #[must_use]
    pub fn module_separator(&self) -> &str {
        &self.module_separator
    }

    /// Split an identifier, taking missing components from `fallback`.
    ///
    /// An empty or absent identifier yields `fallback` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidIdentifier`] when the identifier has
    /// fewer than three separator-delimited segments.
    pub fn parse(
        &self,
        identifier: Option<&str>,
        fallback: &Identifier,
    ) -> Result<Identifier, RouterError> {
        let Some(identifier) = identifier.filter(|id| !id.is_empty()) else {
            return Ok(fallback.clone());
        };

        if self.module_separator.is_empty()
            || identifier.split(self.module_separator.as_str()).count() < 3
        {
            return Err(RouterError::InvalidIdentifier {
                identifier: identifier.to_string(),
            });
        }

        let parsed = self.split_lang(identifier).unwrap_or_default();
        Ok(parsed.or(fallback))
    }

    /// Join the present components back into an identifier
    #[must_use]
    pub fn format(&self, identifier: &Identifier) -> String {
        [&identifier.lang, &identifier.controller, &identifier.action]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.module_separator)
    }

    /// Rewrite a controller path into its namespaced form.
    ///
    /// `app:front:Main` becomes `app::controller::front::Main` with the
    /// default separators: the first segment is the module, the namespace
    /// controller segment is inserted after it, and every module or `/`
    /// separator becomes the namespace separator.
    #[must_use]
    pub fn namespace(&self, controller: &str) -> String {
        let controller = controller.trim_start_matches(self.module_separator.as_str());

        match controller.split_once(self.module_separator.as_str()) {
            Some((module, path)) if !module.is_empty() => format!(
                "{}{sep}{}{sep}{}",
                self.to_namespace(module),
                self.namespace_controller,
                self.to_namespace(path),
                sep = self.namespace_separator
            ),
            _ => self.to_namespace(controller),
        }
    }

    /// Flatten an identifier into a query-string safe controller name
    #[must_use]
    pub fn sanitize(&self, identifier: &str) -> String {
        self.segments(identifier).join("_")
    }

    fn to_namespace(&self, path: &str) -> String {
        self.segments(path).join(&self.namespace_separator)
    }

    fn segments<'a>(&self, path: &'a str) -> Vec<&'a str> {
        path.split(self.module_separator.as_str())
            .flat_map(|part| part.split('/'))
            .collect()
    }

    /// Try the two-letter language prefix first, then the whole identifier
    fn split_lang(&self, identifier: &str) -> Option<Identifier> {
        let sep = self.module_separator.as_str();

        if let Some(lang) = identifier.get(..2).filter(|l| l.chars().all(|c| c.is_ascii_alphabetic())) {
            if let Some(rest) = identifier[2..].strip_prefix(sep) {
                if let Some((controller, action)) = self.split_action(rest) {
                    return Some(Identifier {
                        lang: Some(lang.to_string()),
                        controller,
                        action,
                    });
                }
            }
        }

        self.split_action(identifier).map(|(controller, action)| Identifier {
            lang: None,
            controller,
            action,
        })
    }

    #[allow(clippy::type_complexity)]
    fn split_action(&self, value: &str) -> Option<(Option<String>, Option<String>)> {
        let (controller, action) = value.rsplit_once(self.module_separator.as_str())?;

        let valid_action = action
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if controller.is_empty() || !valid_action {
            return None;
        }

        let action = (!action.is_empty()).then(|| action.to_string());
        Some((Some(controller.to_string()), action))
    }
}

impl Default for IdentifierFormat {
    fn default() -> Self {
        Self::from_config(&RouterConfig::default())
    }
}
