//! # Pattern Compiler
//!
//! Turns a human-written route pattern into an executable matcher and an
//! inverse URL template.
//!
//! A pattern is literal text with zero or more placeholders of the form
//! `{name:charclass}`. `name` is `[A-Za-z]+`; `charclass` is the body of a
//! regex bracket expression, so `{slug:a-z0-9_}` becomes
//! `(?P<slug>[a-z0-9_]+)`. Bracket bodies follow PCRE rules: `[` is a
//! literal, `--`, `&&` and `~~` are not set operations, and the `\d`, `\w`
//! and `\s` shorthands are ASCII-only, so `{id:\d}` becomes
//! `(?P<id>[[:digit:]]+)`.
//!
//! Compilation produces:
//!
//! 1. A fully anchored, case-insensitive regex with one named capture group
//!    per placeholder and all literal text escaped. A trailing literal `/` is
//!    optional, so `/foo/` and `/foo` both match.
//! 2. A reverse template in which each placeholder is rewritten to a `:name`
//!    token, e.g. `/user/{id:\d}/` becomes `/user/:id/`.
//!
//! Compilation is a pure function of the pattern string.
//!
//! ```rust
//! use bidirouter::pattern::compile_pattern;
//!
//! let compiled = compile_pattern(r"/user/{id:\d}/").unwrap();
//! assert_eq!(compiled.reverse_template(), "/user/:id/");
//! assert!(compiled.regex().is_match("/user/42"));
//! ```

use crate::error::RouterError;
use once_cell::sync::Lazy;
use regex::Regex;


static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z]+):([^}]+)\}").expect("placeholder regex should be valid")
});

static SCHEME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(https?|ftp)://").expect("scheme regex should be valid"));

/// One `{name:charclass}` occurrence, in pattern order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub charclass: String,
}

/// A piece of the reverse template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    /// Substitution point for the argument of this name
    Token(String),
}

/// Immutable matcher and URL template compiled from one route pattern
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    placeholders: Vec<Placeholder>,
    template: Vec<TemplatePart>,
    reverse_template: String,
}

impl CompiledPattern {
    /// Anchored, case-insensitive path matcher
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    #[must_use]
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Pattern with placeholders rewritten to `:name` tokens
    #[must_use]
    pub fn reverse_template(&self) -> &str {
        &self.reverse_template
    }

    #[must_use]
    pub fn template_parts(&self) -> &[TemplatePart] {
        &self.template
    }

    /// True if `:name` is a substitution point of the reverse template
    #[must_use]
    pub fn has_token(&self, name: &str) -> bool {
        self.template
            .iter()
            .any(|part| matches!(part, TemplatePart::Token(token) if token == name))
    }
}

/// Compile a route pattern into a path matcher and reverse template.
///
/// # Errors
///
/// Returns [`RouterError::InvalidPattern`] when a charclass body contains an
/// unescaped `]` or ends in a lone `\`, when a placeholder name is repeated,
/// or when the regex engine rejects the assembled expression.
pub fn compile_pattern(raw: &str) -> Result<CompiledPattern, RouterError> {
    let mut body = String::with_capacity(raw.len() * 2);
    let mut placeholders: Vec<Placeholder> = Vec::new();
    let mut template = Vec::new();
    let mut reverse_template = String::with_capacity(raw.len());
    let mut last = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(raw) {
        let (Some(whole), Some(name), Some(charclass)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let (name, charclass) = (name.as_str(), charclass.as_str());

        let class_body = translate_charclass(raw, charclass)?;
        if placeholders.iter().any(|p| p.name == name) {
            return Err(RouterError::invalid_pattern(
                raw,
                format!("placeholder '{name}' appears more than once"),
            ));
        }

        push_literal(&raw[last..whole.start()], &mut body, &mut template, &mut reverse_template);

        body.push_str("(?P<");
        body.push_str(name);
        body.push_str(">[");
        body.push_str(&class_body);
        body.push_str("]+)");

        reverse_template.push(':');
        reverse_template.push_str(name);
        template.push(TemplatePart::Token(name.to_string()));

        placeholders.push(Placeholder {
            name: name.to_string(),
            charclass: charclass.to_string(),
        });
        last = whole.end();
    }

    let tail = &raw[last..];
    push_literal(tail, &mut body, &mut template, &mut reverse_template);

    // Trailing slash is optional
    if tail.ends_with('/') {
        body.push('?');
    }

    let regex = Regex::new(&format!("(?i)^{body}$"))
        .map_err(|e| RouterError::invalid_pattern(raw, e.to_string()))?;

    Ok(CompiledPattern {
        regex,
        placeholders,
        template,
        reverse_template,
    })
}

/// Compile a domain filter into an anchored prefix matcher.
///
/// Any `http://`, `https://` or `ftp://` prefix and trailing `/` are stripped
/// and the host is matched as a literal prefix: `shop` compiles to
/// `^shop.*$`. A missing or empty filter matches every domain.
///
/// # Errors
///
/// Returns [`RouterError::InvalidPattern`] if the regex engine rejects the
/// expression.
pub fn compile_domain(domain: Option<&str>) -> Result<Regex, RouterError> {
    let host = domain
        .map(|d| strip_scheme(d).trim_end_matches('/'))
        .unwrap_or_default();

    Regex::new(&format!("^{}.*$", regex::escape(host)))
        .map_err(|e| RouterError::invalid_pattern(domain.unwrap_or_default(), e.to_string()))
}

/// Strip a leading `http://`, `https://` or `ftp://` (case-insensitive)
#[must_use]
pub fn strip_scheme(value: &str) -> &str {
    match SCHEME_REGEX.find(value) {
        Some(m) => &value[m.end()..],
        None => value,
    }
}

/// True if `value` starts with an `http://`, `https://` or `ftp://` scheme
#[must_use]
pub fn has_scheme(value: &str) -> bool {
    SCHEME_REGEX.is_match(value)
}

fn push_literal(
    literal: &str,
    body: &mut String,
    template: &mut Vec<TemplatePart>,
    reverse_template: &mut String,
) {
    if literal.is_empty() {
        return;
    }
    body.push_str(&regex::escape(literal));
    reverse_template.push_str(literal);
    template.push(TemplatePart::Literal(literal.to_string()));
}

/// Rewrite a charclass body into the bracket syntax of the `regex` crate.
///
/// The body is read with PCRE bracket rules: `[` is literal, doubled `&`,
/// `-` and `~` carry no set-operation meaning, and the `\d`, `\w`, `\s`
/// shorthands (and their negations) are ASCII-only. An unescaped `]` or a
/// trailing lone `\` is rejected.
fn translate_charclass(raw: &str, charclass: &str) -> Result<String, RouterError> {
    let mut translated = String::with_capacity(charclass.len() + 8);
    let mut previous: Option<char> = None;
    let mut chars = charclass.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    return Err(RouterError::invalid_pattern(
                        raw,
                        format!("charclass '{charclass}' ends with a dangling escape"),
                    ));
                };
                match ascii_shorthand(escaped) {
                    Some(class) => translated.push_str(class),
                    None => {
                        translated.push('\\');
                        translated.push(escaped);
                    }
                }
                previous = None;
            }
            ']' => {
                return Err(RouterError::invalid_pattern(
                    raw,
                    format!("charclass '{charclass}' contains an unescaped ']'"),
                ));
            }
            '[' => {
                translated.push_str("\\[");
                previous = None;
            }
            '&' | '-' | '~' if previous == Some(c) => {
                translated.push('\\');
                translated.push(c);
                previous = None;
            }
            _ => {
                translated.push(c);
                previous = Some(c);
            }
        }
    }
    Ok(translated)
}

fn ascii_shorthand(escaped: char) -> Option<&'static str> {
    match escaped {
        'd' => Some("[:digit:]"),
        'D' => Some("[:^digit:]"),
        'w' => Some("[:word:]"),
        'W' => Some("[:^word:]"),
        's' => Some("[:space:]"),
        'S' => Some("[:^space:]"),
        _ => None,
    }
}
