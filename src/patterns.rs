use crate::Error;
use crate::constants::BUILT_IN_PATTERNS;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r":[a-zA-Z_][0-9a-zA-Z_]*").unwrap();
}

/// The registry of named placeholder patterns.
///
/// Maps a `:name` token to a parenthesized regex fragment. The built-in
/// names (`:id`, `:number`, `:any`, `:all`, `:string`, `:slug`, `:uuid`,
/// `:date`) can not be redefined; custom names can be added or replaced
/// freely through [`define`](PatternRegistry::define).
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: HashMap<String, String>,
}

impl PatternRegistry {
    pub(crate) fn new() -> PatternRegistry {
        let patterns = BUILT_IN_PATTERNS
            .iter()
            .map(|(name, fragment)| (name.to_string(), fragment.to_string()))
            .collect();
        PatternRegistry { patterns }
    }

    /// Inserts or updates a custom pattern. The name may be given with or
    /// without the leading colon; the fragment is parenthesized when it is
    /// not already a single group.
    pub fn define(&mut self, name: &str, fragment: &str) -> crate::Result<()> {
        let name = if name.starts_with(':') {
            name.to_string()
        } else {
            format!(":{}", name)
        };

        if BUILT_IN_PATTERNS.iter().any(|(built_in, _)| *built_in == name) {
            return Err(Error::ReservedPattern(name));
        }

        let fragment = if fragment.starts_with('(') && fragment.ends_with(')') {
            fragment.to_string()
        } else {
            format!("({})", fragment)
        };

        Regex::new(&fragment).map_err(|source| Error::InvalidPattern {
            name: name.clone(),
            source,
        })?;

        self.patterns.insert(name, fragment);
        Ok(())
    }

    /// Replaces every known `:name` token in the template with its fragment,
    /// leaving the rest of the template (and unknown tokens) intact. The
    /// result is usable as an anchored regular expression body.
    pub(crate) fn resolve(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &regex::Captures<'_>| {
                let token = &caps[0];
                self.patterns
                    .get(token)
                    .cloned()
                    .unwrap_or_else(|| token.to_string())
            })
            .into_owned()
    }

    /// Resolves a template and compiles it anchored at both ends.
    pub(crate) fn compile(&self, template: &str) -> crate::Result<Regex> {
        let body = self.resolve(template);
        Regex::new(&format!("^{}$", body)).map_err(|source| Error::InvalidRoutePath {
            path: template.to_string(),
            source,
        })
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        PatternRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_built_in_placeholders() {
        let registry = PatternRegistry::new();
        assert_eq!(registry.resolve("/user/:id"), r"/user/(\d+)");
        assert_eq!(registry.resolve("/files/:all"), "/files/(.*)");
    }

    #[test]
    fn leaves_unknown_tokens_literal() {
        let registry = PatternRegistry::new();
        assert_eq!(registry.resolve("/user/:nope"), "/user/:nope");
    }

    #[test]
    fn custom_patterns_are_wrapped_and_resolved() {
        let mut registry = PatternRegistry::new();
        registry.define("code", "[A-Z]{3}").unwrap();
        assert_eq!(registry.resolve("/c/:code"), "/c/([A-Z]{3})");
    }

    #[test]
    fn built_in_names_are_reserved() {
        let mut registry = PatternRegistry::new();
        let err = registry.define(":id", "[a-z]+").unwrap_err();
        assert!(matches!(err, Error::ReservedPattern(name) if name == ":id"));
        // The built-in entry must be untouched.
        assert_eq!(registry.resolve("/:id"), r"/(\d+)");
    }

    #[test]
    fn rejects_fragments_that_do_not_compile() {
        let mut registry = PatternRegistry::new();
        assert!(matches!(
            registry.define("broken", "[a-"),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn compiled_templates_are_anchored() {
        let registry = PatternRegistry::new();
        let re = registry.compile("/user/:id").unwrap();
        assert!(re.is_match("/user/42"));
        assert!(!re.is_match("/user/42/extra"));
        assert!(!re.is_match("/prefix/user/42"));
    }
}
