//! Param matchers.
//!
//! A [`Matcher`] restricts the values a route param may bind to. Matchers are
//! declarative here: they are stored on routes and serialized with them, and
//! compiled only when a caller asks for it with [`Matcher::compile`].

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{ResourceError, Result};

const NUMBER_PATTERN: &str = "^[0-9]+$";
const UUID_PATTERN: &str =
    "(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-5][0-9a-f]{3}-[089ab][0-9a-f]{3}-[0-9a-f]{12}$";
const SLUG_PATTERN: &str = "^[a-z0-9]+(?:-[a-z0-9]+)*$";

/// How a matched param value should be converted before it reaches a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamCast {
    Number,
    Lowercase,
}

/// Constraint for a single route param.
///
/// Deserializes from a bare regex string (`"[a-z]+"`) or from an object with
/// the same shape it serializes to: `{ "match": "^[0-9]+$", "cast": "number" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MatcherRepr")]
pub struct Matcher {
    #[serde(rename = "match")]
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cast: Option<ParamCast>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MatcherRepr {
    Pattern(String),
    Full {
        #[serde(rename = "match")]
        pattern: String,
        #[serde(default)]
        cast: Option<ParamCast>,
    },
}

impl From<MatcherRepr> for Matcher {
    fn from(repr: MatcherRepr) -> Self {
        match repr {
            MatcherRepr::Pattern(pattern) => Self::new(pattern),
            MatcherRepr::Full { pattern, cast } => Self { pattern, cast },
        }
    }
}

impl Matcher {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            cast: None,
        }
    }

    /// Digits only, cast to a number
    #[must_use]
    pub fn number() -> Self {
        Self::new(NUMBER_PATTERN).with_cast(ParamCast::Number)
    }

    /// Any UUID (v0-v5), cast to lowercase
    #[must_use]
    pub fn uuid() -> Self {
        Self::new(UUID_PATTERN).with_cast(ParamCast::Lowercase)
    }

    /// Lowercase words joined by single dashes
    #[must_use]
    pub fn slug() -> Self {
        Self::new(SLUG_PATTERN)
    }

    #[must_use]
    pub fn with_cast(mut self, cast: ParamCast) -> Self {
        self.cast = Some(cast);
        self
    }

    /// Regex source
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn cast(&self) -> Option<ParamCast> {
        self.cast
    }

    /// Compile the regex source.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidMatcher`] when the source is not a valid
    /// `regex` crate pattern.
    pub fn compile(&self) -> Result<Regex> {
        self.compile_for("")
    }

    pub(crate) fn compile_for(&self, param: &str) -> Result<Regex> {
        Regex::new(&self.pattern).map_err(|source| ResourceError::InvalidMatcher {
            param: param.to_string(),
            pattern: self.pattern.clone(),
            source,
        })
    }
}

impl From<&str> for Matcher {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for Matcher {
    fn from(pattern: String) -> Self {
        Self::new(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_as_match_object() {
        assert_eq!(
            serde_json::to_value(Matcher::new("[a-z]")).unwrap(),
            json!({ "match": "[a-z]" })
        );
        assert_eq!(
            serde_json::to_value(Matcher::number()).unwrap(),
            json!({ "match": "^[0-9]+$", "cast": "number" })
        );
    }

    #[test]
    fn test_deserializes_from_string_or_object() {
        let bare: Matcher = serde_json::from_value(json!("[a-z]+")).unwrap();
        assert_eq!(bare, Matcher::new("[a-z]+"));

        let full: Matcher =
            serde_json::from_value(json!({ "match": "^[0-9]+$", "cast": "number" })).unwrap();
        assert_eq!(full, Matcher::number());
    }

    #[test]
    fn test_builtin_matchers_compile() {
        let number = Matcher::number().compile().unwrap();
        assert!(number.is_match("42"));
        assert!(!number.is_match("4a"));

        let uuid = Matcher::uuid().compile().unwrap();
        assert!(uuid.is_match("6F9619FF-8B86-4011-B42D-00C04FC964FF"));
        assert!(!uuid.is_match("not-a-uuid"));

        let slug = Matcher::slug().compile().unwrap();
        assert!(slug.is_match("hello-world-2"));
        assert!(!slug.is_match("hello--world"));
        assert!(!slug.is_match("-hello"));
    }

    #[test]
    fn test_compile_reports_invalid_pattern() {
        let err = Matcher::new("[a-z").compile_for("id").unwrap_err();
        match err {
            ResourceError::InvalidMatcher { param, pattern, .. } => {
                assert_eq!(param, "id");
                assert_eq!(pattern, "[a-z");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
