//! # Errors
//!
//! Building a resource can only fail one way: the identifier has nothing left
//! after trimming separators (or contains an empty nesting segment). Everything
//! else in the crate is total, so [`ResourceError`] stays small.
//!
//! [`ResourceError::InvalidMatcher`] is only produced by
//! [`Matcher::compile`](crate::matchers::Matcher::compile), an opt-in check
//! callers run before handing matchers to a dispatcher.

use thiserror::Error;

/// Errors raised while declaring resource routes
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource identifier is empty once separators are stripped
    #[error("Invalid resource name \"{name}\"")]
    InvalidResourceName {
        /// The identifier exactly as the caller passed it
        name: String,
    },

    /// A param matcher holds a regex the `regex` crate cannot compile
    #[error("Invalid matcher for param \"{param}\": {pattern}")]
    InvalidMatcher {
        /// Param the matcher was registered for (empty when unknown)
        param: String,
        /// The offending regex source
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ResourceError {
    pub fn invalid_resource_name(name: impl Into<String>) -> Self {
        Self::InvalidResourceName { name: name.into() }
    }
}

pub type Result<T, E = ResourceError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_resource_name_message() {
        let err = ResourceError::invalid_resource_name("/");
        assert_eq!(err.to_string(), "Invalid resource name \"/\"");
    }

    #[test]
    fn test_invalid_matcher_keeps_source() {
        let source = regex::Regex::new("[a-z").unwrap_err();
        let err = ResourceError::InvalidMatcher {
            param: "id".to_string(),
            pattern: "[a-z".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid matcher for param \"id\""));
        assert!(std::error::Error::source(&err).is_some());
    }
}
