//! The route entity.
//!
//! A [`Route`] owns everything a registrar needs to mount one endpoint: the
//! URL pattern, HTTP methods, domain, handler reference, name, param matchers,
//! metadata and middleware. Routes are never removed from a resource; they are
//! soft-deleted with [`Route::mark_deleted`] and skipped by whoever registers
//! them.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;
use crate::matchers::Matcher;

/// Domain every route belongs to unless told otherwise
pub const DEFAULT_DOMAIN: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller reference paired with the action it dispatches to.
///
/// Displays as `<controller>.<action>`, e.g. `#controllers/photos.index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHandler {
    pub controller: String,
    pub action: String,
}

impl RouteHandler {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.controller, self.action)
    }
}

/// Symbolic middleware reference, resolved later by a middleware registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Middleware {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl Middleware {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }
}

impl From<&str> for Middleware {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// Serializable snapshot of a route, for inspection and tests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteJson {
    pub pattern: String,
    pub matchers: BTreeMap<String, Matcher>,
    pub meta: Map<String, Value>,
    pub methods: Vec<HttpMethod>,
    pub domain: String,
    pub middleware: Vec<Middleware>,
    pub name: Option<String>,
    pub handler: String,
}

#[derive(Debug, Clone)]
pub struct Route {
    pattern: String,
    methods: Vec<HttpMethod>,
    domain: String,
    handler: RouteHandler,
    name: Option<String>,
    deleted: bool,
    matchers: BTreeMap<String, Matcher>,
    meta: Map<String, Value>,
    middleware: Vec<Middleware>,
}

impl Route {
    /// Create an unnamed route. `global_matchers` become its initial matcher set.
    pub fn new(
        pattern: &str,
        methods: impl IntoIterator<Item = HttpMethod>,
        handler: RouteHandler,
        global_matchers: &BTreeMap<String, Matcher>,
    ) -> Self {
        Self {
            pattern: normalize_pattern(pattern),
            methods: methods.into_iter().collect(),
            domain: DEFAULT_DOMAIN.to_string(),
            handler,
            name: None,
            deleted: false,
            matchers: global_matchers.clone(),
            meta: Map::new(),
            middleware: Vec::new(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: &str) -> &mut Self {
        self.pattern = normalize_pattern(pattern);
        self
    }

    #[must_use]
    pub fn methods(&self) -> &[HttpMethod] {
        &self.methods
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) -> &mut Self {
        self.domain = domain.into();
        self
    }

    #[must_use]
    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn mark_deleted(&mut self) -> &mut Self {
        self.deleted = true;
        self
    }

    #[must_use]
    pub fn matchers(&self) -> &BTreeMap<String, Matcher> {
        &self.matchers
    }

    /// Add or overwrite the matcher for `param`
    pub fn where_param(
        &mut self,
        param: impl Into<String>,
        matcher: impl Into<Matcher>,
    ) -> &mut Self {
        self.matchers.insert(param.into(), matcher.into());
        self
    }

    #[must_use]
    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn set_meta(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.meta.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    /// Append middleware; it runs after anything registered earlier
    pub fn use_middleware(&mut self, middleware: impl Into<Middleware>) -> &mut Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Compile every matcher, keyed by param.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidMatcher`](crate::errors::ResourceError::InvalidMatcher)
    /// for the first matcher whose regex does not compile.
    pub fn compile_matchers(&self) -> Result<BTreeMap<String, Regex>> {
        self.matchers
            .iter()
            .map(|(param, matcher)| Ok((param.clone(), matcher.compile_for(param)?)))
            .collect()
    }

    #[must_use]
    pub fn to_json(&self) -> RouteJson {
        RouteJson {
            pattern: self.pattern.clone(),
            matchers: self.matchers.clone(),
            meta: self.meta.clone(),
            methods: self.methods.clone(),
            domain: self.domain.clone(),
            middleware: self.middleware.clone(),
            name: self.name.clone(),
            handler: self.handler.to_string(),
        }
    }
}

/// Exactly one leading slash, no trailing slash. The root pattern is `/`.
fn normalize_pattern(pattern: &str) -> String {
    format!("/{}", pattern.trim_matches('/'))
}
