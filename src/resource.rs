//! # Resource routes
//!
//! [`RouteResource`] derives the seven conventional RESTful routes for a
//! resource and keeps them in a fixed, ordered array so later calls can
//! filter, rename, constrain and annotate them in place.
//!
//! | Action    | Methods    | Pattern                  | Name              |
//! |-----------|------------|--------------------------|-------------------|
//! | `index`   | GET, HEAD  | `/photos`                | `photos.index`    |
//! | `create`  | GET, HEAD  | `/photos/create`         | `photos.create`   |
//! | `store`   | POST       | `/photos`                | `photos.store`    |
//! | `show`    | GET, HEAD  | `/photos/:id`            | `photos.show`     |
//! | `edit`    | GET, HEAD  | `/photos/:id/edit`       | `photos.edit`     |
//! | `update`  | PUT, PATCH | `/photos/:id`            | `photos.update`   |
//! | `destroy` | DELETE     | `/photos/:id`            | `photos.destroy`  |
//!
//! Nested resources (`magazines.ads`) prefix every pattern with
//! `/magazines/:magazine_id`. With `shallow` set, member routes (`show`,
//! `edit`, `update`, `destroy`) keep only `/ads/:id`.
//!
//! Patterns and names are always recomputed from the token chain and the
//! current base name, so repeated [`RouteResource::params`] or
//! [`RouteResource::as_name`] calls never stack on each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::matchers::Matcher;
use crate::naming::{ResourceToken, snake_case, tokenize};
use crate::options::ResourceOptions;
use crate::route::{HttpMethod, Middleware, Route, RouteHandler};

/// Selects every route when passed as an action name
pub const ALL_ACTIONS: &str = "*";

const ACTION_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceAction {
    Index,
    Create,
    Store,
    Show,
    Edit,
    Update,
    Destroy,
}

impl ResourceAction {
    /// Every action, in the order routes are generated
    pub const ALL: [ResourceAction; ACTION_COUNT] = [
        Self::Index,
        Self::Create,
        Self::Store,
        Self::Show,
        Self::Edit,
        Self::Update,
        Self::Destroy,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
            Self::Store => "store",
            Self::Show => "show",
            Self::Edit => "edit",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }

    #[must_use]
    pub fn parse(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == action)
    }

    #[must_use]
    pub fn methods(self) -> &'static [HttpMethod] {
        match self {
            Self::Index | Self::Create | Self::Show | Self::Edit => {
                &[HttpMethod::Get, HttpMethod::Head]
            }
            Self::Store => &[HttpMethod::Post],
            Self::Update => &[HttpMethod::Put, HttpMethod::Patch],
            Self::Destroy => &[HttpMethod::Delete],
        }
    }

    /// Member actions address a single record through the primary param
    #[must_use]
    pub fn is_member(self) -> bool {
        matches!(self, Self::Show | Self::Edit | Self::Update | Self::Destroy)
    }

    fn position(self) -> usize {
        self as usize
    }
}

impl AsRef<str> for ResourceAction {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ResourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One action name or a collection of them.
///
/// Names are matched against the `.<action>` suffix of each route name.
/// Unknown names match nothing; [`ALL_ACTIONS`] matches everything.
pub trait IntoActions {
    fn into_actions(self) -> Vec<String>;
}

impl IntoActions for &str {
    fn into_actions(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoActions for String {
    fn into_actions(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoActions for ResourceAction {
    fn into_actions(self) -> Vec<String> {
        vec![self.as_str().to_string()]
    }
}

impl<T: AsRef<str>, const N: usize> IntoActions for [T; N] {
    fn into_actions(self) -> Vec<String> {
        self.iter().map(|action| action.as_ref().to_string()).collect()
    }
}

impl<T: AsRef<str>, const N: usize> IntoActions for &[T; N] {
    fn into_actions(self) -> Vec<String> {
        self.iter().map(|action| action.as_ref().to_string()).collect()
    }
}

impl<T: AsRef<str>> IntoActions for &[T] {
    fn into_actions(self) -> Vec<String> {
        self.iter().map(|action| action.as_ref().to_string()).collect()
    }
}

impl<T: AsRef<str>> IntoActions for Vec<T> {
    fn into_actions(self) -> Vec<String> {
        self.iter().map(|action| action.as_ref().to_string()).collect()
    }
}

/// The seven routes of a resource plus the state they are derived from
#[derive(Debug, Clone)]
pub struct RouteResource {
    identifier: String,
    controller: String,
    tokens: Vec<ResourceToken>,
    shallow: bool,
    base_name: String,
    routes: [Route; ACTION_COUNT],
}

impl RouteResource {
    /// Build the route set for `options.resource`.
    ///
    /// # Errors
    /// Returns [`ResourceError::InvalidResourceName`](crate::errors::ResourceError::InvalidResourceName)
    /// when the identifier is empty after trimming `/`, or has an empty
    /// nesting segment.
    pub fn new(options: ResourceOptions) -> Result<Self> {
        let ResourceOptions {
            resource,
            controller,
            global_matchers,
            shallow,
        } = options;

        let tokens = tokenize(&resource)?;
        let base_name = default_base_name(&tokens);

        let routes = ResourceAction::ALL.map(|action| {
            let mut route = Route::new(
                &route_pattern(&tokens, action, shallow),
                action.methods().iter().copied(),
                RouteHandler::new(controller.as_str(), action.as_str()),
                &global_matchers,
            );
            route.set_name(route_name(&base_name, action));
            route
        });

        tracing::debug!(
            resource = %resource,
            base_name = %base_name,
            shallow,
            routes = routes.len(),
            "Resource routes created"
        );

        Ok(Self {
            identifier: resource,
            controller,
            tokens,
            shallow,
            base_name,
            routes,
        })
    }

    /// The identifier as passed in
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[must_use]
    pub fn tokens(&self) -> &[ResourceToken] {
        &self.tokens
    }

    #[must_use]
    pub fn is_shallow(&self) -> bool {
        self.shallow
    }

    /// Prefix shared by every route name, `magazines.ads` by default
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// All seven routes in action order, deleted ones included
    #[must_use]
    pub fn routes(&self) -> &[Route; ACTION_COUNT] {
        &self.routes
    }

    #[must_use]
    pub fn route(&self, action: ResourceAction) -> &Route {
        &self.routes[action.position()]
    }

    pub fn active_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|route| !route.is_deleted())
    }

    /// Hand the routes over to a registrar
    #[must_use]
    pub fn into_routes(self) -> [Route; ACTION_COUNT] {
        self.routes
    }

    /// Delete every route whose action is not listed
    pub fn only(&mut self, actions: impl IntoActions) -> &mut Self {
        let actions = actions.into_actions();
        for route in &mut self.routes {
            if !selects(&actions, route) {
                route.mark_deleted();
            }
        }
        tracing::debug!(
            resource = %self.identifier,
            ?actions,
            "Kept only listed resource routes"
        );
        self
    }

    /// Delete every route whose action is listed
    pub fn except(&mut self, actions: impl IntoActions) -> &mut Self {
        let actions = actions.into_actions();
        for route in &mut self.routes {
            if selects(&actions, route) {
                route.mark_deleted();
            }
        }
        tracing::debug!(
            resource = %self.identifier,
            ?actions,
            "Deleted listed resource routes"
        );
        self
    }

    /// Drop the form-rendering routes, `create` and `edit`
    pub fn api_only(&mut self) -> &mut Self {
        self.except([ResourceAction::Create, ResourceAction::Edit])
    }

    /// Constrain `param` on every route, whether or not its pattern uses it
    pub fn where_param(&mut self, param: &str, matcher: impl Into<Matcher>) -> &mut Self {
        let matcher = matcher.into();
        for route in &mut self.routes {
            route.where_param(param, matcher.clone());
        }
        self
    }

    /// Rename params, keyed by the segment as written in the identifier.
    ///
    /// `params([("magazines", "mag"), ("ads", "ad")])` turns
    /// `/magazines/:magazine_id/ads/:id` into `/magazines/:mag/ads/:ad`.
    /// Route names are left alone. Keys that match no segment are ignored.
    pub fn params<I, K, V>(&mut self, renames: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (segment, param) in renames {
            let segment = segment.as_ref();
            let param = param.into();
            let mut matched = false;

            let targets = self
                .tokens
                .iter_mut()
                .filter(|token| token.original() == segment);
            for token in targets {
                token.set_param(param.clone());
                matched = true;
            }

            if matched {
                tracing::debug!(
                    resource = %self.identifier,
                    segment,
                    param = %param,
                    "Renamed resource param"
                );
            } else {
                tracing::debug!(
                    resource = %self.identifier,
                    segment,
                    "No resource segment to rename param for"
                );
            }
        }

        self.refresh_patterns();
        self
    }

    /// Replace the route name prefix. The name is converted to `snake_case`:
    /// `as_name("public-photos")` yields `public_photos.index` and so on.
    ///
    /// Every route name is rebuilt as `<name>.<action>`, so a name set on a
    /// single route through [`Route::set_name`] is overwritten.
    pub fn as_name(&mut self, name: &str) -> &mut Self {
        self.as_name_raw(snake_case(name))
    }

    /// Replace the route name prefix verbatim. Like [`RouteResource::as_name`],
    /// this rebuilds every route name from scratch.
    pub fn as_name_raw(&mut self, name: impl Into<String>) -> &mut Self {
        self.base_name = name.into();
        self.refresh_names();
        tracing::debug!(
            resource = %self.identifier,
            base_name = %self.base_name,
            "Renamed resource routes"
        );
        self
    }

    /// Append middleware to the selected routes
    pub fn use_middleware(
        &mut self,
        actions: impl IntoActions,
        middleware: impl Into<Middleware>,
    ) -> &mut Self {
        let middleware = middleware.into();
        self.tap(actions, |route| {
            route.use_middleware(middleware.clone());
        })
    }

    /// Call `callback` on each selected route, in action order
    pub fn tap<F>(&mut self, actions: impl IntoActions, mut callback: F) -> &mut Self
    where
        F: FnMut(&mut Route),
    {
        let actions = actions.into_actions();
        for route in &mut self.routes {
            if selects(&actions, route) {
                callback(route);
            }
        }
        self
    }

    /// Call `callback` on every route, in action order
    pub fn tap_all<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Route),
    {
        self.tap(ALL_ACTIONS, callback)
    }

    /// Like [`RouteResource::tap`], stopping at the first error.
    ///
    /// # Errors
    /// Returns the first error produced by `callback`, unchanged.
    pub fn try_tap<F, E>(
        &mut self,
        actions: impl IntoActions,
        mut callback: F,
    ) -> Result<&mut Self, E>
    where
        F: FnMut(&mut Route) -> Result<(), E>,
    {
        let actions = actions.into_actions();
        for route in &mut self.routes {
            if selects(&actions, route) {
                callback(route)?;
            }
        }
        Ok(self)
    }

    fn refresh_patterns(&mut self) {
        for (route, action) in self.routes.iter_mut().zip(ResourceAction::ALL) {
            route.set_pattern(&route_pattern(&self.tokens, action, self.shallow));
        }
    }

    fn refresh_names(&mut self) {
        for (route, action) in self.routes.iter_mut().zip(ResourceAction::ALL) {
            route.set_name(route_name(&self.base_name, action));
        }
    }
}

fn default_base_name(tokens: &[ResourceToken]) -> String {
    tokens
        .iter()
        .map(ResourceToken::name)
        .collect::<Vec<_>>()
        .join(".")
}

fn route_name(base_name: &str, action: ResourceAction) -> String {
    format!("{base_name}.{action}")
}

/// Compose the URL pattern for `action` from the token chain
fn route_pattern(tokens: &[ResourceToken], action: ResourceAction, shallow: bool) -> String {
    let Some((primary, ancestors)) = tokens.split_last() else {
        return "/".to_string();
    };

    let mut segments: Vec<String> = Vec::new();
    if !(shallow && action.is_member()) {
        for ancestor in ancestors {
            segments.push(ancestor.original().to_string());
            segments.push(format!(":{}", ancestor.param()));
        }
    }
    segments.push(primary.original().to_string());

    match action {
        ResourceAction::Index | ResourceAction::Store => {}
        ResourceAction::Create => segments.push("create".to_string()),
        ResourceAction::Show | ResourceAction::Update | ResourceAction::Destroy => {
            segments.push(format!(":{}", primary.param()));
        }
        ResourceAction::Edit => {
            segments.push(format!(":{}", primary.param()));
            segments.push("edit".to_string());
        }
    }

    format!("/{}", segments.join("/"))
}

/// A route is selected when its name ends in `.<action>` for a listed action
fn selects(actions: &[String], route: &Route) -> bool {
    actions.iter().any(|action| {
        action == ALL_ACTIONS
            || route.name().is_some_and(|name| {
                name.strip_suffix(action.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos() -> RouteResource {
        RouteResource::new(ResourceOptions::new("photos", "#controllers/photos")).unwrap()
    }

    #[test]
    fn test_action_order_matches_positions() {
        for (index, action) in ResourceAction::ALL.into_iter().enumerate() {
            assert_eq!(action.position(), index);
        }
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(ResourceAction::parse("destroy"), Some(ResourceAction::Destroy));
        assert_eq!(ResourceAction::parse("delete"), None);
    }

    #[test]
    fn test_into_actions_variants() {
        assert_eq!("create".into_actions(), vec!["create"]);
        assert_eq!(ResourceAction::Show.into_actions(), vec!["show"]);
        assert_eq!(["index", "show"].into_actions(), vec!["index", "show"]);
        assert_eq!(
            vec![ResourceAction::Edit, ResourceAction::Update].into_actions(),
            vec!["edit", "update"]
        );
        let slice: &[&str] = &["store"];
        assert_eq!(slice.into_actions(), vec!["store"]);
    }

    #[test]
    fn test_route_pattern_nested_and_shallow() {
        let tokens = tokenize("magazines.ads").unwrap();
        assert_eq!(
            route_pattern(&tokens, ResourceAction::Edit, false),
            "/magazines/:magazine_id/ads/:id/edit"
        );
        assert_eq!(route_pattern(&tokens, ResourceAction::Edit, true), "/ads/:id/edit");
        assert_eq!(
            route_pattern(&tokens, ResourceAction::Create, true),
            "/magazines/:magazine_id/ads/create"
        );
    }

    #[test]
    fn test_route_pattern_deep_nesting() {
        let tokens = tokenize("countries.cities.streets").unwrap();
        assert_eq!(
            route_pattern(&tokens, ResourceAction::Show, false),
            "/countries/:country_id/cities/:city_id/streets/:id"
        );
        assert_eq!(route_pattern(&tokens, ResourceAction::Show, true), "/streets/:id");
    }

    #[test]
    fn test_selects_by_name_suffix() {
        let resource = photos();
        let index = resource.route(ResourceAction::Index);
        assert!(selects(&["index".to_string()], index));
        assert!(selects(&[ALL_ACTIONS.to_string()], index));
        assert!(!selects(&["dex".to_string()], index));
        assert!(!selects(&["photos.index".to_string()], index));
        assert!(!selects(&[], index));
    }

    #[test]
    fn test_route_lookup_is_index_stable() {
        let mut resource = photos();
        resource.as_name("gallery").api_only();
        for action in ResourceAction::ALL {
            assert_eq!(resource.route(action).handler().action, action.as_str());
        }
    }

    #[test]
    fn test_handler_pairs_controller_and_action() {
        let resource = photos();
        let handlers: Vec<String> = resource
            .routes()
            .iter()
            .map(|route| route.handler().to_string())
            .collect();
        assert_eq!(handlers[0], "#controllers/photos.index");
        assert_eq!(handlers[6], "#controllers/photos.destroy");
    }
}
