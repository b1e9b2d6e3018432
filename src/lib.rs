//! # crudroutes
//!
//! Declare the seven conventional RESTful routes of a resource in one call,
//! then filter, rename, constrain and annotate them before handing them to a
//! router.
//!
//! ```rust
//! use crudroutes::{ResourceOptions, RouteResource};
//!
//! let mut resource =
//!     RouteResource::new(ResourceOptions::new("magazines.ads", "#controllers/ads").shallow(true))?;
//!
//! resource
//!     .api_only()
//!     .params([("magazines", "magazine")])
//!     .where_param("id", "^[0-9]+$")
//!     .use_middleware(["store", "update", "destroy"], "auth");
//!
//! let patterns: Vec<&str> = resource.active_routes().map(|route| route.pattern()).collect();
//! assert_eq!(
//!     patterns,
//!     ["/magazines/:magazine/ads", "/magazines/:magazine/ads", "/ads/:id", "/ads/:id", "/ads/:id"]
//! );
//! # Ok::<(), crudroutes::ResourceError>(())
//! ```

pub mod errors;
pub mod matchers;
pub mod naming;
pub mod options;
pub mod resource;
pub mod route;

pub use errors::{ResourceError, Result};
pub use matchers::{Matcher, ParamCast};
pub use naming::ResourceToken;
pub use options::ResourceOptions;
pub use resource::{ALL_ACTIONS, IntoActions, ResourceAction, RouteResource};
pub use route::{HttpMethod, Middleware, Route, RouteHandler, RouteJson};
