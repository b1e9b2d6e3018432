//! Construction input for a [`RouteResource`](crate::resource::RouteResource).
//!
//! Options can be built in code or deserialized from any serde format, which
//! lets route tables live in configuration:
//!
//! ```rust
//! use crudroutes::ResourceOptions;
//!
//! let options: ResourceOptions = serde_json::from_str(r##"{
//!     "resource": "magazines.ads",
//!     "controller": "#controllers/ads",
//!     "shallow": true,
//!     "global_matchers": { "id": "^[0-9]+$" }
//! }"##).unwrap();
//!
//! assert!(options.shallow);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matchers::Matcher;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOptions {
    /// Resource identifier, e.g. `photos` or `magazines.ads`
    pub resource: String,
    /// Controller reference handed through to every route handler
    pub controller: String,
    /// Matchers every generated route starts with
    #[serde(default)]
    pub global_matchers: BTreeMap<String, Matcher>,
    /// Drop ancestor prefixes from member routes
    #[serde(default)]
    pub shallow: bool,
}

impl ResourceOptions {
    pub fn new(resource: impl Into<String>, controller: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            controller: controller.into(),
            global_matchers: BTreeMap::new(),
            shallow: false,
        }
    }

    #[must_use]
    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    #[must_use]
    pub fn global_matcher(mut self, param: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.global_matchers.insert(param.into(), matcher.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let options = ResourceOptions::new("photos", "#controllers/photos")
            .shallow(true)
            .global_matcher("id", Matcher::number());

        assert_eq!(options.resource, "photos");
        assert!(options.shallow);
        assert_eq!(options.global_matchers["id"], Matcher::number());
    }

    #[test]
    fn test_deserialize_defaults() {
        let options: ResourceOptions = serde_json::from_value(json!({
            "resource": "photos",
            "controller": "#controllers/photos",
        }))
        .unwrap();

        assert_eq!(options, ResourceOptions::new("photos", "#controllers/photos"));
    }

    #[test]
    fn test_deserialize_rejects_missing_controller() {
        let result: Result<ResourceOptions, _> =
            serde_json::from_value(json!({ "resource": "photos" }));
        assert!(result.is_err());
    }
}
