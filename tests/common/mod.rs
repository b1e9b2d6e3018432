#![allow(dead_code)]

use crudroutes::{ResourceOptions, RouteResource};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Route debug logs show up with `RUST_LOG=crudroutes=debug cargo test`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn resource(identifier: &str, controller: &str, shallow: bool) -> RouteResource {
    init_tracing();
    RouteResource::new(ResourceOptions::new(identifier, controller).shallow(shallow))
        .expect("Failed to build resource")
}

/// Serialized view of every route, handler omitted
pub fn snapshot(resource: &RouteResource) -> Vec<Value> {
    resource
        .routes()
        .iter()
        .map(|route| {
            let mut value = serde_json::to_value(route.to_json()).expect("Failed to serialize route");
            if let Some(object) = value.as_object_mut() {
                object.remove("handler");
            }
            value
        })
        .collect()
}

pub fn expected(pattern: &str, methods: &[&str], name: &str) -> Value {
    json!({
        "pattern": pattern,
        "matchers": {},
        "meta": {},
        "methods": methods,
        "domain": "root",
        "middleware": [],
        "name": name,
    })
}

pub fn names(resource: &RouteResource) -> Vec<String> {
    resource
        .routes()
        .iter()
        .map(|route| route.name().unwrap_or_default().to_string())
        .collect()
}

pub fn patterns(resource: &RouteResource) -> Vec<String> {
    resource
        .routes()
        .iter()
        .map(|route| route.pattern().to_string())
        .collect()
}
