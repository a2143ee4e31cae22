//! Snapshot of the routes currently configured on the proxy.

use crate::route::RouteConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Read-only view of the configured routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteCollection {
    routes: Vec<RouteConfig>,
}

impl RouteCollection {
    pub fn new(routes: Vec<RouteConfig>) -> Self {
        Self { routes }
    }

    /// Build a collection from either a bare array of routes or a full proxy
    /// configuration document (`HTTPConfig.ProxyConfig.Routes`).
    ///
    /// A document without a route list is an empty collection.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(_) => serde_json::from_value(value),
            Value::Object(mut doc) => {
                let routes = doc
                    .get_mut("HTTPConfig")
                    .and_then(|v| v.get_mut("ProxyConfig"))
                    .and_then(|v| v.get_mut("Routes"))
                    .map(Value::take);
                match routes {
                    Some(Value::Null) | None => Ok(Self::default()),
                    Some(routes) => serde_json::from_value(routes),
                }
            }
            Value::Null => Ok(Self::default()),
            other => serde_json::from_value(other),
        }
    }

    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Names of all routes, in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.name.as_str())
    }

    /// Whether `name` is taken by a route other than `exclude`.
    pub fn contains_name(&self, name: &str, exclude: Option<&str>) -> bool {
        self.names()
            .filter(|n| Some(*n) != exclude)
            .any(|n| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&RouteConfig> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Hostnames the proxy has to answer for.
    ///
    /// `primary` comes first, followed by every routed host that looks like a
    /// single domain name. Duplicates are dropped, first occurrence wins.
    pub fn hostnames(&self, primary: &str) -> Vec<String> {
        let routed = self
            .routes
            .iter()
            .filter(|r| r.use_host && is_single_domain(&r.host))
            .map(|r| r.host.as_str());

        let mut seen = HashSet::new();
        std::iter::once(primary)
            .chain(routed)
            .filter(|h| seen.insert(*h))
            .map(str::to_string)
            .collect()
    }
}

fn is_single_domain(host: &str) -> bool {
    !host.is_empty() && host.contains('.') && !host.contains(',') && !host.contains(' ')
}

impl From<Vec<RouteConfig>> for RouteCollection {
    fn from(routes: Vec<RouteConfig>) -> Self {
        Self::new(routes)
    }
}

impl FromIterator<RouteConfig> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = RouteConfig>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a RouteConfig;
    type IntoIter = std::slice::Iter<'a, RouteConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteMode;
    use serde_json::json;

    fn named(name: &str) -> RouteConfig {
        RouteConfig::new(name, RouteMode::ServApp, "app:80")
    }

    #[test]
    fn test_from_config_document() {
        let doc = json!({
            "HTTPConfig": {
                "Hostname": "home.example.com",
                "ProxyConfig": {
                    "Routes": [
                        {"Name": "api", "Mode": "SERVAPP", "Target": "api:8080"},
                        {"Name": "files", "Mode": "STATIC", "Target": "/srv"}
                    ]
                }
            }
        });
        let routes = RouteCollection::from_value(doc).unwrap();
        assert_eq!(routes.names().collect::<Vec<_>>(), vec!["api", "files"]);
    }

    #[test]
    fn test_from_bare_array() {
        let routes = RouteCollection::from_value(json!([{"Name": "api"}])).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes.get("api").unwrap().name, "api");
    }

    #[test]
    fn test_document_without_routes_is_empty() {
        let routes = RouteCollection::from_value(json!({"HTTPConfig": {}})).unwrap();
        assert!(routes.is_empty());
        let routes =
            RouteCollection::from_value(json!({"HTTPConfig": {"ProxyConfig": {"Routes": null}}}))
                .unwrap();
        assert!(routes.is_empty());
        assert!(RouteCollection::from_value(json!("routes")).is_err());
    }

    #[test]
    fn test_contains_name_with_exclusion() {
        let routes: RouteCollection = vec![named("api"), named("web")].into();
        assert!(routes.contains_name("api", None));
        assert!(!routes.contains_name("api", Some("api")));
        assert!(routes.contains_name("web", Some("api")));
        assert!(!routes.contains_name("db", None));
    }

    #[test]
    fn test_hostnames_filters_and_dedups() {
        let routes: RouteCollection = vec![
            named("a").with_host("a.example.com"),
            named("b").with_host("a.example.com"),
            named("c").with_host("localhost"),
            named("d").with_host("x.com, y.com"),
            named("e").with_host("x .com"),
            RouteConfig {
                host: "stale.example.com".to_string(),
                ..named("f")
            },
            named("g").with_host("home.example.com"),
            named("h").with_host("b.example.com"),
        ]
        .into();

        assert_eq!(
            routes.hostnames("home.example.com"),
            vec!["home.example.com", "a.example.com", "b.example.com"]
        );
    }
}
