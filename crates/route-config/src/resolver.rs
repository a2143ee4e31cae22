//! Display helpers derived from a normalized route.
//!
//! None of these gate validation. They expect a normalized route, where
//! disabled selectors are already blank.

use crate::route::{RouteConfig, RouteMode};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_FAVICON_ENDPOINT: &str = "/cosmos/api/favicon";
pub const DEFAULT_FOLDER_ICON: &str = "assets/images/icons/folder.svg";

/// Where icons come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Endpoint that resolves a site's favicon from a `q` query parameter.
    pub favicon_endpoint: String,
    /// Bundled asset shown for static routes.
    pub folder_icon: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            favicon_endpoint: DEFAULT_FAVICON_ENDPOINT.to_string(),
            folder_icon: DEFAULT_FOLDER_ICON.to_string(),
        }
    }
}

/// Icon to show next to a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "lowercase")]
pub enum IconReference {
    /// Favicon lookup URL for a remote site.
    Remote(String),
    /// Bundled asset path.
    Asset(String),
}

impl IconReference {
    pub fn as_str(&self) -> &str {
        match self {
            IconReference::Remote(url) | IconReference::Asset(url) => url,
        }
    }
}

impl fmt::Display for IconReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host and path prefix of the active selectors, concatenated.
pub fn get_origin(route: &RouteConfig) -> String {
    let host = if route.use_host { route.host.as_str() } else { "" };
    let prefix = if route.use_path_prefix {
        route.path_prefix.as_str()
    } else {
        ""
    };
    format!("{host}{prefix}")
}

/// [`get_origin`] as a URL, defaulting to `https://`.
pub fn get_full_origin(route: &RouteConfig) -> String {
    with_scheme(get_origin(route))
}

fn with_scheme(url: String) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("https://{url}")
    }
}

/// Icon for `route` using the default endpoints.
pub fn get_icon_reference(route: &RouteConfig) -> IconReference {
    Resolver::default().icon_reference(route)
}

/// Summary of a route as shown on its overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverview {
    pub name: String,
    pub description: String,
    pub url: String,
    pub target: String,
    pub mode: Option<String>,
    pub smart_shield: bool,
    pub icon: IconReference,
}

/// Resolves display artifacts with a given [`ResolverConfig`].
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Pick the icon for a route based on its mode.
    pub fn icon_reference(&self, route: &RouteConfig) -> IconReference {
        match &route.mode {
            Some(RouteMode::ServApp) => self.remote(&route.target),
            Some(RouteMode::Static) => IconReference::Asset(self.config.folder_icon.clone()),
            Some(RouteMode::Proxy)
            | Some(RouteMode::Spa)
            | Some(RouteMode::Redirect)
            | Some(RouteMode::Other(_))
            | None => self.remote(&get_full_origin(route)),
        }
    }

    pub fn describe(&self, route: &RouteConfig) -> RouteOverview {
        RouteOverview {
            name: route.name.clone(),
            description: route.description.clone(),
            url: get_full_origin(route),
            target: route.target.clone(),
            mode: route.mode.as_ref().map(|m| m.label().to_string()),
            smart_shield: route.smart_shield_enabled(),
            icon: self.icon_reference(route),
        }
    }

    fn remote(&self, url: &str) -> IconReference {
        IconReference::Remote(format!(
            "{}?q={}",
            self.config.favicon_endpoint,
            urlencoding::encode(url)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_origin_concatenation() {
        let both = RouteConfig::new("a", RouteMode::ServApp, "a:80")
            .with_host("example.com")
            .with_path_prefix("/api");
        assert_eq!(get_origin(&both), "example.com/api");

        let path_only = RouteConfig::new("a", RouteMode::ServApp, "a:80").with_path_prefix("/api");
        assert_eq!(get_origin(&path_only), "/api");
        assert_eq!(get_full_origin(&path_only), "https:///api");
    }

    #[test]
    fn test_origin_ignores_disabled_selectors() {
        let route = RouteConfig {
            host: "stale.com".to_string(),
            ..RouteConfig::new("a", RouteMode::ServApp, "a:80").with_path_prefix("/x")
        };
        assert_eq!(get_origin(&route), "/x");
    }

    #[test]
    fn test_full_origin_scheme() {
        let plain = RouteConfig::default().with_host("x.com");
        assert_eq!(get_full_origin(&plain), "https://x.com");

        let http = RouteConfig::default().with_host("http://x.com");
        assert_eq!(get_full_origin(&http), "http://x.com");

        let https = RouteConfig::default().with_host("https://x.com");
        assert_eq!(get_full_origin(&https), "https://x.com");
    }

    #[test]
    fn test_icon_static() {
        let route = RouteConfig::new("files", RouteMode::Static, "/srv");
        assert_eq!(
            get_icon_reference(&route),
            IconReference::Asset(DEFAULT_FOLDER_ICON.to_string())
        );
    }

    #[test]
    fn test_icon_servapp_uses_target() {
        let route = RouteConfig::new("app", RouteMode::ServApp, "app:8080");
        assert_eq!(
            get_icon_reference(&route),
            IconReference::Remote("/cosmos/api/favicon?q=app%3A8080".to_string())
        );
    }

    #[test]
    fn test_icon_redirect_uses_full_origin() {
        let route =
            RouteConfig::new("r", RouteMode::Redirect, "https://other.com").with_host("example.com");
        assert_eq!(
            get_icon_reference(&route),
            IconReference::Remote(
                "/cosmos/api/favicon?q=https%3A%2F%2Fexample.com".to_string()
            )
        );
    }

    #[test]
    fn test_icon_unknown_mode_falls_back_to_origin() {
        let route = RouteConfig {
            mode: Some(RouteMode::from("TUNNEL")),
            ..RouteConfig::default().with_host("t.example.com")
        };
        let icon = get_icon_reference(&route);
        assert!(matches!(icon, IconReference::Remote(_)));
        assert!(icon.as_str().ends_with("https%3A%2F%2Ft.example.com"));
    }

    #[test]
    fn test_custom_endpoint() {
        let resolver = Resolver::new(ResolverConfig {
            favicon_endpoint: "https://icons.example.net/lookup".to_string(),
            folder_icon: "/static/folder.png".to_string(),
        });
        let app = RouteConfig::new("app", RouteMode::ServApp, "app:8080");
        assert_eq!(
            resolver.icon_reference(&app).as_str(),
            "https://icons.example.net/lookup?q=app%3A8080"
        );
        let files = RouteConfig::new("files", RouteMode::Static, "/srv");
        assert_eq!(resolver.icon_reference(&files).as_str(), "/static/folder.png");
    }

    #[test]
    fn test_describe() {
        let route = normalize(
            &RouteConfig::new("api", RouteMode::ServApp, "api:8080")
                .with_host("api.example.com")
                .with_path_prefix("/v1")
                .with_description("Public API"),
        );
        let overview = Resolver::default().describe(&route);
        assert_eq!(overview.name, "api");
        assert_eq!(overview.url, "https://api.example.com/v1");
        assert_eq!(overview.mode.as_deref(), Some("ServApp"));
        assert!(!overview.smart_shield);
        assert_eq!(overview.description, "Public API");
        assert!(matches!(overview.icon, IconReference::Remote(_)));
    }
}
