//! Route configuration engine for a reverse-proxy route manager.
//!
//! Takes routes as users enter them, brings them into canonical form, checks
//! them against the schema and the already configured routes, and derives
//! what the route list displays for each entry.
//!
//! ```text
//! raw route ──▶ normalize ──▶ validate (+ existing routes) ──▶ issues
//!                   │
//!                   └──▶ resolver ──▶ origin / full origin / icon
//! ```
//!
//! Everything here is a pure function over its inputs. Persisting accepted
//! routes is left to the caller.
//!
//! # Example
//!
//! ```
//! use route_config::{lint_route, RouteCollection, RouteConfig, RouteMode, ValidateOptions};
//!
//! let raw = RouteConfig::new(" api ", RouteMode::ServApp, "api:8080")
//!     .with_host("api.example.com");
//! let existing = RouteCollection::default();
//!
//! let linted = lint_route(&raw, &existing, &ValidateOptions::default());
//! assert_eq!(linted.route.name, "api");
//! assert!(linted.report.is_valid());
//! ```

mod collection;
mod lenient;
pub mod loader;
mod normalize;
mod resolver;
mod route;
mod types;
mod validator;

use serde::Serialize;

// Re-export public types
pub use collection::RouteCollection;
pub use loader::LoadError;
pub use resolver::{
    IconReference, Resolver, ResolverConfig, RouteOverview, DEFAULT_FAVICON_ENDPOINT,
    DEFAULT_FOLDER_ICON,
};
pub use route::{RouteConfig, RouteMode, SmartShield};
pub use types::{RouteField, RouteIssue, ValidateOptions, ValidationReport};

// Re-export engine functions
pub use normalize::{migrate_legacy_fields, normalize};
pub use resolver::{get_full_origin, get_icon_reference, get_origin};
pub use validator::{
    check_host, check_mode, check_name, check_path_prefix, check_source, check_target,
    check_unique_name, validate, validate_route,
};

/// A normalized route together with its validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintedRoute {
    pub route: RouteConfig,
    pub report: ValidationReport,
}

/// Normalize `raw` and validate the result against `existing`.
pub fn lint_route(
    raw: &RouteConfig,
    existing: &RouteCollection,
    options: &ValidateOptions,
) -> LintedRoute {
    let route = normalize(raw);
    let report = validate_route(&route, existing, options);
    LintedRoute { route, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lint_route_normalizes_before_validating() {
        let raw = RouteConfig::from_value(json!({
            "Name": "  api  ",
            "Mode": "SERVAPP",
            "Target": "api:8080",
            "UseHost": false,
            "Host": "no dots",
            "UsePathPrefix": true,
            "PathPrefix": "/api",
            "_SmartShield_Enabled": true
        }))
        .unwrap();

        let linted = lint_route(&raw, &RouteCollection::default(), &ValidateOptions::default());
        assert!(linted.report.is_valid(), "{:?}", linted.report);
        assert_eq!(linted.route.name, "api");
        assert_eq!(linted.route.host, "");
        assert!(linted.route.smart_shield_enabled());
    }

    #[test]
    fn test_lint_route_reports_duplicates() {
        let existing: RouteCollection =
            vec![RouteConfig::new("api", RouteMode::Static, "/srv").with_host("a.com")].into();
        let raw = RouteConfig::new("api ", RouteMode::ServApp, "api:80").with_host("b.com");

        let linted = lint_route(&raw, &existing, &ValidateOptions::default());
        assert_eq!(
            linted.report.messages(),
            vec!["Route Name already exists. Name must be unique."]
        );

        let linted = lint_route(&raw, &existing, &ValidateOptions::editing("api"));
        assert!(linted.report.is_valid());
    }
}
