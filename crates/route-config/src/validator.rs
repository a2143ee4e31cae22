//! Core validation logic for route configurations.
//!
//! Schema checks run per field group and each group reports at most one
//! issue. The uniqueness check against the existing routes only runs once the
//! route itself is well formed.

use crate::collection::RouteCollection;
use crate::route::{RouteConfig, RouteMode};
use crate::types::{RouteField, RouteIssue, ValidateOptions, ValidationReport};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static PORT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r":[0-9]+$").unwrap());

pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_MODE_REQUIRED: &str = "Mode is required";
pub const MSG_TARGET_REQUIRED: &str = "Target is required";
pub const MSG_TARGET_PORT: &str = "Invalid Target, must have a port";
pub const MSG_HOST_REQUIRED: &str = "Host is required";
pub const MSG_HOST_FORMAT: &str = "Host must be full domain ([sub.]domain.com) or an IP";
pub const MSG_PATH_PREFIX_REQUIRED: &str = "Path Prefix is required";
pub const MSG_PATH_PREFIX_FORMAT: &str = "Path Prefix must start with / (e.g. /api). Do not include a domain/subdomain in it, use the Host for this.";
pub const MSG_SOURCE_REQUIRED: &str = "Source must at least be either Host or Path Prefix";
pub const MSG_NAME_TAKEN: &str = "Route Name already exists. Name must be unique.";

type Check = fn(&RouteConfig) -> Option<RouteIssue>;

const SCHEMA_CHECKS: [Check; 6] = [
    check_name,
    check_mode,
    check_target,
    check_host,
    check_path_prefix,
    check_source,
];

/// Validate a normalized route against the existing routes.
pub fn validate_route(
    route: &RouteConfig,
    existing: &RouteCollection,
    options: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    for check in SCHEMA_CHECKS {
        if let Some(issue) = check(route) {
            report.add_issue(issue);
            if options.abort_early {
                break;
            }
        }
    }

    if report.has_errors() {
        debug!(route = %route.name, issues = report.issues.len(), "route failed schema checks");
        return report;
    }

    if let Some(issue) = check_unique_name(route, existing, options.exclude_name.as_deref()) {
        report.add_issue(issue);
    }

    report
}

/// Validate a normalized route and return only the messages.
///
/// An empty list means the route is valid.
pub fn validate(route: &RouteConfig, existing: &RouteCollection) -> Vec<String> {
    validate_route(route, existing, &ValidateOptions::default()).messages()
}

/// Check that the route has a name.
pub fn check_name(route: &RouteConfig) -> Option<RouteIssue> {
    route
        .name
        .is_empty()
        .then(|| RouteIssue::new("E001", RouteField::Name, MSG_NAME_REQUIRED))
}

/// Check that the mode is present and known.
pub fn check_mode(route: &RouteConfig) -> Option<RouteIssue> {
    match &route.mode {
        None => Some(RouteIssue::new("E002", RouteField::Mode, MSG_MODE_REQUIRED)),
        Some(RouteMode::Other(raw)) => Some(
            RouteIssue::new(
                "E003",
                RouteField::Mode,
                format!(
                    "Mode must be one of {}",
                    RouteMode::RECOGNIZED.join(", ")
                ),
            )
            .with_suggestion(format!("Unknown mode: {raw}")),
        ),
        Some(_) => None,
    }
}

/// Check the target, including the port suffix required by `SERVAPP`.
pub fn check_target(route: &RouteConfig) -> Option<RouteIssue> {
    if route.target.is_empty() {
        return Some(RouteIssue::new("E004", RouteField::Target, MSG_TARGET_REQUIRED));
    }

    match route.mode {
        Some(RouteMode::ServApp) if !PORT_SUFFIX.is_match(&route.target) => Some(
            RouteIssue::new("E005", RouteField::Target, MSG_TARGET_PORT)
                .with_suggestion(format!("Add the application port, e.g. {}:80", route.target)),
        ),
        _ => None,
    }
}

/// Check the host when host matching is enabled.
pub fn check_host(route: &RouteConfig) -> Option<RouteIssue> {
    if !route.use_host {
        return None;
    }
    if route.host.is_empty() {
        return Some(RouteIssue::new("E006", RouteField::Host, MSG_HOST_REQUIRED));
    }
    if !route.host.contains(['.', ':']) {
        return Some(RouteIssue::new("E007", RouteField::Host, MSG_HOST_FORMAT));
    }
    None
}

/// Check the path prefix when path matching is enabled.
pub fn check_path_prefix(route: &RouteConfig) -> Option<RouteIssue> {
    if !route.use_path_prefix {
        return None;
    }
    if route.path_prefix.is_empty() {
        return Some(RouteIssue::new(
            "E008",
            RouteField::PathPrefix,
            MSG_PATH_PREFIX_REQUIRED,
        ));
    }
    if !route.path_prefix.starts_with('/') {
        return Some(RouteIssue::new(
            "E009",
            RouteField::PathPrefix,
            MSG_PATH_PREFIX_FORMAT,
        ));
    }
    None
}

/// Check that at least one source selector is active.
pub fn check_source(route: &RouteConfig) -> Option<RouteIssue> {
    (!route.use_path_prefix && !route.use_host).then(|| {
        RouteIssue::new("E010", RouteField::UseHost, MSG_SOURCE_REQUIRED)
            .with_suggestion("Enable UseHost, UsePathPrefix, or both")
    })
}

/// Check that no other route already uses this name.
pub fn check_unique_name(
    route: &RouteConfig,
    existing: &RouteCollection,
    exclude: Option<&str>,
) -> Option<RouteIssue> {
    existing
        .contains_name(&route.name, exclude)
        .then(|| RouteIssue::new("E011", RouteField::Name, MSG_NAME_TAKEN))
}
