//! Core types for route validation.

use serde::{Deserialize, Serialize};

/// Route field a validation issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteField {
    Name,
    Mode,
    Target,
    Host,
    PathPrefix,
    UseHost,
}

impl RouteField {
    /// Wire name of the field.
    pub fn label(&self) -> &'static str {
        match self {
            RouteField::Name => "Name",
            RouteField::Mode => "Mode",
            RouteField::Target => "Target",
            RouteField::Host => "Host",
            RouteField::PathPrefix => "PathPrefix",
            RouteField::UseHost => "UseHost",
        }
    }
}

/// A single violated route constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteIssue {
    /// Error code (e.g., "E001").
    pub code: &'static str,
    /// Field the constraint belongs to.
    pub field: RouteField,
    /// Message shown to the user.
    pub message: String,
    /// Suggested fix for the issue.
    pub suggestion: Option<String>,
}

impl RouteIssue {
    /// Create a new issue without a suggestion.
    pub fn new(code: &'static str, field: RouteField, message: impl Into<String>) -> Self {
        Self {
            code,
            field,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Set the suggestion for this issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Outcome of validating one route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// All issues found, in check order.
    pub issues: Vec<RouteIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue to the report.
    pub fn add_issue(&mut self, issue: RouteIssue) {
        self.issues.push(issue);
    }

    /// Check if validation passed.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Check if any issue was reported.
    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Messages in check order, as shown to the user.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    /// Issues reported for one field.
    pub fn for_field(&self, field: RouteField) -> impl Iterator<Item = &RouteIssue> {
        self.issues.iter().filter(move |i| i.field == field)
    }

    /// Get a summary string for the status line.
    pub fn summary(&self) -> String {
        match self.issues.len() {
            0 => "Valid".to_string(),
            1 => "1 error".to_string(),
            n => format!("{n} errors"),
        }
    }
}

/// Options for validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Name to leave out of the uniqueness check, typically the route's
    /// previous name when it is edited in place.
    pub exclude_name: Option<String>,
    /// Stop at the first failing check instead of reporting one issue per
    /// field.
    pub abort_early: bool,
}

impl ValidateOptions {
    /// Options for re-validating an existing route stored as `name`.
    pub fn editing(name: impl Into<String>) -> Self {
        Self {
            exclude_name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_summary() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid());
        assert_eq!(report.summary(), "Valid");

        report.add_issue(RouteIssue::new("E001", RouteField::Name, "Name is required"));
        assert_eq!(report.summary(), "1 error");
        report.add_issue(RouteIssue::new("E004", RouteField::Target, "Target is required"));
        assert_eq!(report.summary(), "2 errors");
        assert!(report.has_errors());
        assert_eq!(report.for_field(RouteField::Target).count(), 1);
        assert_eq!(
            report.messages(),
            vec!["Name is required".to_string(), "Target is required".to_string()]
        );
    }
}
