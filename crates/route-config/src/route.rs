//! Route record types.

use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// How a route interprets its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteMode {
    /// Forward to a local application (`Target` is `host:port`).
    ServApp,
    /// Forward to an arbitrary upstream URL.
    Proxy,
    /// Serve files from a folder.
    Static,
    /// Serve a single-page application from a folder.
    Spa,
    /// Redirect to another URL.
    Redirect,
    /// A mode this version does not know about. The raw value is kept.
    Other(String),
}

impl RouteMode {
    /// Wire values of every recognized mode.
    pub const RECOGNIZED: [&'static str; 5] = ["SERVAPP", "PROXY", "STATIC", "SPA", "REDIRECT"];

    /// Wire value of this mode.
    pub fn as_str(&self) -> &str {
        match self {
            RouteMode::ServApp => "SERVAPP",
            RouteMode::Proxy => "PROXY",
            RouteMode::Static => "STATIC",
            RouteMode::Spa => "SPA",
            RouteMode::Redirect => "REDIRECT",
            RouteMode::Other(raw) => raw,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &str {
        match self {
            RouteMode::ServApp => "ServApp",
            RouteMode::Proxy => "Proxy",
            RouteMode::Static => "Static",
            RouteMode::Spa => "SPA",
            RouteMode::Redirect => "Redirection",
            RouteMode::Other(raw) => raw,
        }
    }

    /// Whether this is one of the [`RouteMode::RECOGNIZED`] modes.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, RouteMode::Other(_))
    }
}

impl From<&str> for RouteMode {
    fn from(value: &str) -> Self {
        match value {
            "SERVAPP" => RouteMode::ServApp,
            "PROXY" => RouteMode::Proxy,
            "STATIC" => RouteMode::Static,
            "SPA" => RouteMode::Spa,
            "REDIRECT" => RouteMode::Redirect,
            other => RouteMode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RouteMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RouteMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(RouteMode::from(raw.as_str()))
    }
}

/// Per-route protection settings.
///
/// Only `Enabled` is interpreted here; every other key is carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartShield {
    #[serde(
        rename = "Enabled",
        default,
        deserialize_with = "lenient::opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub enabled: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single proxy route as entered by the user.
///
/// Field names follow the proxy's PascalCase configuration format. Unknown
/// keys are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteConfig {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "lenient::mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub mode: Option<RouteMode>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub target: String,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub use_host: bool,

    #[serde(default, deserialize_with = "lenient::string")]
    pub host: String,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub use_path_prefix: bool,

    #[serde(default, deserialize_with = "lenient::string")]
    pub path_prefix: String,

    #[serde(
        default,
        deserialize_with = "lenient::smart_shield",
        skip_serializing_if = "Option::is_none"
    )]
    pub smart_shield: Option<SmartShield>,

    #[serde(
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,

    /// Flattened `SmartShield.Enabled` written by older clients.
    ///
    /// `Some(None)` means the key was sent with a `null` value.
    #[serde(
        rename = "_SmartShield_Enabled",
        default,
        deserialize_with = "lenient::present_opt_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_smart_shield_enabled: Option<Option<bool>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteConfig {
    /// Create a route with no source selector enabled.
    pub fn new(name: impl Into<String>, mode: RouteMode, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: Some(mode),
            target: target.into(),
            ..Default::default()
        }
    }

    /// Enable host matching with the given host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.use_host = true;
        self.host = host.into();
        self
    }

    /// Enable path prefix matching with the given prefix.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.use_path_prefix = true;
        self.path_prefix = prefix.into();
        self
    }

    /// Set the description shown on the route overview.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parse a route from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Whether SmartShield is switched on for this route.
    pub fn smart_shield_enabled(&self) -> bool {
        self.smart_shield
            .as_ref()
            .and_then(|s| s.enabled)
            .unwrap_or(false)
    }
}
