//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::routing::{MatchOptions, RouterOptions};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// History base and matching behavior.
    pub navigation: NavigationConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Route table. Empty means the built-in application table.
    pub routes: Vec<RouteConfig>,
}

/// Navigation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Prefix stripped from locations before matching (e.g. "/app/").
    pub base: String,

    /// Case-sensitive path matching.
    pub sensitive: bool,

    /// Reject trailing slashes the pattern does not have.
    pub strict: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            sensitive: false,
            strict: false,
        }
    }
}

impl NavigationConfig {
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            base: self.base.clone(),
            matching: MatchOptions {
                sensitive: self.sensitive,
                strict: self.strict,
            },
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// A route as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, relative to the parent for children.
    pub path: String,

    /// Optional unique route name.
    #[serde(default)]
    pub name: Option<String>,

    /// Component key looked up in the view registry.
    pub component: String,

    #[serde(default)]
    pub children: Vec<RouteConfig>,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            component: component.into(),
            children: Vec::new(),
        }
    }
}
