//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route pattern parses and compiles
//! - Detect ambiguous tables (duplicate sibling paths, duplicate names)
//! - Keep the catch-all route last among its siblings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Component keys are checked later, against the registry

use std::collections::HashSet;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::routing::matcher::{self, MatchOptions};
use crate::routing::PathPattern;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route '{path}': component must not be empty")]
    EmptyComponent { path: String },

    #[error("route '{path}': {reason}")]
    InvalidPattern { path: String, reason: String },

    #[error("duplicate route path '{path}' among siblings")]
    DuplicatePath { path: String },

    #[error("duplicate route name '{name}'")]
    DuplicateName { name: String },

    #[error("catch-all route '{path}' must be the last of its siblings")]
    CatchAllNotLast { path: String },

    #[error("navigation base '{base}' must start with '/'")]
    InvalidBase { base: String },

    #[error("unknown log level '{level}'")]
    InvalidLogLevel { level: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.navigation.base.starts_with('/') {
        errors.push(ValidationError::InvalidBase {
            base: config.navigation.base.clone(),
        });
    }

    if tracing::Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel {
            level: config.observability.log_level.clone(),
        });
    }

    let options = MatchOptions {
        sensitive: config.navigation.sensitive,
        strict: config.navigation.strict,
    };
    let mut names = HashSet::new();
    validate_routes(&config.routes, options, &mut names, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(
    routes: &[RouteConfig],
    options: MatchOptions,
    names: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    let mut siblings = HashSet::new();

    for (i, route) in routes.iter().enumerate() {
        if route.component.trim().is_empty() {
            errors.push(ValidationError::EmptyComponent {
                path: route.path.clone(),
            });
        }

        if !siblings.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicatePath {
                path: route.path.clone(),
            });
        }

        if let Some(name) = &route.name {
            if !names.insert(name.clone()) {
                errors.push(ValidationError::DuplicateName { name: name.clone() });
            }
        }

        match PathPattern::parse(&route.path)
            .and_then(|p| matcher::compile(&p, options).map(|_| p))
        {
            Ok(pattern) => {
                if pattern.is_catch_all() && i + 1 != routes.len() {
                    errors.push(ValidationError::CatchAllNotLast {
                        path: route.path.clone(),
                    });
                }
            }
            Err(e) => errors.push(ValidationError::InvalidPattern {
                path: route.path.clone(),
                reason: e.to_string(),
            }),
        }

        validate_routes(&route.children, options, names, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(routes: Vec<RouteConfig>) -> RouterConfig {
        RouterConfig {
            routes,
            ..RouterConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_valid_table() {
        let mut main = RouteConfig::new("/main", "layouts/MainLayout");
        main.children = vec![
            RouteConfig::new("", "pages/IndexPage"),
            RouteConfig::new("p2", "components/Movie/MovieList"),
        ];
        let cfg = config(vec![
            main,
            RouteConfig::new("/", "components/Login/LoginForm"),
            RouteConfig::new("/:catchAll(.*)*", "pages/ErrorNotFound"),
        ]);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut named = RouteConfig::new("/a", "pages/A");
        named.name = Some("dup".into());
        let mut named_again = RouteConfig::new("/b", "pages/B");
        named_again.name = Some("dup".into());

        let mut cfg = config(vec![
            RouteConfig::new("/:catchAll(.*)*", "pages/ErrorNotFound"),
            named,
            named_again,
            RouteConfig::new("/a", ""),
            RouteConfig::new("/:id(", "pages/Broken"),
        ]);
        cfg.navigation.base = "app".into();
        cfg.observability.log_level = "loud".into();

        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors.contains(&ValidationError::CatchAllNotLast {
            path: "/:catchAll(.*)*".into()
        }));
        assert!(errors.contains(&ValidationError::DuplicateName { name: "dup".into() }));
        assert!(errors.contains(&ValidationError::DuplicatePath { path: "/a".into() }));
        assert!(errors.contains(&ValidationError::EmptyComponent { path: "/a".into() }));
        assert!(errors.contains(&ValidationError::InvalidBase { base: "app".into() }));
        assert!(errors.contains(&ValidationError::InvalidLogLevel {
            level: "loud".into()
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidPattern { path, .. } if path == "/:id(")));
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_duplicate_paths_in_different_parents_are_fine() {
        let mut a = RouteConfig::new("/a", "pages/A");
        a.children = vec![RouteConfig::new("x", "pages/X")];
        let mut b = RouteConfig::new("/b", "pages/B");
        b.children = vec![RouteConfig::new("x", "pages/X")];
        assert!(validate_config(&config(vec![a, b])).is_ok());
    }
}
