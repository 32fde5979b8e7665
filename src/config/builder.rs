//! Building route records from configuration.

use crate::config::loader::ConfigError;
use crate::config::schema::{RouteConfig, RouterConfig};
use crate::routing::{route_table, RouteRecord, Router};
use crate::view::ViewRegistry;

/// Turn configured routes into records, resolving component keys.
pub fn build_records(
    routes: &[RouteConfig],
    registry: &ViewRegistry,
) -> Result<Vec<RouteRecord>, ConfigError> {
    let mut records = Vec::with_capacity(routes.len());
    for route in routes {
        let component =
            registry
                .get(&route.component)
                .ok_or_else(|| ConfigError::UnknownComponent {
                    path: route.path.clone(),
                    component: route.component.clone(),
                })?;

        let mut record = RouteRecord::new(route.path.clone(), component)
            .with_children(build_records(&route.children, registry)?);
        if let Some(name) = &route.name {
            record = record.named(name.clone());
        }
        records.push(record);
    }
    Ok(records)
}

/// Swap in registry loaders for components the registry knows.
fn apply_registry(records: &mut [RouteRecord], registry: &ViewRegistry) {
    for record in records {
        if let Some(loader) = registry.get(record.component.key()) {
            record.component = loader;
        }
        apply_registry(&mut record.children, registry);
    }
}

/// Compile the router described by a configuration.
///
/// An empty route list selects the built-in application table, with any
/// component the registry overrides taken from the registry.
pub fn build_router(config: &RouterConfig, registry: &ViewRegistry) -> Result<Router, ConfigError> {
    let records = if config.routes.is_empty() {
        let mut records = route_table();
        apply_registry(&mut records, registry);
        records
    } else {
        build_records(&config.routes, registry)?
    };

    let router = Router::with_options(records, config.navigation.router_options())?;
    tracing::info!(
        routes = router.routes().len(),
        base = %config.navigation.base,
        "Route table ready"
    );
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{AppView, ComponentLoader, View};

    #[test]
    fn test_unknown_component() {
        let routes = vec![RouteConfig::new("/", "pages/Missing")];
        let err = build_records(&routes, &ViewRegistry::builtin()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownComponent { ref component, .. } if component == "pages/Missing"
        ));
    }

    #[test]
    fn test_nested_records() {
        let mut main = RouteConfig::new("/main", AppView::MainLayout.key());
        main.children = vec![RouteConfig::new("p2", AppView::MovieList.key())];
        main.name = Some("main".into());

        let records = build_records(&[main], &ViewRegistry::builtin()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("main"));
        assert_eq!(records[0].children[0].component.key(), AppView::MovieList.key());
    }

    #[test]
    fn test_default_config_uses_builtin_table() {
        let router = build_router(&RouterConfig::default(), &ViewRegistry::new()).unwrap();
        assert_eq!(router.records().len(), 3);
        assert_eq!(router.records()[1].component.key(), AppView::Login.key());
    }

    #[tokio::test]
    async fn test_registry_overrides_builtin_table() {
        let mut registry = ViewRegistry::builtin();
        registry.register(ComponentLoader::ready(View::new(
            AppView::NotFound.key(),
            "Lost in the catalogue",
        )));
        let router = build_router(&RouterConfig::default(), &registry).unwrap();

        let matched = router.resolve("/nonexistent/path").unwrap().unwrap();
        let view = matched.leaf().unwrap().component.load().await.unwrap();
        assert_eq!(view.title, "Lost in the catalogue");

        let shared = registry.get(AppView::NotFound.key()).unwrap();
        assert!(shared.is_loaded());
    }
}
