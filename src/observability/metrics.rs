//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by route, outcome
//! - `router_component_loads_total` (counter): loader runs by component, outcome

/// Record the outcome of one navigation.
pub fn record_navigation(route: &str, outcome: &'static str) {
    ::metrics::counter!(
        "router_navigations_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one run of a component loader.
pub fn record_component_load(component: &str, outcome: &'static str) {
    ::metrics::counter!(
        "router_component_loads_total",
        "component" => component.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
