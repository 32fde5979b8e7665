//! Route lookup.
//!
//! # Responsibilities
//! - Flatten nested records into an ordered list of compiled routes
//! - Parse a location into path, query and fragment
//! - Return the first matching route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction, shared via Arc
//! - Children are placed before their parent so an empty child path
//!   wins over the bare layout
//! - O(n) scan in declared order (route tables are small)

use std::collections::BTreeMap;

use thiserror::Error;
use url::Url;

use crate::routing::matcher::{self, MatchOptions, Matcher, Params};
use crate::routing::pattern::{PathPattern, PatternError};
use crate::routing::record::RouteRecord;
use crate::view::ComponentLoader;

/// Origin locations are resolved against.
const LOCATION_ORIGIN: &str = "http://localhost";

/// Error type for router construction and lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("invalid route '{path}': {source}")]
    Pattern {
        path: String,
        #[source]
        source: PatternError,
    },

    #[error("invalid location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },
}

/// Router-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// History base stripped from every location before matching.
    pub base: String,
    pub matching: MatchOptions,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            matching: MatchOptions::default(),
        }
    }
}

/// One record of a matched chain, with its full path.
#[derive(Debug, Clone)]
pub struct MatchedRecord {
    pub path: String,
    pub name: Option<String>,
    pub component: ComponentLoader,
}

/// A flattened route: full pattern plus the chain of records it renders.
#[derive(Debug)]
pub struct CompiledRoute {
    path: String,
    name: Option<String>,
    matcher: Box<dyn Matcher>,
    chain: Vec<MatchedRecord>,
}

impl CompiledRoute {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Records from the outermost layout to the leaf.
    pub fn chain(&self) -> &[MatchedRecord] {
        &self.chain
    }
}

/// Result of resolving a location.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Location path, base stripped.
    pub path: String,
    /// Query parameters; repeated keys keep every value in order.
    pub query: BTreeMap<String, Vec<String>>,
    pub hash: Option<String>,
    /// Path, query and fragment as navigated to.
    pub full_path: String,
    pub params: Params,
    /// Full pattern of the matched route.
    pub route_path: String,
    pub name: Option<String>,
    pub matched: Vec<MatchedRecord>,
}

impl RouteMatch {
    /// First value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// The innermost matched record.
    pub fn leaf(&self) -> Option<&MatchedRecord> {
        self.matched.last()
    }
}

/// Compiled, immutable route table.
#[derive(Debug)]
pub struct Router {
    records: Vec<RouteRecord>,
    routes: Vec<CompiledRoute>,
    options: RouterOptions,
}

impl Router {
    /// Compile records with default options.
    pub fn new(records: Vec<RouteRecord>) -> Result<Self, RouterError> {
        Self::with_options(records, RouterOptions::default())
    }

    pub fn with_options(
        records: Vec<RouteRecord>,
        options: RouterOptions,
    ) -> Result<Self, RouterError> {
        let mut routes = Vec::new();
        flatten(&records, None, &[], options.matching, &mut routes)?;

        if let Some(record) = records
            .iter()
            .rev()
            .skip(1)
            .find(|record| record.is_catch_all())
        {
            tracing::warn!(path = %record.path, "Catch-all route is not last, later routes are unreachable");
        }

        tracing::debug!(
            records = records.len(),
            routes = routes.len(),
            base = %options.base,
            "Router compiled"
        );

        Ok(Self {
            records,
            routes,
            options,
        })
    }

    /// Source records as given.
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Flattened routes in matching order.
    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Resolve a location such as `/main/p2?page=2#top`.
    ///
    /// Returns `Ok(None)` when no route matches.
    pub fn resolve(&self, location: &str) -> Result<Option<RouteMatch>, RouterError> {
        let url = parse_location(location)?;
        let path = strip_base(url.path(), &self.options.base, self.options.matching.sensitive)
            .to_string();
        let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            query
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        let hash = url.fragment().map(str::to_string);

        let mut full_path = path.clone();
        if let Some(q) = url.query() {
            full_path.push('?');
            full_path.push_str(q);
        }
        if let Some(h) = &hash {
            full_path.push('#');
            full_path.push_str(h);
        }

        for route in &self.routes {
            if let Some(params) = route.matcher.match_path(&path) {
                tracing::trace!(path = %path, route = %route.path, "Route matched");
                return Ok(Some(RouteMatch {
                    path,
                    query,
                    hash,
                    full_path,
                    params,
                    route_path: route.path.clone(),
                    name: route.name.clone(),
                    matched: route.chain.clone(),
                }));
            }
        }

        tracing::trace!(path = %path, "No route matched");
        Ok(None)
    }
}

fn flatten(
    records: &[RouteRecord],
    parent: Option<&str>,
    ancestors: &[MatchedRecord],
    options: MatchOptions,
    out: &mut Vec<CompiledRoute>,
) -> Result<(), RouterError> {
    for record in records {
        let path = join_paths(parent, &record.path);

        let mut chain = ancestors.to_vec();
        chain.push(MatchedRecord {
            path: path.clone(),
            name: record.name.clone(),
            component: record.component.clone(),
        });

        flatten(&record.children, Some(&path), &chain, options, out)?;

        let compiled = PathPattern::parse(&path)
            .and_then(|pattern| matcher::compile(&pattern, options))
            .map_err(|source| RouterError::Pattern {
                path: path.clone(),
                source,
            })?;

        out.push(CompiledRoute {
            path,
            name: record.name.clone(),
            matcher: compiled,
            chain,
        });
    }
    Ok(())
}

/// Full path of a record given its parent's full path.
pub fn join_paths(parent: Option<&str>, path: &str) -> String {
    match parent {
        None if path.starts_with('/') => path.to_string(),
        None => format!("/{path}"),
        Some(_) if path.starts_with('/') => path.to_string(),
        Some(parent) if path.is_empty() => parent.to_string(),
        Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), path),
    }
}

/// Parse a location relative to [`LOCATION_ORIGIN`].
///
/// Paths are appended verbatim so a leading `//` stays part of the path.
/// Absolute URLs must point at the same origin.
fn parse_location(location: &str) -> Result<Url, RouterError> {
    let invalid = |reason: String| RouterError::InvalidLocation {
        location: location.to_string(),
        reason,
    };

    let origin = Url::parse(LOCATION_ORIGIN).map_err(|e| invalid(e.to_string()))?;
    let url = if location.starts_with('/') {
        Url::parse(&format!("{LOCATION_ORIGIN}{location}"))
    } else {
        origin.join(location)
    }
    .map_err(|e| invalid(e.to_string()))?;

    if url.origin() != origin.origin() {
        return Err(invalid(format!(
            "location must stay on {LOCATION_ORIGIN}"
        )));
    }
    Ok(url)
}

fn strip_base<'a>(path: &'a str, base: &str, sensitive: bool) -> &'a str {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }

    let prefix_matches = path.get(..base.len()).is_some_and(|prefix| {
        if sensitive {
            prefix == base
        } else {
            prefix.to_lowercase() == base.to_lowercase()
        }
    });
    if !prefix_matches {
        return path;
    }

    match &path[base.len()..] {
        "" => "/",
        rest if rest.starts_with('/') => rest,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::ParamValue;
    use crate::routing::table::{route_table, CATCH_ALL_PATH};
    use crate::view::AppView;

    fn leaf_key(router: &Router, location: &str) -> Option<String> {
        router
            .resolve(location)
            .unwrap()
            .and_then(|m| m.leaf().map(|r| r.component.key().to_string()))
    }

    #[test]
    fn test_join_paths() {
        assert_eq!(join_paths(None, "/main"), "/main");
        assert_eq!(join_paths(None, "main"), "/main");
        assert_eq!(join_paths(Some("/main"), ""), "/main");
        assert_eq!(join_paths(Some("/main"), "p2"), "/main/p2");
        assert_eq!(join_paths(Some("/"), "p2"), "/p2");
        assert_eq!(join_paths(Some("/main"), "/abs"), "/abs");
    }

    #[test]
    fn test_flatten_order() {
        let router = Router::new(route_table()).unwrap();
        let paths: Vec<_> = router.routes().iter().map(|r| r.path()).collect();
        assert_eq!(
            paths,
            vec!["/main", "/main/p2", "/main", "/", "/:catchAll(.*)*"]
        );
        assert_eq!(router.routes()[0].chain().len(), 2);
        assert_eq!(router.routes()[2].chain().len(), 1);
    }

    #[test]
    fn test_resolve_table() {
        let router = Router::new(route_table()).unwrap();
        assert_eq!(leaf_key(&router, "/").as_deref(), Some(AppView::Login.key()));
        assert_eq!(leaf_key(&router, "/main").as_deref(), Some(AppView::Index.key()));
        assert_eq!(
            leaf_key(&router, "/main/p2").as_deref(),
            Some(AppView::MovieList.key())
        );
        assert_eq!(
            leaf_key(&router, "/nonexistent/path").as_deref(),
            Some(AppView::NotFound.key())
        );
    }

    #[test]
    fn test_resolve_query_and_hash() {
        let router = Router::new(route_table()).unwrap();
        let m = router.resolve("/main/p2?page=2&sort=year#top").unwrap().unwrap();
        assert_eq!(m.path, "/main/p2");
        assert_eq!(m.query_param("page"), Some("2"));
        assert_eq!(m.query_param("sort"), Some("year"));
        assert_eq!(m.hash.as_deref(), Some("top"));
        assert_eq!(m.full_path, "/main/p2?page=2&sort=year#top");
        assert_eq!(m.route_path, "/main/p2");
    }

    #[test]
    fn test_repeated_query_keys() {
        let router = Router::new(route_table()).unwrap();
        let m = router.resolve("/?x=1&x=2&y=").unwrap().unwrap();
        assert_eq!(m.query["x"], vec!["1".to_string(), "2".to_string()]);
        assert_eq!(m.query_param("x"), Some("1"));
        assert_eq!(m.query_param("y"), Some(""));
        assert_eq!(m.query_param("z"), None);
    }

    #[test]
    fn test_foreign_locations_are_rejected() {
        let router = Router::new(route_table()).unwrap();
        for location in ["https://other.host/main/p2", "http://localhost:8080/", "mailto:x"] {
            assert!(
                matches!(
                    router.resolve(location),
                    Err(RouterError::InvalidLocation { .. })
                ),
                "{location}"
            );
        }
        assert_eq!(
            leaf_key(&router, "http://localhost/main/p2").as_deref(),
            Some(AppView::MovieList.key())
        );
    }

    #[test]
    fn test_double_slash_stays_in_path() {
        let router = Router::new(route_table()).unwrap();
        let m = router.resolve("//main").unwrap().unwrap();
        assert_eq!(m.path, "//main");
        assert_eq!(m.route_path, CATCH_ALL_PATH);
    }

    #[test]
    fn test_relative_location() {
        let router = Router::new(route_table()).unwrap();
        assert_eq!(leaf_key(&router, "main/p2").as_deref(), Some(AppView::MovieList.key()));
    }

    #[test]
    fn test_catch_all_params() {
        let router = Router::new(route_table()).unwrap();
        let m = router.resolve("/nonexistent/path").unwrap().unwrap();
        assert_eq!(
            m.params["catchAll"],
            ParamValue::Repeated(vec!["nonexistent".into(), "path".into()])
        );
    }

    #[test]
    fn test_no_catch_all_no_match() {
        let router = Router::new(vec![RouteRecord::new("/", AppView::Login.loader())]).unwrap();
        assert!(router.resolve("/missing").unwrap().is_none());
    }

    #[test]
    fn test_base_is_stripped() {
        let options = RouterOptions {
            base: "/app/".to_string(),
            ..RouterOptions::default()
        };
        let router = Router::with_options(route_table(), options).unwrap();
        assert_eq!(leaf_key(&router, "/app").as_deref(), Some(AppView::Login.key()));
        assert_eq!(
            leaf_key(&router, "/app/main/p2").as_deref(),
            Some(AppView::MovieList.key())
        );
        assert_eq!(
            leaf_key(&router, "/application").as_deref(),
            Some(AppView::NotFound.key())
        );
        // Base follows the router's case sensitivity.
        assert_eq!(
            leaf_key(&router, "/APP/main/p2").as_deref(),
            Some(AppView::MovieList.key())
        );
    }

    #[test]
    fn test_sensitive_base() {
        let options = RouterOptions {
            base: "/app".to_string(),
            matching: MatchOptions {
                sensitive: true,
                strict: false,
            },
        };
        let router = Router::with_options(route_table(), options).unwrap();
        assert_eq!(router.options().base, "/app");
        assert_eq!(
            leaf_key(&router, "/APP/main/p2").as_deref(),
            Some(AppView::NotFound.key())
        );
        assert_eq!(
            leaf_key(&router, "/app/main/p2").as_deref(),
            Some(AppView::MovieList.key())
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = Router::new(vec![RouteRecord::new("/:id(", AppView::Login.loader())])
            .unwrap_err();
        assert!(matches!(err, RouterError::Pattern { .. }));
    }

    #[test]
    fn test_first_match_wins() {
        let router = Router::new(vec![
            RouteRecord::new("/:any", AppView::Login.loader()),
            RouteRecord::new("/main", AppView::MainLayout.loader()),
        ])
        .unwrap();
        assert_eq!(leaf_key(&router, "/main").as_deref(), Some(AppView::Login.key()));
    }
}
