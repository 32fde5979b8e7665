//! History-backed navigator.

use std::sync::Arc;

use futures_util::future::try_join_all;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::observability::metrics;
use crate::routing::{RouteMatch, Router, RouterError};
use crate::view::{LoadError, View};

/// Why a navigation did not complete.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("no route matches '{0}'")]
    Unmatched(String),

    #[error("already at '{0}'")]
    Duplicated(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no previous history entry")]
    NoHistory,
}

impl NavigationError {
    fn outcome(&self) -> &'static str {
        match self {
            NavigationError::Router(_) => "invalid",
            NavigationError::Unmatched(_) => "unmatched",
            NavigationError::Duplicated(_) => "duplicated",
            NavigationError::Load(_) => "load_failed",
            NavigationError::NoHistory => "no_history",
        }
    }
}

/// A completed navigation: the match plus its loaded views.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub id: Uuid,
    pub route: RouteMatch,
    /// One view per matched record, outermost first.
    pub views: Vec<Arc<View>>,
}

impl ResolvedRoute {
    /// The innermost view.
    pub fn view(&self) -> Option<&View> {
        self.views.last().map(|v| v.as_ref())
    }

    pub fn view_keys(&self) -> Vec<&str> {
        self.views.iter().map(|v| v.key.as_str()).collect()
    }
}

/// Drives navigation over a shared router and keeps a history stack.
#[derive(Debug)]
pub struct Navigator {
    router: Arc<Router>,
    history: Vec<ResolvedRoute>,
}

impl Navigator {
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            router,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&ResolvedRoute> {
        self.history.last()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Navigate to `location`, adding a history entry.
    pub async fn push(&mut self, location: &str) -> Result<ResolvedRoute, NavigationError> {
        let resolved = self.navigate(location).await?;
        self.history.push(resolved.clone());
        Ok(resolved)
    }

    /// Navigate to `location`, replacing the current history entry.
    pub async fn replace(&mut self, location: &str) -> Result<ResolvedRoute, NavigationError> {
        let resolved = self.navigate(location).await?;
        self.history.pop();
        self.history.push(resolved.clone());
        Ok(resolved)
    }

    /// Return to the previous history entry.
    pub fn back(&mut self) -> Result<ResolvedRoute, NavigationError> {
        if self.history.len() < 2 {
            return Err(NavigationError::NoHistory);
        }
        self.history.pop();
        let previous = self.history.last().cloned().ok_or(NavigationError::NoHistory)?;

        tracing::info!(
            navigation_id = %previous.id,
            path = %previous.route.full_path,
            "Navigated back"
        );
        Ok(previous)
    }

    async fn navigate(&self, location: &str) -> Result<ResolvedRoute, NavigationError> {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("navigation", navigation_id = %id, location = %location);

        let result = self.resolve_and_load(id, location).instrument(span.clone()).await;
        span.in_scope(|| match &result {
            Ok(resolved) => {
                metrics::record_navigation(&resolved.route.route_path, "ok");
                tracing::info!(
                    route = %resolved.route.route_path,
                    views = ?resolved.view_keys(),
                    "Navigation complete"
                );
            }
            Err(e) => {
                metrics::record_navigation("none", e.outcome());
                tracing::warn!(error = %e, "Navigation failed");
            }
        });
        result
    }

    async fn resolve_and_load(
        &self,
        id: Uuid,
        location: &str,
    ) -> Result<ResolvedRoute, NavigationError> {
        let route = self
            .router
            .resolve(location)?
            .ok_or_else(|| NavigationError::Unmatched(location.to_string()))?;

        if let Some(current) = self.current() {
            if current.route.full_path == route.full_path {
                return Err(NavigationError::Duplicated(route.full_path));
            }
        }

        tracing::debug!(
            route = %route.route_path,
            depth = route.matched.len(),
            "Loading matched components"
        );
        let views = try_join_all(route.matched.iter().map(|r| r.component.load())).await?;

        Ok(ResolvedRoute { id, route, views })
    }
}
