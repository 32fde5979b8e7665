//! Deferred component loading.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::observability::metrics;

/// A loaded UI view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    /// Module-style identifier, e.g. `layouts/MainLayout`.
    pub key: String,

    /// Human readable title.
    pub title: String,
}

impl View {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// Error returned when a component cannot be loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("component '{key}' failed to load: {reason}")]
    Failed { key: String, reason: String },
}

type LoadFn = dyn Fn() -> BoxFuture<'static, Result<View, LoadError>> + Send + Sync;

struct Inner {
    key: String,
    load: Box<LoadFn>,
    cell: OnceCell<Arc<View>>,
}

/// Deferred reference to a view, resolved on first use.
#[derive(Clone)]
pub struct ComponentLoader {
    inner: Arc<Inner>,
}

impl ComponentLoader {
    /// Create a loader from an async load function.
    ///
    /// The function is not called until [`ComponentLoader::load`] is awaited.
    pub fn new<F, Fut>(key: impl Into<String>, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<View, LoadError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                key: key.into(),
                load: Box::new(move || load().boxed()),
                cell: OnceCell::new(),
            }),
        }
    }

    /// Loader that yields an already constructed view.
    pub fn ready(view: View) -> Self {
        let key = view.key.clone();
        Self::new(key, move || {
            let view = view.clone();
            async move { Ok(view) }
        })
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Returns true once the view has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.inner.cell.initialized()
    }

    /// The cached view, if loaded.
    pub fn loaded(&self) -> Option<Arc<View>> {
        self.inner.cell.get().cloned()
    }

    /// Resolve the view, running the load function on first call only.
    pub async fn load(&self) -> Result<Arc<View>, LoadError> {
        let view = self
            .inner
            .cell
            .get_or_try_init(|| async {
                tracing::debug!(component = %self.inner.key, "Loading component");
                match (self.inner.load)().await {
                    Ok(view) => {
                        metrics::record_component_load(&self.inner.key, "ok");
                        Ok(Arc::new(view))
                    }
                    Err(e) => {
                        tracing::warn!(component = %self.inner.key, error = %e, "Component load failed");
                        metrics::record_component_load(&self.inner.key, "error");
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(view))
    }
}

impl fmt::Debug for ComponentLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentLoader")
            .field("key", &self.inner.key)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
