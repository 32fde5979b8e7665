//! Shared helpers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use view_router::routing::{route_table, Router};
use view_router::view::{ComponentLoader, LoadError, View};

/// Router over the built-in application table.
pub fn app_router() -> Arc<Router> {
    Arc::new(Router::new(route_table()).unwrap())
}

/// Loader that counts how many times its load function runs.
#[allow(dead_code)]
pub fn counting_loader(key: &'static str, calls: Arc<AtomicUsize>) -> ComponentLoader {
    ComponentLoader::new(key, move || {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            // Simulate fetching a code-split chunk.
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(View::new(key, key))
        }
    })
}

/// Loader that always fails.
#[allow(dead_code)]
pub fn failing_loader(key: &'static str) -> ComponentLoader {
    ComponentLoader::new(key, move || async move {
        Err(LoadError::Failed {
            key: key.to_string(),
            reason: "chunk not found".to_string(),
        })
    })
}
