//! View components and lazy loading.
//!
//! # Data Flow
//! ```text
//! RouteRecord.component (ComponentLoader, unresolved)
//!     → navigation matches the record
//!     → loader.rs (run the load future once, cache the View)
//!     → Arc<View> handed to the navigation result
//! ```
//!
//! # Design Decisions
//! - Loaders are cheap handles (Arc), cloned into every compiled route
//! - A loader resolves at most once; later matches reuse the cached view
//! - Failed loads are not cached, the next navigation retries

pub mod loader;
pub mod registry;

pub use loader::{ComponentLoader, LoadError, View};
pub use registry::{AppView, ViewRegistry};
