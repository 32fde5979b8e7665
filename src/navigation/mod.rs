//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! push / replace (location)
//!     → Router::resolve (first matching route)
//!     → duplicate check against the current entry
//!     → load every component of the matched chain (lazy, cached)
//!     → history entry (ResolvedRoute)
//! ```
//!
//! # Design Decisions
//! - A failed navigation leaves the current route untouched
//! - Each navigation gets a UUID for log correlation
//! - Back navigation reuses already loaded views

pub mod navigator;

pub use navigator::{NavigationError, Navigator, ResolvedRoute};
