//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteRecord[] (table.rs or config)
//!     → router.rs (flatten nested records, depth first)
//!     → pattern.rs (parse each full path)
//!     → matcher.rs (exact or regex matcher)
//!     → Freeze as immutable Router
//!
//! Navigation:
//!     location (path?query#hash)
//!     → router.rs (strip base, scan routes in order)
//!     → Return: RouteMatch (params + matched chain) or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declared order)
//! - The catch-all route goes last by convention

pub mod matcher;
pub mod pattern;
pub mod record;
pub mod router;
pub mod table;

pub use matcher::{MatchOptions, ParamValue, Params};
pub use pattern::{PathPattern, PatternError};
pub use record::RouteRecord;
pub use router::{RouteMatch, Router, RouterError, RouterOptions};
pub use table::{route_table, CATCH_ALL_PATH};
