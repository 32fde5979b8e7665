//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, navigation, view loading produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (navigation and component load counters)
//! ```
//!
//! # Design Decisions
//! - Every navigation runs inside a span carrying its navigation ID
//! - No metrics exporter is installed here; the host application
//!   decides where counters go

pub mod logging;
pub mod metrics;
