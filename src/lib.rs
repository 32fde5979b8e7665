//! Client-side route table and navigation for the movie catalogue SPA.

pub mod config;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::RouterConfig;
pub use navigation::Navigator;
pub use routing::{route_table, RouteRecord, Router};
pub use view::{AppView, ComponentLoader, View};
