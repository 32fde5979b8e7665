//! The application route table.

use crate::routing::record::RouteRecord;
use crate::view::AppView;

/// Pattern of the not-found route.
pub const CATCH_ALL_PATH: &str = "/:catchAll(.*)*";

/// Ordered route table of the application. First match wins.
pub fn route_table() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("/main", AppView::MainLayout.loader()).with_children(vec![
            RouteRecord::new("", AppView::Index.loader()),
            RouteRecord::new("p2", AppView::MovieList.loader()),
        ]),
        RouteRecord::new("/", AppView::Login.loader()),
        // Must stay last, it matches every path.
        RouteRecord::new(CATCH_ALL_PATH, AppView::NotFound.loader()),
    ]
}
