//! Re-exports of the most commonly used items in `route_core`.
pub use crate::error::{NoPathError, NoValidRouteError};
pub use crate::graph::{node_index, Graph, Node, NodeIndex};
pub use crate::layout::{store_layout, BILLING_COUNTER, ENTRANCE};
pub use crate::planner::{plan_route, Route, RoutePlanner, Strategy};

pub use crate::search;
