//! Crate to plan shopping routes through a store-layout graph.
//!
//! # Basic usage
//! ```
//! use route_core::prelude::*;
//!
//! // Builtin reference store layout
//! let g = store_layout();
//!
//! let entrance = g.node_index_of(ENTRANCE).unwrap();
//! let billing = g.node_index_of(BILLING_COUNTER).unwrap();
//!
//! let shopping_list: Vec<_> = ["Milk", "Snacks"]
//!     .iter()
//!     .map(|&name| g.node_index_of(name).unwrap())
//!     .collect();
//!
//! let route = plan_route(&g, entrance, billing, &shopping_list, Strategy::Exact).unwrap();
//!
//! assert_eq!(route.stops.first(), Some(&entrance));
//! assert_eq!(route.stops.last(), Some(&billing));
//! ```
//! [`Graph`]: crate::graph::Graph
pub mod constants;
pub mod error;
pub mod graph;
pub mod layout;
pub mod planner;
pub mod prelude;
pub mod search;
pub mod statistics;
pub mod util;
