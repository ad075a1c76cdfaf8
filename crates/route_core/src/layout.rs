//! The builtin reference store layout.
//!
//! Sections are arranged in four aisle rows between the entrance and the
//! billing counter; weights are walking distances between sections.

use crate::constants::Weight;
use crate::graph::Graph;

/// Name of the start anchor in the builtin layout.
pub const ENTRANCE: &str = "Entrance";
/// Name of the end anchor in the builtin layout.
pub const BILLING_COUNTER: &str = "Billing Counter";

/// All sections of the store. The two anchors come first and last.
pub const NODES: [&str; 21] = [
    "Entrance",
    "Produce",
    "Dairy",
    "Bakery",
    "Frozen",
    "Meat",
    "Canned Goods",
    "Beverages",
    "Snacks",
    "Cleaning Supplies",
    "Personal Care",
    "Bread",
    "Vegetables",
    "Fruits",
    "Deli",
    "Seafood",
    "Pasta",
    "Sauces",
    "Milk",
    "Cheese",
    "Billing Counter",
];

/// Weighted connections between sections. Every entry is walkable in both
/// directions.
pub const CONNECTIONS: [(&str, &str, Weight); 70] = [
    ("Entrance", "Produce", 2.0),
    ("Entrance", "Canned Goods", 4.0),
    ("Entrance", "Bread", 6.0),
    ("Entrance", "Pasta", 8.0),
    // First aisle row
    ("Produce", "Dairy", 1.0),
    ("Dairy", "Bakery", 1.0),
    ("Bakery", "Frozen", 1.0),
    ("Frozen", "Meat", 1.0),
    // Crossings from the first into the second row
    ("Meat", "Canned Goods", 5.0),
    ("Meat", "Beverages", 4.0),
    ("Meat", "Snacks", 3.0),
    ("Meat", "Cleaning Supplies", 2.0),
    ("Meat", "Personal Care", 1.0),
    ("Frozen", "Personal Care", 2.0),
    ("Frozen", "Cleaning Supplies", 1.0),
    ("Frozen", "Snacks", 2.0),
    ("Frozen", "Beverages", 3.0),
    ("Frozen", "Canned Goods", 4.0),
    ("Bakery", "Personal Care", 3.0),
    ("Bakery", "Cleaning Supplies", 2.0),
    ("Bakery", "Snacks", 1.0),
    ("Bakery", "Beverages", 2.0),
    ("Bakery", "Canned Goods", 3.0),
    ("Dairy", "Personal Care", 4.0),
    ("Dairy", "Cleaning Supplies", 3.0),
    ("Dairy", "Snacks", 2.0),
    ("Dairy", "Beverages", 1.0),
    ("Dairy", "Canned Goods", 2.0),
    ("Produce", "Personal Care", 5.0),
    ("Produce", "Cleaning Supplies", 4.0),
    ("Produce", "Snacks", 3.0),
    ("Produce", "Beverages", 2.0),
    ("Produce", "Canned Goods", 1.0),
    // Second aisle row
    ("Canned Goods", "Beverages", 1.0),
    ("Beverages", "Snacks", 1.0),
    ("Snacks", "Cleaning Supplies", 1.0),
    ("Cleaning Supplies", "Personal Care", 1.0),
    // Third aisle row
    ("Bread", "Vegetables", 1.0),
    ("Vegetables", "Fruits", 1.0),
    ("Fruits", "Deli", 1.0),
    ("Deli", "Seafood", 1.0),
    // Crossings from the third into the fourth row
    ("Seafood", "Pasta", 5.0),
    ("Seafood", "Sauces", 4.0),
    ("Seafood", "Milk", 3.0),
    ("Seafood", "Cheese", 2.0),
    ("Deli", "Cheese", 1.0),
    ("Deli", "Milk", 2.0),
    ("Deli", "Sauces", 3.0),
    ("Deli", "Pasta", 4.0),
    ("Fruits", "Cheese", 2.0),
    ("Fruits", "Milk", 1.0),
    ("Fruits", "Sauces", 2.0),
    ("Fruits", "Pasta", 3.0),
    ("Vegetables", "Cheese", 3.0),
    ("Vegetables", "Milk", 2.0),
    ("Vegetables", "Sauces", 1.0),
    ("Vegetables", "Pasta", 2.0),
    ("Bread", "Cheese", 4.0),
    ("Bread", "Milk", 3.0),
    ("Bread", "Sauces", 2.0),
    ("Bread", "Pasta", 1.0),
    // Fourth aisle row
    ("Pasta", "Sauces", 1.0),
    ("Sauces", "Milk", 1.0),
    ("Milk", "Cheese", 1.0),
    ("Personal Care", "Seafood", 4.0),
    ("Bread", "Canned Goods", 4.0),
    ("Billing Counter", "Cheese", 2.0),
    ("Billing Counter", "Seafood", 4.0),
    ("Billing Counter", "Personal Care", 6.0),
    ("Billing Counter", "Meat", 8.0),
];

/// Build the builtin layout graph.
pub fn store_layout() -> Graph {
    Graph::from_layout(&NODES, &CONNECTIONS).expect("builtin layout is consistent")
}

#[cfg(test)]
mod tests {
    use crate::planner::{plan_route, Strategy};

    use super::*;

    #[test]
    fn builtin_layout_loads() {
        let g = store_layout();

        assert_eq!(g.nodes.len(), NODES.len());
        assert_eq!(g.edges.len(), CONNECTIONS.len() * 2);
        assert!(g.node_index_of(ENTRANCE).is_some());
        assert!(g.node_index_of(BILLING_COUNTER).is_some());
    }

    #[test]
    fn reference_shopping_list_plans_end_to_end() {
        let g = store_layout();
        let entrance = g.node_index_of(ENTRANCE).unwrap();
        let billing = g.node_index_of(BILLING_COUNTER).unwrap();

        let list: Vec<_> = ["Bread", "Vegetables", "Cheese", "Snacks", "Frozen"]
            .iter()
            .map(|&name| g.node_index_of(name).unwrap())
            .collect();

        let exact = plan_route(&g, entrance, billing, &list, Strategy::Exact).unwrap();
        let greedy = plan_route(&g, entrance, billing, &list, Strategy::Greedy).unwrap();

        assert_eq!(exact.nodes.first(), Some(&entrance));
        assert_eq!(exact.nodes.last(), Some(&billing));
        assert!(greedy.weight + 1e-9 >= exact.weight);
    }
}
