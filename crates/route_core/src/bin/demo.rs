//! Minimal example
use route_core::prelude::*;

fn main() {
    // Builtin reference store layout
    let g = store_layout();

    let entrance = g.node_index_of(ENTRANCE).expect("layout has an entrance");
    let billing = g
        .node_index_of(BILLING_COUNTER)
        .expect("layout has a billing counter");

    let shopping_list: Vec<_> = ["Bread", "Vegetables", "Cheese", "Snacks", "Frozen"]
        .iter()
        .map(|&name| g.node_index_of(name).expect("section exists"))
        .collect();

    let route = plan_route(&g, entrance, billing, &shopping_list, Strategy::Exact)
        .expect("store layout is connected");

    let walk: Vec<_> = route.nodes.iter().map(|&n| g.name(n)).collect();
    println!("Route: {}", walk.join(" -> "));
    println!("Total distance: {}", route.weight);
}
