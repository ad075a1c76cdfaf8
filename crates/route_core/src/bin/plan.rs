use anyhow::Context;
use log::info;

use route_core::graph::Graph;
use route_core::layout::store_layout;
use route_core::planner::RoutePlanner;
use route_core::util::cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = cli::parse();

    let graph = match &cfg.csv_files {
        Some((nodes, edges)) => Graph::from_csv(nodes, edges)?,
        None => store_layout(),
    };
    info!(
        "Graph has {} nodes and {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    let entrance = graph
        .node_index_of(&cfg.entrance)
        .with_context(|| format!("Unknown entrance section: {}", cfg.entrance))?;
    let billing = graph
        .node_index_of(&cfg.billing)
        .with_context(|| format!("Unknown billing section: {}", cfg.billing))?;

    let shopping_list = cfg
        .items
        .iter()
        .map(|item| {
            graph
                .node_index_of(item)
                .with_context(|| format!("Unknown section: {item}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut planner = RoutePlanner::new(&graph, entrance, billing);
    let route = planner.plan(&shopping_list, cfg.strategy)?;

    println!("Stops:");
    for &stop in &route.stops {
        println!("  {}", graph.name(stop));
    }

    let walk: Vec<_> = route.nodes.iter().map(|&n| graph.name(n)).collect();
    println!("Walk: {}", walk.join(" -> "));
    println!("Total distance: {}", route.weight);
    println!("{}", planner.stats);

    Ok(())
}
