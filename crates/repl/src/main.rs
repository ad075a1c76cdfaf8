//! Interactive session layer on top of the route planner.
use std::path::{Path, PathBuf};

use reedline_repl_rs::clap::{value_parser, Arg, ArgMatches, Command};
use reedline_repl_rs::{Repl, Result};

use route_core::graph::{node_index, Graph, NodeIndex};
use route_core::layout::{store_layout, BILLING_COUNTER, ENTRANCE};
use route_core::planner::{RoutePlanner, Strategy};

struct Context {
    graph: Graph,
    entrance: NodeIndex,
    billing: NodeIndex,
}

impl Context {
    fn new(graph: Graph, entrance: NodeIndex, billing: NodeIndex) -> Self {
        Self {
            graph,
            entrance,
            billing,
        }
    }
}

/// Print graph info
fn info(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    Ok(Some(format!(
        "Store graph has {} sections and {} connections",
        context.graph.nodes.len(),
        context.graph.edges.len()
    )))
}

fn shortest_path(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let from = args.get_one::<String>("from").unwrap();
    let to = args.get_one::<String>("to").unwrap();

    let (src, dst) = match (
        context.graph.node_index_of(from),
        context.graph.node_index_of(to),
    ) {
        (Some(src), Some(dst)) => (src, dst),
        _ => return Ok(Some("Unknown section name".to_string())),
    };

    match context.graph.shortest_path(src, dst) {
        Ok(sp) => {
            let mut path = String::new();
            for node in sp.nodes {
                path.push_str(&format!("{}\n", context.graph.name(node)));
            }
            path.push_str(&format!("Distance: {}", sp.weight));
            Ok(Some(path))
        }
        Err(err) => Ok(Some(err.to_string())),
    }
}

fn plan(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let items = args.get_one::<String>("items").unwrap();
    let strategy = match args.get_one::<String>("strategy").map(String::as_str) {
        Some("greedy") => Strategy::Greedy,
        _ => Strategy::Exact,
    };

    let mut shopping_list = Vec::new();
    for item in items.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match context.graph.node_index_of(item) {
            Some(idx) => shopping_list.push(idx),
            None => return Ok(Some(format!("Unknown section: {item}"))),
        }
    }

    let mut planner = RoutePlanner::new(&context.graph, context.entrance, context.billing);
    match planner.plan(&shopping_list, strategy) {
        Ok(route) => {
            let walk: Vec<_> = route.nodes.iter().map(|&n| context.graph.name(n)).collect();
            Ok(Some(format!(
                "{}\nTotal distance: {}\nTook: {:?}",
                walk.join(" -> "),
                route.weight,
                planner.stats.duration
            )))
        }
        Err(err) => Ok(Some(err.to_string())),
    }
}

fn measure(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    use rand::Rng;

    let n = *args.get_one::<usize>("n").unwrap_or(&10);
    let k = *args.get_one::<usize>("k").unwrap_or(&4);

    let mut rng = rand::thread_rng();
    let mut res = String::new();
    // Plan `n` random shopping lists of `k` sections each
    for _ in 0..n {
        let shopping_list: Vec<NodeIndex> = (0..k)
            .map(|_| node_index(rng.gen_range(0..context.graph.nodes.len())))
            .collect();

        let mut planner = RoutePlanner::new(&context.graph, context.entrance, context.billing);
        if planner.plan(&shopping_list, Strategy::Exact).is_err() {
            continue;
        }
        res.push_str(&format!("{} stops: {:?}\n", k, planner.stats.duration));
    }

    Ok(Some(res))
}

fn main() -> Result<()> {
    env_logger::init();

    // Builtin layout, or a nodes/edges csv pair given as arguments
    let graph = match (std::env::args().nth(1), std::env::args().nth(2)) {
        (Some(nodes), Some(edges)) => Graph::from_csv(Path::new(&nodes), Path::new(&edges))
            .expect("Failed to load layout from csv"),
        _ => store_layout(),
    };

    let entrance = graph
        .node_index_of(ENTRANCE)
        .expect("Layout has no entrance");
    let billing = graph
        .node_index_of(BILLING_COUNTER)
        .expect("Layout has no billing counter");
    let context = Context::new(graph, entrance, billing);

    let mut repl = Repl::new(context)
        .with_name("RoutePlanner")
        .with_version("v0.1.0")
        .with_description("Simple REPL to plan shopping routes")
        .with_banner("Welcome to the store route planner")
        .with_history(PathBuf::from(".history"), 100)
        .with_command(Command::new("info").about("Print store graph info"), info)
        .with_command(
            Command::new("sp")
                .arg(
                    Arg::new("from")
                        .required(true)
                        .help("Name of the start section"),
                )
                .arg(
                    Arg::new("to")
                        .required(true)
                        .help("Name of the target section"),
                )
                .about("Calculate the shortest path between two sections"),
            shortest_path,
        )
        .with_command(
            Command::new("plan")
                .arg(
                    Arg::new("items")
                        .required(true)
                        .help("Comma-separated section names to visit"),
                )
                .arg(
                    Arg::new("strategy")
                        .required(false)
                        .help("exact (default) or greedy"),
                )
                .about("Plan a route visiting all given sections"),
            plan,
        )
        .with_command(
            Command::new("measure")
                .arg(
                    Arg::new("n")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Number of random shopping lists to plan"),
                )
                .arg(
                    Arg::new("k")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Length of each shopping list"),
                )
                .about("Measure planning time for random shopping lists"),
            measure,
        );

    repl.run()
}
