use std::path::PathBuf;

use clap::Parser;

use crate::planner::Strategy;

#[derive(Parser)]
#[command(version, about = "Plan a shopping route through the store", long_about = None)]
struct Cli {
    /// Section names to visit
    items: Vec<String>,

    /// Path to a nodes csv file
    #[arg(long, value_name = "path", requires = "edges_csv")]
    nodes_csv: Option<PathBuf>,

    /// Path to an edges csv file
    #[arg(long, value_name = "path", requires = "nodes_csv")]
    edges_csv: Option<PathBuf>,

    /// Name of the entrance section
    #[arg(long, default_value = "Entrance")]
    entrance: String,

    /// Name of the billing counter section
    #[arg(long, default_value = "Billing Counter")]
    billing: String,

    /// Use the nearest-neighbor heuristic instead of the exhaustive search
    #[arg(long)]
    greedy: bool,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub items: Vec<String>,
    pub csv_files: Option<(PathBuf, PathBuf)>,
    pub entrance: String,
    pub billing: String,
    pub strategy: Strategy,
}

pub fn parse() -> Cfg {
    let cli = Cli::parse();

    Cfg {
        csv_files: cli.nodes_csv.zip(cli.edges_csv),
        items: cli.items,
        entrance: cli.entrance,
        billing: cli.billing,
        strategy: if cli.greedy {
            Strategy::Greedy
        } else {
            Strategy::Exact
        },
    }
}
