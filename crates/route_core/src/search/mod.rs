use rustc_hash::FxHashMap;

use crate::constants::Weight;
use crate::graph::NodeIndex;

use self::shortest_path::ShortestPath;

pub mod dijkstra;
pub mod shortest_path;

pub fn reconstruct_path(
    target: NodeIndex,
    source: NodeIndex,
    node_data: &FxHashMap<NodeIndex, (Weight, Option<NodeIndex>)>,
) -> Option<ShortestPath> {
    let mut path = vec![target];
    let weight = node_data.get(&target)?.0;

    let mut previous_node = node_data.get(&target)?.1?;

    while let Some(prev_node) = node_data.get(&previous_node)?.1 {
        path.push(previous_node);
        previous_node = prev_node;
    }
    path.push(source);
    path.reverse();
    Some(ShortestPath::new(path, weight))
}

#[cfg(test)]
pub(crate) fn assert_path(
    expected_nodes: Vec<usize>,
    expected_weight: Weight,
    sp: Option<ShortestPath>,
) {
    let sp = sp.expect("Expected a path");
    let expected: Vec<NodeIndex> = expected_nodes.into_iter().map(NodeIndex::new).collect();
    assert_eq!(expected, sp.nodes);
    approx::assert_relative_eq!(expected_weight, sp.weight);
}

#[cfg(test)]
pub(crate) fn assert_no_path(sp: Option<ShortestPath>) {
    assert_eq!(None, sp);
}
