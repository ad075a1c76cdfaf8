use crate::{constants::Weight, graph::NodeIndex};

/// An ordered walk through the graph and its total edge weight.
#[derive(Debug, PartialEq, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<NodeIndex>,
    pub weight: Weight,
}

impl ShortestPath {
    pub fn new(nodes: Vec<NodeIndex>, weight: Weight) -> Self {
        ShortestPath { nodes, weight }
    }
}
