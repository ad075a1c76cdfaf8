use std::{fmt, path::Path};

use anyhow::Context;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::Weight;
use crate::error::NoPathError;
use crate::search::dijkstra::Dijkstra;
use crate::search::shortest_path::ShortestPath;

/// Default integer type for node and edge indices.
/// Needs to be increased for very large layouts > u32::max
pub type DefaultIdx = u32;

/// Node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(DefaultIdx);

impl NodeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(ix: usize) -> Self {
        NodeIndex::new(ix)
    }
}

/// Short version of `NodeIndex::new`
pub fn node_index(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Edge identifier.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct EdgeIndex(DefaultIdx);

impl EdgeIndex {
    #[inline]
    pub fn new(x: usize) -> Self {
        EdgeIndex(x as DefaultIdx)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A store section or junction. Identity is the name; positions and any
/// other display attributes live in the presentation layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Node {
    pub name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Node { name: name.into() }
    }
}

/// Directed connection between two sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub weight: Weight,
}

impl Edge {
    pub fn new(source: NodeIndex, target: NodeIndex, weight: Weight) -> Self {
        Edge {
            source,
            target,
            weight,
        }
    }
}

/// Edge row of a layout csv file. Endpoints refer to the nodes file by name;
/// each row yields the connection in both directions.
#[derive(Debug, Deserialize)]
struct EdgeRecord {
    source: String,
    target: String,
    weight: Weight,
}

/// The store layout: sections plus weighted connections between them.
///
/// Built once from configuration data and read-only afterwards. Every
/// logical connection is stored as two directed edges of equal weight, so
/// the graph behaves as undirected for pathing purposes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    edges_out: Vec<Vec<EdgeIndex>>,
    names: FxHashMap<String, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            edges_out: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    pub fn with_capacity(num_nodes: usize, num_edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(num_nodes),
            edges: Vec::with_capacity(num_edges),
            edges_out: Vec::with_capacity(num_nodes),
            names: FxHashMap::default(),
        }
    }

    /// Adds a new node to the graph.
    ///
    /// Section names are unique: adding a name that is already present
    /// returns the existing index instead of creating a second node.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&node_idx) = self.names.get(&node.name) {
            return node_idx;
        }

        let node_idx = NodeIndex::new(self.nodes.len());

        // Create new entry in adjacency list for new node
        self.edges_out.push(Vec::new());
        self.names.insert(node.name.clone(), node_idx);
        self.nodes.push(node);

        node_idx
    }

    /// Add a new directed `edge` to the graph.
    ///
    /// **Panics** if the source or target node does not exist.
    ///
    /// Inserting an edge between an already connected pair overwrites the
    /// stored weight (last write wins).
    ///
    /// Returns the index of the edge.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeIndex {
        assert!(
            edge.source.index() < self.nodes.len(),
            "Source node index ({}) does not exist",
            edge.source.index()
        );
        assert!(
            edge.target.index() < self.nodes.len(),
            "Target node index ({}) does not exist",
            edge.target.index()
        );

        for &edge_idx in &self.edges_out[edge.source.index()] {
            let old_edge = &mut self.edges[edge_idx.index()];
            if edge.target == old_edge.target {
                old_edge.weight = edge.weight;
                return edge_idx;
            }
        }

        let edge_idx = EdgeIndex::new(self.edges.len());
        self.edges_out[edge.source.index()].push(edge_idx);
        self.edges.push(edge);

        edge_idx
    }

    /// Insert the logical connection `u` <=> `v` as two directed edges of
    /// equal weight.
    pub fn connect(&mut self, u: NodeIndex, v: NodeIndex, weight: Weight) {
        self.add_edge(Edge::new(u, v, weight));
        self.add_edge(Edge::new(v, u, weight));
    }

    pub fn node(&self, node_idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(node_idx.index())
    }

    /// Index of the section with the given name.
    pub fn node_index_of(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    /// Name of the section at `node_idx`.
    ///
    /// **Panics** if the node does not exist.
    pub fn name(&self, node_idx: NodeIndex) -> &str {
        &self.nodes[node_idx.index()].name
    }

    /// Returns an iterator over all nodes of the graph
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns an iterator over all edges of the graph
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn neighbors_outgoing(&self, node_idx: NodeIndex) -> impl Iterator<Item = &Edge> + '_ {
        self.edges_out[node_idx.index()]
            .iter()
            .map(move |edge_idx| &self.edges[edge_idx.index()])
    }

    /// The minimum-weight path from `source` to `target`.
    ///
    /// The returned path's total weight equals
    /// [`shortest_path_length`](Self::shortest_path_length) for the same
    /// pair. Between equal-cost paths the choice is unspecified.
    pub fn shortest_path(
        &self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Result<ShortestPath, NoPathError> {
        let mut dijkstra = Dijkstra::new(self);
        dijkstra
            .search(source, target)
            .ok_or(NoPathError { source, target })
    }

    /// The minimum total edge weight over any path from `source` to
    /// `target`.
    pub fn shortest_path_length(
        &self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Result<Weight, NoPathError> {
        self.shortest_path(source, target).map(|sp| sp.weight)
    }

    /// Build a graph from in-code configuration data: section names plus
    /// `(from, to, weight)` connection triples.
    pub fn from_layout(
        nodes: &[&str],
        connections: &[(&str, &str, Weight)],
    ) -> anyhow::Result<Self> {
        let mut g = Graph::with_capacity(nodes.len(), connections.len() * 2);

        for name in nodes {
            g.add_node(Node::new(*name));
        }

        for (from, to, weight) in connections {
            let u = g
                .node_index_of(from)
                .with_context(|| format!("Unknown section in layout: {from}"))?;
            let v = g
                .node_index_of(to)
                .with_context(|| format!("Unknown section in layout: {to}"))?;
            g.connect(u, v, *weight);
        }

        Ok(g)
    }

    /// Build a graph from a pair of csv files: a nodes file with a `name`
    /// column and an edges file with `source,target,weight` columns. Each
    /// edge row connects both directions.
    pub fn from_csv(path_to_nodes: &Path, path_to_edges: &Path) -> anyhow::Result<Self> {
        let mut g = Graph::new();

        let mut reader = csv::Reader::from_path(path_to_nodes)?;
        for result in reader.deserialize() {
            let node: Node = result.context("Failed to parse Node")?;
            g.add_node(node);
        }

        let mut reader = csv::Reader::from_path(path_to_edges)?;
        for result in reader.deserialize() {
            let record: EdgeRecord = result.context("Failed to parse Edge")?;
            let u = g
                .node_index_of(&record.source)
                .with_context(|| format!("Unknown section in edges file: {}", record.source))?;
            let v = g
                .node_index_of(&record.target)
                .with_context(|| format!("Unknown section in edges file: {}", record.target))?;
            g.connect(u, v, record.weight);
        }

        info!(
            "Loaded layout with {} nodes and {} edges",
            g.nodes.len(),
            g.edges.len()
        );

        Ok(g)
    }
}
