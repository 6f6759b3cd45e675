// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Node arena and its builder.
//!
//! `GraphBuilder` accepts the label-based description produced by an input
//! parser and turns it into a `Graph`: an immutable arena of `Node`s indexed
//! by `NodeIndex`, with undirected, deduplicated adjacency and one start
//! node. Every relationship after `build` is an index lookup.

use crate::{error::MalformedGraphError, index::NodeIndex};
use num_traits::{PrimInt, Unsigned};
use rustc_hash::FxHashMap;

/// An activatable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    label: String,
    rate: T,
    neighbors: Vec<NodeIndex>,
}

impl<T> Node<T>
where
    T: PrimInt + Unsigned,
{
    /// The label the node was declared with.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value produced per remaining tick once the node is activated.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Adjacent nodes in ascending index order.
    #[inline]
    pub fn neighbors(&self) -> &[NodeIndex] {
        &self.neighbors
    }

    /// Returns `true` if activating this node can contribute any value.
    #[inline]
    pub fn is_valuable(&self) -> bool {
        self.rate > T::zero()
    }
}

/// The immutable node network a search runs on.
///
/// Invariants established by `GraphBuilder::build`:
/// - every neighbor index is a valid node index;
/// - adjacency is symmetric, sorted and free of duplicates and self loops;
/// - `start` is a valid node index;
/// - labels are unique.
#[derive(Clone)]
pub struct Graph<T> {
    nodes: Vec<Node<T>>,
    start: NodeIndex,
    lookup: FxHashMap<String, NodeIndex>,
    valuable: Vec<NodeIndex>,
}

impl<T> Graph<T>
where
    T: PrimInt + Unsigned,
{
    /// Returns the number of nodes.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Returns the start node shared by all agents.
    #[inline]
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    /// Returns all nodes in index order.
    #[inline]
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_nodes()`.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &Node<T> {
        debug_assert!(
            index.get() < self.num_nodes(),
            "called `Graph::node` with node index out of bounds: the len is {} but the index is {}",
            self.num_nodes(),
            index.get()
        );

        &self.nodes[index.get()]
    }

    /// Returns the value-rate of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_nodes()`.
    #[inline]
    pub fn rate(&self, index: NodeIndex) -> T {
        self.node(index).rate
    }

    /// Returns the label of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_nodes()`.
    #[inline]
    pub fn label(&self, index: NodeIndex) -> &str {
        &self.node(index).label
    }

    /// Returns the neighbors of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..num_nodes()`.
    #[inline]
    pub fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.node(index).neighbors
    }

    /// Resolves a label to its node index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use spillway_model::graph::GraphBuilder;
    /// let mut builder = GraphBuilder::<u32>::new();
    /// builder.add_node("AA", 0, ["BB"]).add_node("BB", 13, ["AA"]).set_start("AA");
    /// let graph = builder.build().unwrap();
    /// assert_eq!(graph.index_of("BB").map(|i| i.get()), Some(1));
    /// assert_eq!(graph.index_of("ZZ"), None);
    /// ```
    #[inline]
    pub fn index_of(&self, label: &str) -> Option<NodeIndex> {
        self.lookup.get(label).copied()
    }

    /// Nodes with a positive value-rate, in ascending index order.
    #[inline]
    pub fn valuable_nodes(&self) -> &[NodeIndex] {
        &self.valuable
    }

    /// Sum of all value-rates, saturating.
    pub fn total_rate(&self) -> T {
        self.nodes
            .iter()
            .fold(T::zero(), |acc, n| acc.saturating_add(n.rate))
    }
}

impl<T> std::fmt::Debug for Graph<T>
where
    T: PrimInt + Unsigned + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes)
            .field("start", &self.start)
            .field("valuable", &self.valuable)
            .finish()
    }
}

impl<T> std::fmt::Display for Graph<T>
where
    T: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph(num_nodes: {}, num_edges: {}, num_valuable: {}, start: {})",
            self.num_nodes(),
            self.num_edges(),
            self.valuable.len(),
            self.label(self.start)
        )
    }
}

#[derive(Debug, Clone)]
struct PendingNode<T> {
    label: String,
    rate: T,
    neighbors: Vec<String>,
}

/// Label-based, mutable description of a graph.
///
/// Nodes receive indices in insertion order. Tunnels may be listed on one
/// side only; `build` makes every edge undirected.
///
/// # Examples
///
/// ```rust
/// # use spillway_model::graph::GraphBuilder;
/// let mut builder = GraphBuilder::<u64>::new();
/// builder
///     .add_node("AA", 0, ["BB"])
///     .add_node("BB", 13, ["CC"])
///     .add_node("CC", 2, Vec::<String>::new())
///     .set_start("AA");
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.num_edges(), 2);
/// assert_eq!(graph.valuable_nodes().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<T> {
    pending: Vec<PendingNode<T>>,
    extra_edges: Vec<(String, String)>,
    start: Option<String>,
}

impl<T> Default for GraphBuilder<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            extra_edges: Vec::new(),
            start: None,
        }
    }
}

impl<T> GraphBuilder<T>
where
    T: PrimInt + Unsigned,
{
    /// Creates an empty builder without a start node.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for `num_nodes` nodes.
    #[inline]
    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            pending: Vec::with_capacity(num_nodes),
            extra_edges: Vec::new(),
            start: None,
        }
    }

    /// Returns the number of nodes added so far.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.pending.len()
    }

    /// Adds a node with its value-rate and the labels of its neighbors.
    pub fn add_node<L, I, S>(&mut self, label: L, rate: T, neighbors: I) -> &mut Self
    where
        L: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.push(PendingNode {
            label: label.into(),
            rate,
            neighbors: neighbors.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Adds an undirected tunnel between two labels.
    pub fn add_edge<A, B>(&mut self, a: A, b: B) -> &mut Self
    where
        A: Into<String>,
        B: Into<String>,
    {
        self.extra_edges.push((a.into(), b.into()));
        self
    }

    /// Designates the node every agent starts at.
    pub fn set_start<L>(&mut self, label: L) -> &mut Self
    where
        L: Into<String>,
    {
        self.start = Some(label.into());
        self
    }

    /// Validates the description and produces the immutable `Graph`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedGraphError` if a label is used twice, a neighbor or
    /// edge endpoint is unknown, or the start node is missing or unknown.
    pub fn build(&self) -> Result<Graph<T>, MalformedGraphError> {
        let mut lookup: FxHashMap<String, NodeIndex> =
            FxHashMap::with_capacity_and_hasher(self.pending.len(), Default::default());
        for (i, node) in self.pending.iter().enumerate() {
            if lookup.insert(node.label.clone(), NodeIndex::new(i)).is_some() {
                return Err(MalformedGraphError::DuplicateNode(node.label.clone()));
            }
        }

        let start_label = self.start.as_ref().ok_or(MalformedGraphError::MissingStart)?;
        let start = *lookup
            .get(start_label)
            .ok_or_else(|| MalformedGraphError::UnknownStart(start_label.clone()))?;

        let resolve = |node: &str, neighbor: &str| {
            lookup
                .get(neighbor)
                .copied()
                .ok_or_else(|| MalformedGraphError::UnknownNeighbor {
                    node: node.to_string(),
                    neighbor: neighbor.to_string(),
                })
        };

        let mut adjacency: Vec<Vec<NodeIndex>> = vec![Vec::new(); self.pending.len()];
        let mut connect = |a: NodeIndex, b: NodeIndex| {
            if a != b {
                adjacency[a.get()].push(b);
                adjacency[b.get()].push(a);
            }
        };

        for (i, node) in self.pending.iter().enumerate() {
            for neighbor in &node.neighbors {
                let j = resolve(&node.label, neighbor)?;
                connect(NodeIndex::new(i), j);
            }
        }
        for (a, b) in &self.extra_edges {
            let ia = resolve(b, a)?;
            let ib = resolve(a, b)?;
            connect(ia, ib);
        }

        let nodes: Vec<Node<T>> = self
            .pending
            .iter()
            .zip(adjacency)
            .map(|(pending, mut neighbors)| {
                neighbors.sort_unstable();
                neighbors.dedup();
                Node {
                    label: pending.label.clone(),
                    rate: pending.rate,
                    neighbors,
                }
            })
            .collect();

        let valuable = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_valuable())
            .map(|(i, _)| NodeIndex::new(i))
            .collect();

        Ok(Graph {
            nodes,
            start,
            lookup,
            valuable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn line() -> GraphBuilder<u32> {
        let mut builder = GraphBuilder::new();
        builder
            .add_node("S", 0, ["A"])
            .add_node("A", 10, ["S", "B"])
            .add_node("B", 20, ["A"])
            .set_start("S");
        builder
    }

    #[test]
    fn test_build_assigns_indices_in_insertion_order() {
        let graph = line().build().unwrap();
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.start(), ni(0));
        assert_eq!(graph.index_of("A"), Some(ni(1)));
        assert_eq!(graph.label(ni(2)), "B");
        assert_eq!(graph.rate(ni(2)), 20);
    }

    #[test]
    fn test_valuable_nodes_exclude_zero_rate() {
        let graph = line().build().unwrap();
        assert_eq!(graph.valuable_nodes(), &[ni(1), ni(2)]);
        assert!(!graph.node(ni(0)).is_valuable());
        assert_eq!(graph.total_rate(), 30);
    }

    #[test]
    fn test_one_sided_edges_are_symmetrized() {
        let mut builder = GraphBuilder::<u32>::new();
        builder
            .add_node("S", 0, ["A"])
            .add_node("A", 1, Vec::<String>::new())
            .set_start("S");
        let graph = builder.build().unwrap();
        assert_eq!(graph.neighbors(ni(0)), &[ni(1)]);
        assert_eq!(graph.neighbors(ni(1)), &[ni(0)]);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_duplicate_edges_and_self_loops_are_dropped() {
        let mut builder = GraphBuilder::<u32>::new();
        builder
            .add_node("S", 0, ["A", "A", "S"])
            .add_node("A", 1, ["S"])
            .add_edge("A", "S")
            .set_start("S");
        let graph = builder.build().unwrap();
        assert_eq!(graph.neighbors(ni(0)), &[ni(1)]);
        assert_eq!(graph.neighbors(ni(1)), &[ni(0)]);
    }

    #[test]
    fn test_unknown_neighbor_is_rejected() {
        let mut builder = line();
        builder.add_node("C", 3, ["ZZ"]);
        assert_eq!(
            builder.build().unwrap_err(),
            MalformedGraphError::UnknownNeighbor {
                node: "C".to_string(),
                neighbor: "ZZ".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_edge_endpoint_is_rejected() {
        let mut builder = line();
        builder.add_edge("B", "QQ");
        assert!(matches!(
            builder.build(),
            Err(MalformedGraphError::UnknownNeighbor { neighbor, .. }) if neighbor == "QQ"
        ));
    }

    #[test]
    fn test_missing_start_is_rejected() {
        let mut builder = GraphBuilder::<u32>::new();
        builder.add_node("A", 1, Vec::<String>::new());
        assert_eq!(builder.build().unwrap_err(), MalformedGraphError::MissingStart);
    }

    #[test]
    fn test_unknown_start_is_rejected() {
        let mut builder = line();
        builder.set_start("NOPE");
        assert_eq!(
            builder.build().unwrap_err(),
            MalformedGraphError::UnknownStart("NOPE".to_string())
        );
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let mut builder = line();
        builder.add_node("A", 5, ["S"]);
        assert_eq!(
            builder.build().unwrap_err(),
            MalformedGraphError::DuplicateNode("A".to_string())
        );
    }

    #[test]
    fn test_builder_is_reusable_after_build() {
        let mut builder = line();
        let first = builder.build().unwrap();
        builder.add_node("C", 7, ["B"]);
        let second = builder.build().unwrap();
        assert_eq!(first.num_nodes(), 3);
        assert_eq!(second.num_nodes(), 4);
        assert_eq!(builder.num_nodes(), 4);
    }

    #[test]
    fn test_display_summarizes_graph() {
        let graph = line().build().unwrap();
        assert_eq!(
            format!("{}", graph),
            "Graph(num_nodes: 3, num_edges: 2, num_valuable: 2, start: S)"
        );
        assert!(format!("{:?}", graph).contains("Graph"));
    }
}
