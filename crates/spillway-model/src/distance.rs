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

//! All-pairs travel costs between the nodes a search can care about.
//!
//! Only the start node and the nodes with a positive value-rate are ever
//! positions or targets of an agent, so the table is computed for those
//! "relevant" nodes only: one breadth-first traversal per relevant source
//! over the full graph, O(R·(V+E)) with R ≤ V. Distances are stored in a
//! flat `R × R` matrix.

use crate::{error::UnreachableNodeError, graph::Graph, index::NodeIndex, time::Tick};
use num_traits::{PrimInt, Unsigned};
use std::collections::VecDeque;

#[inline(always)]
fn flatten_index(num_sources: usize, row: usize, column: usize) -> usize {
    row * num_sources + column
}

/// Shortest number of edge traversals between every pair of relevant nodes.
///
/// Invariants:
/// - `distance(n, n) == 0`;
/// - `distance(a, b) == distance(b, a)` (edges are undirected);
/// - every relevant node is reachable from every other relevant node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    sources: Vec<NodeIndex>,       // ascending
    slots: Vec<Option<usize>>,     // len = num_nodes of the graph
    distances: Vec<Tick>,          // len = sources.len()^2
}

impl DistanceTable {
    /// Computes the table for `graph`.
    ///
    /// # Errors
    ///
    /// Returns `UnreachableNodeError` for the first node (in index order)
    /// with a positive value-rate that cannot be reached from the start.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use spillway_model::{graph::GraphBuilder, distance::DistanceTable};
    /// let mut builder = GraphBuilder::<u32>::new();
    /// builder
    ///     .add_node("S", 0, ["X"])
    ///     .add_node("X", 0, ["A"])
    ///     .add_node("A", 5, Vec::<String>::new())
    ///     .set_start("S");
    /// let graph = builder.build().unwrap();
    /// let table = DistanceTable::new(&graph).unwrap();
    /// let (s, a) = (graph.index_of("S").unwrap(), graph.index_of("A").unwrap());
    /// assert_eq!(table.distance(s, a), 2);
    /// assert_eq!(table.num_sources(), 2); // "X" is neither start nor valuable
    /// ```
    pub fn new<T>(graph: &Graph<T>) -> Result<Self, UnreachableNodeError>
    where
        T: PrimInt + Unsigned,
    {
        let mut sources: Vec<NodeIndex> = graph.valuable_nodes().to_vec();
        sources.push(graph.start());
        sources.sort_unstable();
        sources.dedup();

        let mut slots = vec![None; graph.num_nodes()];
        for (slot, source) in sources.iter().enumerate() {
            slots[source.get()] = Some(slot);
        }

        let n = sources.len();
        let mut distances = vec![Tick::MAX; n * n];
        let mut scratch = vec![None; graph.num_nodes()];
        let mut queue = VecDeque::with_capacity(graph.num_nodes());

        // The start goes first so that an unreachable node is reported
        // relative to it.
        let start_slot = slots[graph.start().get()].unwrap_or_default();
        let order = std::iter::once(start_slot).chain((0..n).filter(|&s| s != start_slot));

        for row in order {
            breadth_first(graph, sources[row], &mut scratch, &mut queue);

            for (column, target) in sources.iter().enumerate() {
                match scratch[target.get()] {
                    Some(d) => distances[flatten_index(n, row, column)] = d,
                    None => {
                        debug_assert!(
                            row == start_slot,
                            "relevant nodes reachable from the start must reach each other"
                        );
                        return Err(UnreachableNodeError {
                            node: *target,
                            label: graph.label(*target).to_string(),
                            start: graph.label(graph.start()).to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            sources,
            slots,
            distances,
        })
    }

    /// Returns the number of relevant nodes (rows of the matrix).
    #[inline]
    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    /// Returns the relevant nodes in ascending index order.
    #[inline]
    pub fn sources(&self) -> &[NodeIndex] {
        &self.sources
    }

    /// Returns `true` if `node` is a row of the table.
    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.slot(node).is_some()
    }

    #[inline(always)]
    fn slot(&self, node: NodeIndex) -> Option<usize> {
        self.slots.get(node.get()).copied().flatten()
    }

    /// Returns the distance between two nodes, or `None` if either of them
    /// is not a relevant node.
    #[inline]
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Option<Tick> {
        let (row, column) = (self.slot(from)?, self.slot(to)?);
        Some(self.distances[flatten_index(self.num_sources(), row, column)])
    }

    /// Returns the distance between two relevant nodes.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is not a relevant node.
    #[inline]
    pub fn distance(&self, from: NodeIndex, to: NodeIndex) -> Tick {
        match self.get(from, to) {
            Some(d) => d,
            None => panic!(
                "called `DistanceTable::distance` with a node outside the table: {} -> {}",
                from, to
            ),
        }
    }

    /// Returns the largest finite distance in the table.
    pub fn diameter(&self) -> Tick {
        self.distances.iter().copied().max().unwrap_or(0)
    }
}

impl std::fmt::Display for DistanceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DistanceTable(num_sources: {}, diameter: {})",
            self.num_sources(),
            self.diameter()
        )
    }
}

/// Fills `dist` with hop counts from `source`; unreached nodes stay `None`.
fn breadth_first<T>(
    graph: &Graph<T>,
    source: NodeIndex,
    dist: &mut [Option<Tick>],
    queue: &mut VecDeque<NodeIndex>,
) where
    T: PrimInt + Unsigned,
{
    dist.fill(None);
    queue.clear();

    dist[source.get()] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next = dist[current.get()].unwrap_or_default() + 1;
        for &neighbor in graph.neighbors(current) {
            if dist[neighbor.get()].is_none() {
                dist[neighbor.get()] = Some(next);
                queue.push_back(neighbor);
            }
        }
    }
}
