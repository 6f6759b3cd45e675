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

//! Graphs shared by the unit tests of this crate.

use rand::{Rng, rngs::StdRng};
use spillway_model::{
    distance::DistanceTable,
    graph::{Graph, GraphBuilder},
};

/// `S(0) - A(10) - B(20)`.
pub(crate) fn line_graph() -> Graph<u64> {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("S", 0, ["A"])
        .add_node("A", 10, ["B"])
        .add_node("B", 20, Vec::<String>::new())
        .set_start("S");
    builder.build().expect("line graph is well formed")
}

/// Two value nodes hanging off the start: `L(5) - S(0) - R(7)`.
pub(crate) fn fork_graph() -> Graph<u64> {
    let mut builder = GraphBuilder::new();
    builder
        .add_node("S", 0, ["L", "R"])
        .add_node("L", 5, Vec::<String>::new())
        .add_node("R", 7, Vec::<String>::new())
        .set_start("S");
    builder.build().expect("fork graph is well formed")
}

/// The ten valve network every test of the scheduler is calibrated on.
pub(crate) fn valve_network() -> Graph<u64> {
    let mut builder = GraphBuilder::with_capacity(10);
    builder
        .add_node("AA", 0, ["DD", "II", "BB"])
        .add_node("BB", 13, ["CC", "AA"])
        .add_node("CC", 2, ["DD", "BB"])
        .add_node("DD", 20, ["CC", "AA", "EE"])
        .add_node("EE", 3, ["FF", "DD"])
        .add_node("FF", 0, ["EE", "GG"])
        .add_node("GG", 0, ["FF", "HH"])
        .add_node("HH", 22, ["GG"])
        .add_node("II", 0, ["AA", "JJ"])
        .add_node("JJ", 21, ["II"])
        .set_start("AA");
    builder.build().expect("valve network is well formed")
}

/// A connected random graph with `num_nodes` nodes and a zero-rate start.
pub(crate) fn random_graph(rng: &mut StdRng, num_nodes: usize) -> Graph<u64> {
    let mut builder = GraphBuilder::with_capacity(num_nodes);
    for i in 0..num_nodes {
        let rate = if i == 0 || rng.random_bool(0.5) {
            0
        } else {
            rng.random_range(1..30)
        };
        let mut neighbors = Vec::new();
        if i > 0 {
            neighbors.push(format!("N{}", rng.random_range(0..i)));
        }
        if i > 2 && rng.random_bool(0.3) {
            neighbors.push(format!("N{}", rng.random_range(0..i)));
        }
        builder.add_node(format!("N{}", i), rate, neighbors);
    }
    builder.set_start("N0");
    builder.build().expect("random graph is well formed")
}

pub(crate) fn distances(graph: &Graph<u64>) -> DistanceTable {
    DistanceTable::new(graph).expect("test graphs are connected")
}
