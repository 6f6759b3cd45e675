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

//! # Spillway Model
//!
//! **The problem description consumed by the spillway search.**
//!
//! A model is a network of activatable nodes ("valves"). Each node has a
//! value-rate and undirected tunnels to its neighbors; one node is the start
//! position shared by every agent. The search needs two things from this
//! crate: the immutable `Graph` and the `DistanceTable` of shortest travel
//! costs between the nodes worth visiting.
//!
//! ## Architecture
//!
//! * **`index`**: typed indices (`NodeIndex`, `AgentIndex`).
//! * **`graph`**: `Graph` (immutable arena) and `GraphBuilder` (label based,
//!   validated on `build`).
//! * **`distance`**: `DistanceTable`, one breadth-first traversal per
//!   relevant source.
//! * **`time`**: the `Tick` unit.
//! * **`error`**: `MalformedGraphError` and `UnreachableNodeError`.
//!
//! ## Design Philosophy
//!
//! 1.  **Arena + ids**: nodes are addressed by `NodeIndex`; labels are only
//!     resolved once, at build time.
//! 2.  **Fail-Fast**: malformed or disconnected inputs are rejected before a
//!     search can start.

pub mod distance;
pub mod error;
pub mod graph;
pub mod index;
pub mod time;
