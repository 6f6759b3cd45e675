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

//! Spillway-Search: cooperative frontier search for activation schedules
//!
//! Several agents share a time budget and walk a graph of activatable nodes.
//! Each node, once activated, yields its value-rate for every remaining
//! tick. This crate searches the joint action space of all agents, one tick
//! per round, and returns the best achievable total value together with
//! the schedule that achieves it.
//!
//! Core flow
//! - Build a `spillway_model::graph::Graph<T>` and its `DistanceTable`.
//! - Describe the run with a `config::SearchConfig` (agents, budget, pruning).
//! - Run `frontier::FrontierScheduler::search` with any `FrontierMonitor`.
//! - Read value, schedule, termination reason and statistics from the
//!   `result::SearchOutcome`.
//!
//! Assumptions and guarantees
//! - Bound pruning is sound: the projection in `bound` never underestimates.
//! - Truncation is heuristic and is reported by the termination reason.
//! - Results are deterministic, with or without parallel expansion.
//!
//! Module map
//! - `action`: per-agent action enumeration.
//! - `aggregate`: reduction of terminal states to the best one.
//! - `bound`: optimistic projection and truncation rankings.
//! - `config`: search configuration and the truncation policy.
//! - `error`: configuration and aggregation errors.
//! - `frontier`: the scheduler and its session.
//! - `monitor`: frontier monitors (log, composite, no-op).
//! - `result`: outcomes with termination reasons.
//! - `state`: immutable search snapshots.
//! - `stats`: lightweight counters and timing.
//! - `step`: the joint step function.

pub mod action;
pub mod aggregate;
pub mod bound;
pub mod config;
pub mod error;
pub mod frontier;
pub mod monitor;
pub mod result;
pub mod state;
pub mod stats;
pub mod step;

#[cfg(test)]
mod testing;
