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

//! # Activation Schedule Solver
//!
//! A facade that chains the three stages of a run:
//!
//! - graph validation (`GraphBuilder::build`, `MalformedGraphError`),
//! - the all-pairs distance table (`DistanceTable::new`,
//!   `UnreachableNodeError`),
//! - the frontier search (`FrontierScheduler::search`, `SearchError`).
//!
//! The configuration is validated first, so an invalid budget or agent
//! count is reported before any graph work is done. Monitors added through
//! the builder observe every search the solver runs.
//!
//! ## Usage
//!
//! ```rust
//! use spillway_model::graph::GraphBuilder;
//! use spillway_solver::solver::SolverBuilder;
//!
//! let mut graph = GraphBuilder::<u64>::new();
//! graph
//!     .add_node("S", 0, ["A"])
//!     .add_node("A", 10, ["B"])
//!     .add_node("B", 20, Vec::<String>::new())
//!     .set_start("S");
//!
//! let mut solver = SolverBuilder::<u64>::new().with_budget(5).build();
//! let outcome = solver.solve_builder(&graph).unwrap();
//! assert_eq!(outcome.value(), 50);
//! assert!(outcome.is_exact());
//! ```

use spillway_core::num::FlowNumeric;
use spillway_model::{
    distance::DistanceTable,
    error::{MalformedGraphError, UnreachableNodeError},
    graph::{Graph, GraphBuilder},
    time::Tick,
};
use spillway_search::{
    config::{PruningPolicy, SearchConfig},
    error::SearchError,
    frontier::FrontierScheduler,
    monitor::{composite::CompositeMonitor, frontier_monitor::FrontierMonitor, log::LogMonitor},
    result::SearchOutcome,
};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Any failure of a solver run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(transparent)]
    MalformedGraph(#[from] MalformedGraphError),
    #[error(transparent)]
    UnreachableNode(#[from] UnreachableNodeError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

pub struct Solver<'a, T>
where
    T: FlowNumeric,
{
    config: SearchConfig,
    monitor: CompositeMonitor<'a, T>,
    scheduler: FrontierScheduler<T>,
}

impl<'a, T> Solver<'a, T>
where
    T: FlowNumeric,
{
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replaces the configuration used by subsequent runs.
    #[inline]
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: FrontierMonitor<T> + 'a,
    {
        self.monitor.add_monitor(monitor);
    }

    #[inline]
    pub fn num_monitors(&self) -> usize {
        self.monitor.len()
    }

    /// Searches `graph` and returns the full outcome.
    ///
    /// # Errors
    ///
    /// `SolveError::Search` for an invalid configuration,
    /// `SolveError::UnreachableNode` if a valuable node cannot be reached
    /// from the start.
    pub fn solve(&mut self, graph: &Graph<T>) -> Result<SearchOutcome<T>, SolveError> {
        self.config.validate()?;
        let distances = DistanceTable::new(graph)?;
        info!(graph = %graph, distances = %distances, config = %self.config, "solving");

        let outcome = self
            .scheduler
            .search(graph, &distances, &self.config, &mut self.monitor)?;

        if !outcome.is_exact() {
            info!(
                value = %outcome.value(),
                reason = %outcome.termination_reason(),
                "search was truncated; the value is a lower bound on the optimum"
            );
        }
        Ok(outcome)
    }

    /// Builds the graph from `builder` and searches it.
    ///
    /// # Errors
    ///
    /// As `solve`, plus `SolveError::MalformedGraph` if the builder
    /// describes an inconsistent graph.
    pub fn solve_builder(
        &mut self,
        builder: &GraphBuilder<T>,
    ) -> Result<SearchOutcome<T>, SolveError> {
        self.config.validate()?;
        let graph = builder.build()?;
        self.solve(&graph)
    }

    /// Searches `graph` and returns only the maximum total value.
    ///
    /// # Errors
    ///
    /// As `solve`.
    #[inline]
    pub fn max_value(&mut self, graph: &Graph<T>) -> Result<T, SolveError> {
        self.solve(graph).map(|outcome| outcome.value())
    }
}

impl<'a, T> std::fmt::Debug for Solver<'a, T>
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("config", &self.config)
            .field("monitor", &self.monitor)
            .finish()
    }
}

impl<'a, T> std::fmt::Display for Solver<'a, T>
where
    T: FlowNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solver({}, monitors: {})",
            self.config,
            self.monitor.len()
        )
    }
}

/// Builder for `Solver`.
///
/// Starts from `SearchConfig::default()`: one agent, a budget of 30 ticks,
/// bound pruning on, no truncation, sequential expansion.
pub struct SolverBuilder<'a, T>
where
    T: FlowNumeric,
{
    config: SearchConfig,
    monitor: CompositeMonitor<'a, T>,
    frontier_capacity: usize,
}

impl<'a, T> Default for SolverBuilder<'a, T>
where
    T: FlowNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SolverBuilder<'a, T>
where
    T: FlowNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
            monitor: CompositeMonitor::new(),
            frontier_capacity: 0,
        }
    }

    /// Replaces the whole search configuration.
    #[inline]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn with_agents(mut self, num_agents: usize) -> Self {
        self.config = self.config.with_agents(num_agents);
        self
    }

    #[inline]
    pub fn with_budget(mut self, budget: Tick) -> Self {
        self.config = self.config.with_budget(budget);
        self
    }

    #[inline]
    pub fn with_pruning(mut self, pruning: PruningPolicy) -> Self {
        self.config = self.config.with_pruning(pruning);
        self
    }

    #[inline]
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.config = self.config.with_bound_pruning(enabled);
        self
    }

    #[inline]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.config = self.config.with_parallel(enabled);
        self
    }

    /// Preallocates room for `capacity` frontier states.
    #[inline]
    pub fn with_frontier_capacity(mut self, capacity: usize) -> Self {
        self.frontier_capacity = capacity;
        self
    }

    /// Adds a `LogMonitor` writing a progress line at most every `interval`.
    #[inline]
    pub fn with_logging(mut self, interval: Duration) -> Self {
        self.monitor.add_monitor(LogMonitor::<T>::new(interval));
        self
    }

    #[inline]
    pub fn add_monitor<M>(mut self, monitor: M) -> Self
    where
        M: FrontierMonitor<T> + 'a,
    {
        self.monitor.add_monitor(monitor);
        self
    }

    /// Builds the solver. The configuration is validated on every solve.
    #[inline]
    pub fn build(self) -> Solver<'a, T> {
        Solver {
            config: self.config,
            monitor: self.monitor,
            scheduler: FrontierScheduler::preallocated(self.frontier_capacity),
        }
    }
}
