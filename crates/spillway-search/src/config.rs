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

//! Search configuration.
//!
//! `SearchConfig` bundles everything a run needs besides the graph: the
//! number of cooperating agents, the time budget, and the pruning setup.
//! It follows a builder style and is validated eagerly by the scheduler
//! before any state exists.
//!
//! # Defaults
//!
//! | Field | Default | Semantics |
//! | :--- | :--- | :--- |
//! | `num_agents` | `1` | A single agent. |
//! | `budget` | `30` | Thirty ticks. |
//! | `pruning` | `PruningPolicy::Disabled` | No heuristic truncation; the search is exact. |
//! | `bound_pruning` | `true` | Sound pruning against the incumbent. |
//! | `parallel` | `false` | Expand the frontier on the calling thread. |

use crate::{
    bound::Ranking,
    error::{InvalidBudgetError, InvalidPruningError, SearchError},
};
use spillway_model::time::Tick;

/// Heuristic truncation of the live frontier.
///
/// Truncation trades completeness for tractability: once it discards a
/// state the search is no longer guaranteed to find the optimum, and the
/// outcome reports this through its termination reason.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PruningPolicy {
    /// Never truncate. Combined with bound pruning the search stays exact.
    #[default]
    Disabled,
    /// When the frontier holds more than `threshold` states, keep only the
    /// best `keep_ratio` fraction of them according to `ranking`.
    Truncate {
        threshold: usize,
        keep_ratio: f64,
        ranking: Ranking,
    },
}

impl PruningPolicy {
    /// Frontier size above which the classic setup starts truncating.
    pub const DEFAULT_THRESHOLD: usize = 100;
    /// Fraction of the frontier the classic setup keeps.
    pub const DEFAULT_KEEP_RATIO: f64 = 0.95;

    /// Truncation with the given threshold and keep ratio, ranked by the
    /// optimistic projection.
    #[inline]
    pub fn truncate(threshold: usize, keep_ratio: f64) -> Self {
        Self::Truncate {
            threshold,
            keep_ratio,
            ranking: Ranking::default(),
        }
    }

    /// Drops the lowest 5% once the frontier exceeds 100 states.
    #[inline]
    pub fn classic() -> Self {
        Self::truncate(Self::DEFAULT_THRESHOLD, Self::DEFAULT_KEEP_RATIO)
    }

    /// Replaces the ranking of a truncating policy. No-op for `Disabled`.
    #[inline]
    pub fn with_ranking(self, ranking: Ranking) -> Self {
        match self {
            Self::Disabled => Self::Disabled,
            Self::Truncate {
                threshold,
                keep_ratio,
                ..
            } => Self::Truncate {
                threshold,
                keep_ratio,
                ranking,
            },
        }
    }

    /// Returns `true` if this policy can ever discard a state.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Truncate { .. })
    }

    /// Number of states kept from a frontier of `len` states.
    ///
    /// Always at least one for a non-empty frontier, never more than `len`.
    ///
    /// ```rust
    /// # use spillway_search::config::PruningPolicy;
    /// let policy = PruningPolicy::classic();
    /// assert_eq!(policy.retained(100), 100); // at the threshold: untouched
    /// assert_eq!(policy.retained(200), 190);
    /// assert_eq!(PruningPolicy::truncate(1, 0.01).retained(10), 1);
    /// assert_eq!(PruningPolicy::Disabled.retained(5_000), 5_000);
    /// ```
    pub fn retained(&self, len: usize) -> usize {
        match *self {
            Self::Disabled => len,
            Self::Truncate {
                threshold,
                keep_ratio,
                ..
            } => {
                if len <= threshold {
                    return len;
                }
                let kept = (len as f64 * keep_ratio).floor() as usize;
                kept.clamp(1, len)
            }
        }
    }

    /// Validates the truncation parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPruningError` if the keep ratio is not in `(0, 1]`
    /// or the threshold is zero.
    pub fn validate(&self) -> Result<(), InvalidPruningError> {
        match *self {
            Self::Disabled => Ok(()),
            Self::Truncate {
                threshold,
                keep_ratio,
                ..
            } => {
                if threshold == 0 {
                    return Err(InvalidPruningError::ZeroThreshold);
                }
                if !(keep_ratio > 0.0 && keep_ratio <= 1.0) {
                    return Err(InvalidPruningError::KeepRatio(keep_ratio));
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for PruningPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "Disabled"),
            Self::Truncate {
                threshold,
                keep_ratio,
                ranking,
            } => write!(
                f,
                "Truncate(threshold: {}, keep_ratio: {}, ranking: {})",
                threshold, keep_ratio, ranking
            ),
        }
    }
}

/// Parameters of one search run.
///
/// # Examples
///
/// ```rust
/// # use spillway_search::config::{PruningPolicy, SearchConfig};
/// let config = SearchConfig::new()
///     .with_agents(2)
///     .with_budget(26)
///     .with_pruning(PruningPolicy::classic());
/// assert_eq!(config.num_agents(), 2);
/// assert_eq!(config.budget(), 26);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    num_agents: usize,
    budget: Tick,
    pruning: PruningPolicy,
    bound_pruning: bool,
    parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_agents: 1,
            budget: 30,
            pruning: PruningPolicy::Disabled,
            bound_pruning: true,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_agents(mut self, num_agents: usize) -> Self {
        self.num_agents = num_agents;
        self
    }

    #[inline]
    pub fn with_budget(mut self, budget: Tick) -> Self {
        self.budget = budget;
        self
    }

    #[inline]
    pub fn with_pruning(mut self, pruning: PruningPolicy) -> Self {
        self.pruning = pruning;
        self
    }

    /// Enables or disables sound pruning against the incumbent.
    #[inline]
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.bound_pruning = enabled;
        self
    }

    /// Expands the frontier on the rayon thread pool when enabled.
    #[inline]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    #[inline]
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    #[inline]
    pub fn budget(&self) -> Tick {
        self.budget
    }

    #[inline]
    pub fn pruning(&self) -> PruningPolicy {
        self.pruning
    }

    #[inline]
    pub fn bound_pruning(&self) -> bool {
        self.bound_pruning
    }

    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Rejects configurations no search can run with.
    ///
    /// # Errors
    ///
    /// `InvalidBudgetError` for a zero budget or zero agents,
    /// `InvalidPruningError` for out-of-range truncation parameters.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.budget == 0 {
            return Err(InvalidBudgetError::ZeroBudget.into());
        }
        if self.num_agents == 0 {
            return Err(InvalidBudgetError::ZeroAgents.into());
        }
        self.pruning.validate()?;
        Ok(())
    }
}

impl std::fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchConfig(agents: {}, budget: {}, pruning: {}, bound_pruning: {}, parallel: {})",
            self.num_agents, self.budget, self.pruning, self.bound_pruning, self.parallel
        )
    }
}
