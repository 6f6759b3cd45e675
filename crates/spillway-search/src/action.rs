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

//! Legal actions of a single agent.

use crate::state::{Agent, SearchState};
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use spillway_core::num::FlowNumeric;
use spillway_model::{distance::DistanceTable, index::NodeIndex, time::Tick};

/// What one agent does during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentAction {
    /// The agent is busy and discharges one tick of its busy counter.
    Wait,
    /// The agent walks to `target` and activates it, spending `cost` ticks
    /// (travel distance plus one for the activation itself).
    MoveAndActivate { target: NodeIndex, cost: Tick },
    /// The agent is free but has nothing it could still activate in time.
    Idle,
}

impl AgentAction {
    /// Returns the activated node, if any.
    #[inline]
    pub fn target(&self) -> Option<NodeIndex> {
        match self {
            Self::MoveAndActivate { target, .. } => Some(*target),
            _ => None,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl std::fmt::Display for AgentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wait => write!(f, "Wait"),
            Self::MoveAndActivate { target, cost } => {
                write!(f, "MoveAndActivate({}, cost: {})", target, cost)
            }
            Self::Idle => write!(f, "Idle"),
        }
    }
}

/// The actions available to one agent, in enumeration order.
pub type ActionSet = SmallVec<[AgentAction; 8]>;

/// Enumerates the legal actions of `agent`.
///
/// - a busy agent can only `Wait`;
/// - a free agent gets one `MoveAndActivate` per candidate it can reach and
///   activate within `remaining` ticks, in ascending node order;
/// - a free agent with no such candidate gets a single `Idle`.
///
/// The result is never empty.
pub fn enumerate_actions(
    agent: &Agent,
    distances: &DistanceTable,
    remaining: Tick,
    candidates: &FixedBitSet,
) -> ActionSet {
    let mut actions = ActionSet::new();

    if !agent.is_free() {
        actions.push(AgentAction::Wait);
        return actions;
    }

    for target in candidates.ones().map(NodeIndex::new) {
        let Some(distance) = distances.get(agent.position(), target) else {
            continue;
        };
        let cost = distance.saturating_add(1);
        if cost <= remaining {
            actions.push(AgentAction::MoveAndActivate { target, cost });
        }
    }

    if actions.is_empty() {
        actions.push(AgentAction::Idle);
    }
    actions
}

/// Per-agent action sets of `state`, indexed by agent.
pub fn enumerate_joint_actions<T>(
    state: &SearchState<T>,
    distances: &DistanceTable,
) -> SmallVec<[ActionSet; 2]>
where
    T: FlowNumeric,
{
    state
        .agents()
        .iter()
        .map(|agent| enumerate_actions(agent, distances, state.remaining(), state.candidates()))
        .collect()
}

/// Returns `true` if no agent can do anything but idle.
#[inline]
pub fn is_stalled(action_sets: &[ActionSet]) -> bool {
    action_sets
        .iter()
        .all(|set| set.len() == 1 && set[0].is_idle())
}
