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

//! Errors raised while building a graph or its distance table.
//!
//! Both are input-validation failures: they are detected before any search
//! state exists and abort the run.

use crate::index::NodeIndex;
use thiserror::Error;

/// The graph description handed to `GraphBuilder::build` is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGraphError {
    /// An adjacency entry names a node that was never added.
    #[error("node '{node}' lists unknown neighbor '{neighbor}'")]
    UnknownNeighbor { node: String, neighbor: String },
    /// No start node was designated.
    #[error("no start node was designated")]
    MissingStart,
    /// The designated start label is not a node of the graph.
    #[error("start node '{0}' is not part of the graph")]
    UnknownStart(String),
    /// Two nodes share the same label.
    #[error("node '{0}' is defined more than once")]
    DuplicateNode(String),
}

/// A node with a positive value-rate cannot be reached from the start node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("node '{label}' ({node}) has a positive rate but cannot be reached from start node '{start}'")]
pub struct UnreachableNodeError {
    /// The unreachable node.
    pub node: NodeIndex,
    /// Its label.
    pub label: String,
    /// Label of the start node the traversal began at.
    pub start: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_graph_messages_name_the_offender() {
        let err = MalformedGraphError::UnknownNeighbor {
            node: "AA".to_string(),
            neighbor: "ZZ".to_string(),
        };
        assert_eq!(err.to_string(), "node 'AA' lists unknown neighbor 'ZZ'");
        assert_eq!(
            MalformedGraphError::UnknownStart("QQ".to_string()).to_string(),
            "start node 'QQ' is not part of the graph"
        );
        assert_eq!(
            MalformedGraphError::DuplicateNode("BB".to_string()).to_string(),
            "node 'BB' is defined more than once"
        );
    }

    #[test]
    fn test_unreachable_message_contains_both_labels() {
        let err = UnreachableNodeError {
            node: NodeIndex::new(3),
            label: "JJ".to_string(),
            start: "AA".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'JJ'"));
        assert!(message.contains("'AA'"));
        assert!(message.contains("NodeIndex(3)"));
    }
}
