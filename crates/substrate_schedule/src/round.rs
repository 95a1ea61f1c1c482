//! Round representation
//!
//! Gantree: L2_Scheduling → Round
//!
//! A round is a batch of operations executed in the same substrate time step.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use substrate_core::{Edge, NodeId, RoundIndex};

/// Operations executed simultaneously
/// Gantree: Round // 라운드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Position in the schedule
    /// Gantree: index: RoundIndex // 라운드 번호
    pub index: RoundIndex,

    /// Operations in this round
    /// Gantree: edges: Vec<Edge> // 연산 목록
    pub edges: Vec<Edge>,
}

impl Round {
    /// Create a new round
    pub fn new(index: RoundIndex, edges: Vec<Edge>) -> Self {
        Self { index, edges }
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when the round carries no operation
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Check if the round contains `edge` (weight ignored)
    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|e| e.endpoints() == edge.endpoints())
    }

    /// Check if any operation in the round touches `node`
    /// Gantree: touches(node) -> bool // 노드 사용 여부
    pub fn touches(&self, node: NodeId) -> bool {
        self.edges.iter().any(|e| e.touches(node))
    }

    /// Nodes busy in this round, sorted
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.edges.iter().flat_map(|e| [e.u(), e.v()]).collect();
        nodes.sort_unstable();
        nodes
    }

    /// First node shared by two operations, if any
    pub fn find_conflict(&self) -> Option<NodeId> {
        let mut busy = HashSet::with_capacity(self.edges.len() * 2);
        for edge in &self.edges {
            for node in [edge.u(), edge.v()] {
                if !busy.insert(node) {
                    return Some(node);
                }
            }
        }
        None
    }

    /// Check the one-operation-per-node constraint
    pub fn is_conflict_free(&self) -> bool {
        self.find_conflict().is_none()
    }

    /// Sum of operation weights
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|e| e.weight as u64).sum()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[round {}]", self.index)?;
        for edge in &self.edges {
            write!(f, " {}", edge)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: NodeId, b: NodeId) -> Edge {
        Edge::new(a, b).unwrap()
    }

    #[test]
    fn test_round_new() {
        let round = Round::new(2, vec![edge(0, 1), edge(2, 3)]);
        assert_eq!(round.index, 2);
        assert_eq!(round.len(), 2);
        assert!(!round.is_empty());
    }

    #[test]
    fn test_conflict_detection() {
        let ok = Round::new(0, vec![edge(0, 1), edge(2, 3)]);
        let bad = Round::new(0, vec![edge(0, 1), edge(1, 2)]);

        assert!(ok.is_conflict_free());
        assert_eq!(bad.find_conflict(), Some(1));
    }

    #[test]
    fn test_touches_and_nodes() {
        let round = Round::new(0, vec![edge(4, 1), edge(2, 3)]);

        assert!(round.touches(4));
        assert!(!round.touches(0));
        assert_eq!(round.nodes(), vec![1, 2, 3, 4]);
        assert!(round.contains(&edge(1, 4)));
    }

    #[test]
    fn test_total_weight() {
        let round = Round::new(
            0,
            vec![Edge::weighted(0, 1, 3).unwrap(), Edge::weighted(2, 3, 4).unwrap()],
        );
        assert_eq!(round.total_weight(), 7);
    }

    #[test]
    fn test_display() {
        let round = Round::new(1, vec![edge(0, 1)]);
        assert_eq!(round.to_string(), "[round 1] (0, 1)");
    }
}
