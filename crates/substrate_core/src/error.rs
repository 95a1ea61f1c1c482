//! Error types for the substrate scheduler
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum shared by every crate in the workspace.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use crate::types::{NodeId, RoundIndex};
use thiserror::Error;

/// Main error type for the substrate scheduler
/// Gantree: SubstrateError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubstrateError {
    // ========================================================================
    // Structural Errors (graph construction)
    // ========================================================================
    /// Edge references a node that is not in the node set
    /// Gantree: UnknownNode{{node,u,v}} // 미등록 노드
    #[error("Edge ({u}, {v}) references unknown node {node}")]
    UnknownNode { node: NodeId, u: NodeId, v: NodeId },

    /// Self-loop or otherwise malformed pair
    /// Gantree: InvalidEdge{{u,v}} // 잘못된 간선
    #[error("Invalid edge ({u}, {v}): {reason}")]
    InvalidEdge {
        u: NodeId,
        v: NodeId,
        reason: String,
    },

    // ========================================================================
    // Budget
    // ========================================================================
    /// Optimized strategy stopped its improvement search at the ceiling.
    /// The call still succeeds with the best schedule found so far.
    /// Gantree: BudgetExceeded{{iters}} // 예산 초과
    #[error("Improvement budget exceeded after {iterations} iterations ({rounds} rounds kept)")]
    BudgetExceeded { iterations: usize, rounds: usize },

    // ========================================================================
    // Schedule Verification
    // ========================================================================
    /// Two operations in one round share a node
    #[error("Round {round}: node {node} used by more than one operation")]
    ConflictInRound { round: RoundIndex, node: NodeId },

    /// Required operation never scheduled
    #[error("Operation ({0}, {1}) is missing from the schedule")]
    MissingOperation(NodeId, NodeId),

    /// Operation scheduled more than once
    #[error("Operation ({0}, {1}) is scheduled more than once")]
    DuplicateOperation(NodeId, NodeId),

    /// Scheduled operation that the graph does not require
    #[error("Operation ({0}, {1}) is not an edge of the resource graph")]
    UnexpectedOperation(NodeId, NodeId),

    /// Round numbering has a gap or is out of order
    #[error("Round at position {position} carries index {index}")]
    NonContiguousRounds { position: usize, index: RoundIndex },

    // ========================================================================
    // Configuration / Pipeline
    // ========================================================================
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pipeline stage called out of order
    #[error("Pipeline stage '{requested}' not allowed after '{current}'")]
    InvalidStage { current: String, requested: String },

    /// Mapping table does not cover a node
    #[error("Node {0} is not covered by the mapping")]
    UnmappedNode(NodeId),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for substrate operations
/// Gantree: SubstrateResult<T> // type alias
pub type SubstrateResult<T> = Result<T, SubstrateError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for SubstrateError {
    fn from(err: serde_json::Error) -> Self {
        SubstrateError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for SubstrateError {
    fn from(err: std::io::Error) -> Self {
        SubstrateError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl SubstrateError {
    /// Self-loop error for the pair `(u, u)`
    pub fn self_loop(u: NodeId) -> Self {
        SubstrateError::InvalidEdge {
            u,
            v: u,
            reason: "self-loops are not schedulable operations".to_string(),
        }
    }

    /// Check if error is recoverable (a result is still available)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SubstrateError::BudgetExceeded { .. })
    }

    /// Check if error is a structural graph error
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SubstrateError::UnknownNode { .. } | SubstrateError::InvalidEdge { .. }
        )
    }

    /// Check if error comes from schedule verification
    pub fn is_verification_error(&self) -> bool {
        matches!(
            self,
            SubstrateError::ConflictInRound { .. }
                | SubstrateError::MissingOperation(..)
                | SubstrateError::DuplicateOperation(..)
                | SubstrateError::UnexpectedOperation(..)
                | SubstrateError::NonContiguousRounds { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SubstrateError::UnknownNode { node: 42, u: 1, v: 42 };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("unknown node"));
    }

    #[test]
    fn test_self_loop() {
        let err = SubstrateError::self_loop(3);
        assert!(matches!(err, SubstrateError::InvalidEdge { u: 3, v: 3, .. }));
        assert!(err.to_string().contains("self-loop"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(SubstrateError::BudgetExceeded {
            iterations: 100,
            rounds: 4
        }
        .is_recoverable());
        assert!(!SubstrateError::self_loop(0).is_recoverable());
    }

    #[test]
    fn test_is_structural() {
        assert!(SubstrateError::UnknownNode { node: 9, u: 0, v: 9 }.is_structural());
        assert!(SubstrateError::self_loop(1).is_structural());
        assert!(!SubstrateError::MissingOperation(0, 1).is_structural());
        assert!(SubstrateError::MissingOperation(0, 1).is_verification_error());
    }
}
