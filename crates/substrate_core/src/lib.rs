//! # Substrate Core
//!
//! Foundation types and the resource graph model for the substrate scheduler.
//!
//! ## Gantree Architecture
//!
//! ```text
//! substrate_core // L0+L1: Foundation + Graph (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // NodeId, Node, Edge, Coordinate (완료)
//!         Constants // 스케줄링/매핑/벤치 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Graph // 자원 그래프 (완료)
//!         ResourceGraph // CSR 인접 배열 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use substrate_core::prelude::*;
//!
//! let graph = ResourceGraph::new(vec![0, 1, 2, 3], vec![(0, 1), (1, 2), (2, 3)]).unwrap();
//!
//! assert_eq!(graph.num_edges(), 3);
//! assert_eq!(graph.max_degree(), 2);
//! assert_eq!(graph.neighbors(1), vec![0, 2]);
//! ```
//!
//! ## Structural Errors
//!
//! ```rust
//! use substrate_core::prelude::*;
//!
//! let err = ResourceGraph::new(vec![0, 1], vec![(0, 5)]).unwrap_err();
//! assert!(matches!(err, SubstrateError::UnknownNode { node: 5, .. }));
//!
//! let err = ResourceGraph::new(vec![0, 1], vec![(1, 1)]).unwrap_err();
//! assert!(err.is_structural());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Resource graph (Gantree: L1_Graph → ResourceGraph)
pub mod graph;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{bench, mapping, scheduling};
pub use error::{SubstrateError, SubstrateResult};
pub use graph::ResourceGraph;
pub use types::{Coordinate, Edge, EdgeIndex, Node, NodeId, RoundIndex};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use substrate_core::prelude::*;
    //! ```

    pub use crate::constants::{bench, mapping, scheduling};
    pub use crate::error::{SubstrateError, SubstrateResult};
    pub use crate::graph::ResourceGraph;
    pub use crate::types::{Coordinate, Edge, EdgeIndex, Node, NodeId, RoundIndex};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_star_graph_hub() {
        let graph = ResourceGraph::new((0..10).collect(), (1..10).map(|i| (0, i)).collect()).unwrap();

        assert_eq!(graph.num_edges(), 9);
        assert_eq!(graph.max_degree(), 9);
        assert_eq!(graph.degree(0), 9);
        assert_eq!(scheduling::round_bound(graph.max_degree()), 10);
    }

    #[test]
    fn test_complete_graph() {
        let n = 10;
        let edges = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        let graph = ResourceGraph::new((0..n).collect(), edges).unwrap();

        assert_eq!(graph.num_edges(), 45);
        assert_eq!(graph.max_degree(), 9);
        for i in 0..n {
            for j in 0..n {
                assert_eq!(graph.has_edge(i, j), i != j);
            }
        }
    }

    #[test]
    fn test_structural_errors_fail_fast() {
        let unknown = ResourceGraph::new(vec![0, 1, 2], vec![(0, 1), (2, 3)]).unwrap_err();
        assert!(unknown.is_structural());
        assert!(!unknown.is_recoverable());

        let self_loop = ResourceGraph::from_edges(vec![(0, 1), (2, 2)]).unwrap_err();
        assert!(matches!(self_loop, SubstrateError::InvalidEdge { .. }));
    }

    #[test]
    fn test_edge_weights_kept() {
        let graph =
            ResourceGraph::with_weighted_edges(vec![0, 1, 2], vec![(0, 1, 5), (1, 0, 9), (1, 2, 2)])
                .unwrap();

        assert_eq!(graph.num_edges(), 2);
        // first occurrence wins
        assert_eq!(graph.edges()[0].weight, 5);
        assert_eq!(graph.edges()[1].weight, 2);
    }
}
