//! # Substrate Mapping
//!
//! Optional pre-mapping stage: relabel the resource graph so the greedy
//! scheduler visits operations in a better order.
//!
//! ## Gantree Architecture
//!
//! ```text
//! substrate_mapping // L3: Pre-Mapping (완료)
//!     NodeMapping // 원래 ID ↔ 새 ID 전단사 (완료)
//!     MappingCandidate // 항등/차수/너비우선 후보 (완료)
//!     PreMappingOptimizer // 후보 평가 + 항등 폴백 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use substrate_core::ResourceGraph;
//! use substrate_mapping::prelude::*;
//! use substrate_schedule::{EdgeOrder, Scheduler};
//!
//! let graph = ResourceGraph::new((0..5).collect(), vec![(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
//!
//! let result = PreMappingOptimizer::default()
//!     .optimize(&graph, EdgeOrder::Insertion)
//!     .unwrap();
//!
//! let schedule = Scheduler::compute_fast(&result.graph).unwrap();
//! let restored = result.mapping.unmap_schedule(&schedule).unwrap();
//! assert!(restored.verify(&graph).is_ok());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Relabeling table (Gantree: L3_Mapping → NodeMapping)
pub mod mapping;

/// Candidate search (Gantree: L3_Mapping → PreMappingOptimizer)
pub mod optimizer;

// ============================================================================
// Re-exports
// ============================================================================

pub use mapping::NodeMapping;
pub use optimizer::{MappingCandidate, MappingConfig, MappingResult, PreMappingOptimizer};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use substrate_mapping::prelude::*;
    //! ```

    pub use crate::mapping::NodeMapping;
    pub use crate::optimizer::{MappingCandidate, MappingConfig, MappingResult, PreMappingOptimizer};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use proptest::strategy::Strategy as _;
    use substrate_core::ResourceGraph;
    use substrate_schedule::{EdgeOrder, Scheduler};

    #[test]
    fn test_barbell_roundtrip() {
        // two triangles joined by a bridge
        let g = ResourceGraph::new(
            (0..6).collect(),
            vec![(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)],
        )
        .unwrap();

        let result = PreMappingOptimizer::default()
            .optimize(&g, EdgeOrder::DegreeDescending)
            .unwrap();
        let schedule = Scheduler::compute_optimized(&result.graph).unwrap();
        let restored = result.mapping.unmap_schedule(&schedule).unwrap();

        assert!(restored.verify(&g).is_ok());
        assert_eq!(restored.num_rounds(), schedule.num_rounds());
    }

    #[test]
    fn test_sparse_ids() {
        let g = ResourceGraph::new(vec![10, 20, 30, 40], vec![(10, 40), (20, 40), (30, 40)]).unwrap();
        let mapping = MappingCandidate::DegreeDescending.mapping(&g).unwrap();

        // the hub takes the smallest id
        assert_eq!(mapping.map(40), Some(10));
        let mapped = mapping.apply(&g).unwrap();
        assert_eq!(mapped.degree(10), 3);
    }

    fn arb_graph() -> impl proptest::strategy::Strategy<Value = ResourceGraph> {
        (1usize..20).prop_flat_map(|n| {
            proptest::collection::vec((0..n, 0..n), 0..60).prop_map(move |pairs| {
                let edges = pairs.into_iter().filter(|(a, b)| a != b).collect();
                ResourceGraph::new((0..n).collect(), edges).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_mapping_preserves_topology(graph in arb_graph()) {
            for candidate in MappingCandidate::ALL {
                let mapping = candidate.mapping(&graph).unwrap();
                let mapped = mapping.apply(&graph).unwrap();

                prop_assert_eq!(mapped.num_nodes(), graph.num_nodes());
                prop_assert_eq!(mapped.num_edges(), graph.num_edges());
                for edge in graph.edges() {
                    let (u, v) = edge.endpoints();
                    let (a, b) = (mapping.map(u).unwrap(), mapping.map(v).unwrap());
                    prop_assert!(mapped.has_edge(a, b));
                    prop_assert_eq!(mapping.unmap(a), Some(u));
                }
            }
        }

        #[test]
        fn prop_optimizer_never_worse_than_identity(graph in arb_graph()) {
            let result = PreMappingOptimizer::default()
                .optimize(&graph, EdgeOrder::Insertion)
                .unwrap();
            prop_assert!(result.mapped_rounds <= result.baseline_rounds);

            let schedule = Scheduler::compute_fast(&result.graph).unwrap();
            let restored = result.mapping.unmap_schedule(&schedule).unwrap();
            prop_assert!(restored.verify(&graph).is_ok());
        }
    }
}
