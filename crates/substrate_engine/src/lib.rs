//! # Substrate Engine
//!
//! Configured entry point for the substrate scheduler.
//!
//! ## Gantree Architecture
//!
//! ```text
//! substrate_engine // L4: Integration (완료)
//!     SchedulerConfig // 통합 설정 (완료)
//!         strategy, edge_order, apply_pre_mapping
//!         max_iterations, time_limit_ms, mapping
//!         fast(), optimized(), benchmark(), load()/save()
//!     SubstrateScheduler // 통합 스케줄러 (완료)
//!         run() - 스케줄
//!         run_with_report() - 스케줄 + 요약
//!     Pipeline // 단계별 실행 (완료)
//!         pre_map() | skip_mapping() → schedule()
//!         run() - 전체 파이프라인
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use substrate_core::ResourceGraph;
//! use substrate_engine::prelude::*;
//!
//! let graph = ResourceGraph::new((0..10).collect(), (1..10).map(|i| (0, i)).collect()).unwrap();
//!
//! let rounds = schedule(&graph, Strategy::Optimized, true).unwrap();
//! assert_eq!(rounds.num_rounds(), 9);
//! ```
//!
//! ## Using Pipeline
//!
//! ```rust
//! use substrate_core::ResourceGraph;
//! use substrate_engine::prelude::*;
//!
//! let graph = ResourceGraph::new((0..4).collect(), vec![(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
//! let config = SchedulerConfig::optimized().with_max_iterations(1_000);
//!
//! let mut pipeline = Pipeline::new(&graph, config);
//! pipeline.pre_map().unwrap();
//! let schedule = pipeline.schedule().unwrap();
//!
//! assert_eq!(schedule.num_rounds(), 2);
//! assert_eq!(pipeline.stage(), PipelineStage::Scheduled);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L4_Integration → SchedulerConfig)
pub mod config;

/// Entry point (Gantree: L4_Integration → SubstrateScheduler)
pub mod scheduler;

/// Pipeline (Gantree: L4_Integration → Pipeline)
pub mod pipeline;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SchedulerConfig;
pub use pipeline::{Pipeline, PipelineStage, PipelineState};
pub use scheduler::{
    schedule, ExecutionMetrics, MappingSummary, ScheduleMetrics, ScheduleReport, SubstrateScheduler,
};
pub use substrate_schedule::{EdgeOrder, Schedule, Strategy};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use substrate_engine::prelude::*;
    //! ```

    pub use crate::config::SchedulerConfig;
    pub use crate::pipeline::{Pipeline, PipelineStage};
    pub use crate::scheduler::{schedule, ScheduleReport, SubstrateScheduler};
    pub use substrate_schedule::{EdgeOrder, Schedule, Strategy};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use substrate_core::{ResourceGraph, SubstrateError};

    fn complete(n: usize) -> ResourceGraph {
        let edges = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        ResourceGraph::new((0..n).collect(), edges).unwrap()
    }

    #[test]
    fn test_unknown_node_fails_before_scheduling() {
        let err = ResourceGraph::new(vec![0, 1, 2], vec![(0, 1), (1, 7)]).unwrap_err();
        assert!(matches!(err, SubstrateError::UnknownNode { node: 7, .. }));
    }

    #[test]
    fn test_star_10_all_variants() {
        let g = ResourceGraph::new((0..10).collect(), (1..10).map(|i| (0, i)).collect()).unwrap();
        for strategy in Strategy::ALL {
            for pre_map in [false, true] {
                assert_eq!(schedule(&g, strategy, pre_map).unwrap().num_rounds(), 9);
            }
        }
    }

    #[test]
    fn test_complete_10_all_variants() {
        let g = complete(10);
        let fast = schedule(&g, Strategy::Fast, false).unwrap();
        let opt = schedule(&g, Strategy::Optimized, false).unwrap();

        assert!(fast.num_rounds() <= 10);
        assert!(opt.num_rounds() <= fast.num_rounds());
        assert!(schedule(&g, Strategy::Optimized, true).unwrap().verify(&g).is_ok());
    }

    #[test]
    fn test_empty_graph() {
        let g = ResourceGraph::empty();
        for strategy in Strategy::ALL {
            for pre_map in [false, true] {
                assert!(schedule(&g, strategy, pre_map).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_config_file_drives_scheduler() {
        let config = SchedulerConfig::from_json(
            r#"{ "strategy": "optimized", "edge_order": "degree_descending", "apply_pre_mapping": true }"#,
        )
        .unwrap();
        let g = complete(6);
        let report = SubstrateScheduler::new(config).run_with_report(&g).unwrap();

        assert!(report.schedule.verify(&g).is_ok());
        assert!(report.mapping.is_some());
        assert_eq!(report.schedule.strategy(), Strategy::Optimized);
    }

    #[test]
    fn test_repeat_runs_identical() {
        let g = complete(9);
        let scheduler = SubstrateScheduler::new(SchedulerConfig::optimized().with_pre_mapping(true));
        assert_eq!(scheduler.run(&g).unwrap(), scheduler.run(&g).unwrap());
    }
}
