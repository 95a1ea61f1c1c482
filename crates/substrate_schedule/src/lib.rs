//! # Substrate Schedule
//!
//! Conflict-free round scheduling over a resource graph.
//!
//! ## Gantree Architecture
//!
//! ```text
//! substrate_schedule // L2: Scheduling (완료)
//!     Round // 동시 실행 연산 묶음 (완료)
//!     Schedule // 라운드 목록 + 검증 + 통계 (완료)
//!     RoundTable // 노드별 희소 점유 테이블, 비징 복구 (완료)
//!     FastStrategy // 탐욕 리스트 스케줄 (완료)
//!     OptimizedStrategy // 재시작 + 켐프 체인 국소 탐색 (완료)
//!     Scheduler // 전략 분기 + 분석 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use substrate_core::ResourceGraph;
//! use substrate_schedule::prelude::*;
//!
//! let graph = ResourceGraph::new((0..4).collect(), vec![(0, 1), (1, 2), (2, 3)]).unwrap();
//! let schedule = Scheduler::compute_fast(&graph).unwrap();
//!
//! assert_eq!(schedule.num_rounds(), 2);
//! assert!(schedule.verify(&graph).is_ok());
//! println!("{}", schedule);
//! ```
//!
//! ## Optimized Strategy
//!
//! ```rust
//! use substrate_core::ResourceGraph;
//! use substrate_schedule::prelude::*;
//!
//! let edges = (0..6).map(|i| (i, (i + 1) % 6)).collect();
//! let graph = ResourceGraph::new((0..6).collect(), edges).unwrap();
//!
//! let options = ScheduleOptions::default()
//!     .with_optimized(OptimizedConfig::quick());
//! let schedule = Scheduler::compute(&graph, Strategy::Optimized, &options).unwrap();
//!
//! assert_eq!(schedule.num_rounds(), 2);
//! assert!(schedule.is_optimal());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Round of simultaneous operations (Gantree: L2_Scheduling → Round)
pub mod round;

/// Round schedule (Gantree: L2_Scheduling → Schedule)
pub mod schedule;

// Occupancy bookkeeping (Gantree: L2_Scheduling → RoundTable)
mod table;

/// Greedy strategy (Gantree: L2_Scheduling → FastStrategy)
pub mod fast;

/// Improvement strategy (Gantree: L2_Scheduling → OptimizedStrategy)
pub mod optimized;

/// Strategy dispatch (Gantree: L2_Scheduling → Scheduler)
pub mod scheduler;

// ============================================================================
// Re-exports
// ============================================================================

pub use fast::{EdgeOrder, FastStrategy};
pub use optimized::{OptimizedConfig, OptimizedStrategy};
pub use round::Round;
pub use schedule::{Schedule, ScheduleStats};
pub use scheduler::{ScheduleOptions, Scheduler, Strategy};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use substrate_schedule::prelude::*;
    //! ```

    pub use crate::fast::{EdgeOrder, FastStrategy};
    pub use crate::optimized::{OptimizedConfig, OptimizedStrategy};
    pub use crate::round::Round;
    pub use crate::schedule::{Schedule, ScheduleStats};
    pub use crate::scheduler::{ScheduleOptions, Scheduler, Strategy};
}

// ============================================================================
// Integration Tests
// ============================================================================
