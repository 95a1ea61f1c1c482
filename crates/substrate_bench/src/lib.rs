//! # Substrate Bench
//!
//! Graph families and timing matrix for the substrate scheduler.
//!
//! ## Gantree Architecture
//!
//! ```text
//! substrate_bench // L5: Benchmark (완료)
//!     GraphGenerator // 그래프 생성기 (완료)
//!         path, cycle, complete, star, wheel, barbell, grid, erdos_renyi
//!     GraphKind // 그래프 종류 (완료)
//!     BenchSuite // 벤치마크 스위트 (완료)
//!         BenchCase - N × kind × strategy × pre_mapping
//!         run_matrix(), run_quick(), statistics()
//!     Reporter // 결과 리포팅 (완료)
//!         Markdown, JSON, CSV, Text
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use substrate_bench::prelude::*;
//!
//! let mut suite = BenchSuite::with_seed(42);
//! let results = suite.run_quick().unwrap();
//!
//! let report = Reporter::to_markdown(&results);
//! assert!(report.contains("star_graph"));
//! ```
//!
//! ## Graph Generation
//!
//! ```rust
//! use substrate_bench::prelude::*;
//!
//! let gen = GraphGenerator::with_seed(42);
//!
//! let star = gen.star(10).unwrap();
//! let barbell = gen.barbell(25, 50).unwrap();
//! let sparse = gen.erdos_renyi(100, 0.01).unwrap();
//!
//! assert_eq!(star.max_degree(), 9);
//! assert_eq!(barbell.num_nodes(), 100);
//! assert_eq!(sparse.num_nodes(), 100);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Graph generators (Gantree: L5_Benchmark → Generators)
pub mod generators;

/// Benchmark suite (Gantree: L5_Benchmark → BenchSuite)
pub mod suite;

/// Reporting (Gantree: L5_Benchmark → Reporter)
pub mod reporter;

// ============================================================================
// Re-exports
// ============================================================================

pub use generators::{GraphGenerator, GraphKind};
pub use reporter::{ReportFormat, Reporter};
pub use suite::{BenchCase, BenchSuite, BenchmarkResult, BenchmarkStatistics};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use substrate_bench::prelude::*;
    //! ```

    pub use crate::generators::{GraphGenerator, GraphKind};
    pub use crate::reporter::{ReportFormat, Reporter};
    pub use crate::suite::{BenchCase, BenchSuite, BenchmarkResult, BenchmarkStatistics};
}

// ============================================================================
// Integration Tests
// ============================================================================
