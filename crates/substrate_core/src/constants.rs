//! Constants for the substrate scheduler
//!
//! Gantree: L0_Foundation → Constants
//!
//! Scheduling defaults, pre-mapping effort budgets and the benchmark matrix.

// ============================================================================
// Graph Constants
// Gantree: graph // 그래프 상수
// ============================================================================

pub mod graph {
    //! Resource graph defaults

    /// Weight given to edges built without an explicit weight
    /// Gantree: DEFAULT_EDGE_WEIGHT: u32 = 1
    pub const DEFAULT_EDGE_WEIGHT: u32 = 1;
}

// ============================================================================
// Scheduling Constants
// Gantree: scheduling // 스케줄링 상수
// ============================================================================

pub mod scheduling {
    //! Strategy budgets

    /// Default iteration ceiling for the optimized strategy
    /// Gantree: DEFAULT_MAX_ITERATIONS: usize = 100_000
    pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

    /// Iteration ceiling used by the quick presets
    pub const QUICK_MAX_ITERATIONS: usize = 5_000;

    /// Upper bound on Kempe-chain colour pairs tried per edge move
    pub const MAX_KEMPE_PAIRS_PER_MOVE: usize = 16;

    /// Greedy list-scheduling round bound: `max_degree + 1`
    #[inline]
    pub const fn round_bound(max_degree: usize) -> usize {
        max_degree + 1
    }
}

// ============================================================================
// Mapping Constants
// Gantree: mapping // 사전 매핑 상수
// ============================================================================

pub mod mapping {
    //! Pre-mapping effort budget

    /// Maximum candidate orderings evaluated per call
    pub const DEFAULT_MAX_CANDIDATES: usize = 3;

    /// Graphs above this edge count are only given the identity mapping
    pub const DEFAULT_MAX_EDGES: usize = 1_000_000;
}

// ============================================================================
// Benchmark Constants
// Gantree: bench // 벤치마크 상수
// ============================================================================

pub mod bench {
    //! Benchmark parameter space

    /// Node counts exercised by the timing matrix
    pub const SIZES: [usize; 3] = [10, 100, 1000];

    /// Edge probabilities for Erdos-Renyi graphs
    pub const ER_PROBABILITIES: [f64; 2] = [0.01, 0.1];

    /// Fixed seed for random graph families
    pub const DEFAULT_SEED: u64 = 42;

    /// Name prefix of timing cases
    pub const TIMING_PREFIX: &str = "test_substrate_scheduler_timing";

    /// Suffix for cases run with pre-mapping
    pub const PRE_MAPPING_SUFFIX: &str = "_with_pre_mapping_optimizer";
}

// ============================================================================
// Tests
// ============================================================================
