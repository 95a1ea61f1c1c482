//! Benchmark suite for the substrate scheduler
//!
//! Gantree: L5_Benchmark → BenchSuite
//!
//! Runs the timing matrix (size × graph family × strategy × pipeline variant)
//! and collects one `BenchmarkResult` per case.

use crate::generators::{GraphGenerator, GraphKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use substrate_core::bench::{DEFAULT_SEED, PRE_MAPPING_SUFFIX, TIMING_PREFIX};
use substrate_core::{ResourceGraph, SubstrateResult};
use substrate_engine::{SchedulerConfig, SubstrateScheduler};
use substrate_schedule::{Schedule, Strategy};

/// One cell of the timing matrix
/// Gantree: BenchCase // 벤치마크 케이스
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchCase {
    /// Node count handed to the generator
    pub n: usize,

    /// Graph family
    pub kind: GraphKind,

    /// Scheduling strategy
    pub strategy: Strategy,

    /// Run the pre-mapping stage first
    pub pre_mapping: bool,
}

impl BenchCase {
    /// Create a plain (unmapped) case
    pub fn new(n: usize, kind: GraphKind, strategy: Strategy) -> Self {
        Self {
            n,
            kind,
            strategy,
            pre_mapping: false,
        }
    }

    /// Enable or disable pre-mapping
    pub fn with_pre_mapping(mut self, enabled: bool) -> Self {
        self.pre_mapping = enabled;
        self
    }

    /// `test_substrate_scheduler_timing[<N>-<kind>-<strategy>]`, with the
    /// pre-mapping suffix on the prefix when enabled
    pub fn name(&self) -> String {
        let suffix = if self.pre_mapping { PRE_MAPPING_SUFFIX } else { "" };
        format!(
            "{}{}[{}-{}-{}]",
            TIMING_PREFIX, suffix, self.n, self.kind, self.strategy
        )
    }

    /// Every case for `sizes`: family, then strategy, then plain before mapped
    pub fn matrix(sizes: &[usize]) -> Vec<BenchCase> {
        let mut cases = Vec::new();
        for &n in sizes {
            for kind in GraphKind::matrix() {
                for strategy in Strategy::ALL {
                    for pre_mapping in [false, true] {
                        cases.push(BenchCase::new(n, kind, strategy).with_pre_mapping(pre_mapping));
                    }
                }
            }
        }
        cases
    }
}

/// Single benchmark result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name
    pub name: String,

    /// Case that produced this result
    pub case: BenchCase,

    /// Nodes in the generated graph
    pub num_nodes: usize,

    /// Edges in the generated graph
    pub num_edges: usize,

    /// Rounds used
    pub rounds: usize,

    /// Degree lower bound
    pub lower_bound: usize,

    /// Rounds above the lower bound
    pub optimality_gap: usize,

    /// Improvement iterations spent
    pub iterations: usize,

    /// Improvement budget exhausted
    pub budget_exceeded: bool,

    /// Scheduling time (microseconds)
    pub time_us: u64,
}

impl BenchmarkResult {
    /// Create from a finished schedule
    pub fn from_schedule(
        case: BenchCase,
        graph: &ResourceGraph,
        schedule: &Schedule,
        time_us: u64,
    ) -> Self {
        let stats = schedule.stats();
        Self {
            name: case.name(),
            case,
            num_nodes: graph.num_nodes(),
            num_edges: graph.num_edges(),
            rounds: schedule.num_rounds(),
            lower_bound: stats.lower_bound,
            optimality_gap: schedule.optimality_gap(),
            iterations: stats.iterations,
            budget_exceeded: stats.budget_exceeded,
            time_us,
        }
    }

    /// Scheduling time in milliseconds
    pub fn time_ms(&self) -> f64 {
        self.time_us as f64 / 1000.0
    }
}

/// Benchmark suite
/// Gantree: BenchSuite // 벤치마크 스위트
pub struct BenchSuite {
    /// Seed for the random families
    seed: u64,

    /// Base configuration; strategy and pre-mapping come from each case
    config: SchedulerConfig,

    /// Results
    results: Vec<BenchmarkResult>,
}

impl BenchSuite {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create new benchmark suite
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create with seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            config: SchedulerConfig::benchmark(),
            results: Vec::new(),
        }
    }

    /// Replace base configuration
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Base configuration
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ========================================================================
    // Individual Benchmarks
    // ========================================================================

    /// Generate the case's graph, schedule it and record the timing
    pub fn bench_case(&mut self, case: BenchCase) -> SubstrateResult<BenchmarkResult> {
        log::info!("Running benchmark: {}", case.name());

        let generator = GraphGenerator::with_seed(self.seed);
        let graph = case.kind.build(&generator, case.n)?;

        let config = self
            .config
            .clone()
            .with_strategy(case.strategy)
            .with_pre_mapping(case.pre_mapping);
        let scheduler = SubstrateScheduler::new(config);

        let start = Instant::now();
        let schedule = scheduler.run(&graph)?;
        let time_us = start.elapsed().as_micros() as u64;

        let result = BenchmarkResult::from_schedule(case, &graph, &schedule, time_us);
        log::debug!(
            "{}: {} rounds (lower bound {}) in {} us",
            result.name,
            result.rounds,
            result.lower_bound,
            result.time_us
        );

        self.results.push(result.clone());
        Ok(result)
    }

    // ========================================================================
    // Benchmark Suites
    // ========================================================================

    /// Run every case of the matrix for `sizes`
    pub fn run_matrix(&mut self, sizes: &[usize]) -> SubstrateResult<Vec<BenchmarkResult>> {
        log::info!("=== Timing Matrix ({:?}) ===", sizes);

        BenchCase::matrix(sizes)
            .into_iter()
            .map(|case| self.bench_case(case))
            .collect()
    }

    /// Run the full matrix over the standard sizes
    pub fn run_all(&mut self) -> SubstrateResult<Vec<BenchmarkResult>> {
        self.run_matrix(&substrate_core::bench::SIZES)
    }

    /// Run quick benchmark (smallest size only)
    pub fn run_quick(&mut self) -> SubstrateResult<Vec<BenchmarkResult>> {
        self.run_matrix(&[10])
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Get all results
    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Clear results
    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Get statistics
    pub fn statistics(&self) -> BenchmarkStatistics {
        BenchmarkStatistics::from_results(&self.results)
    }

    /// Write all results as pretty JSON
    pub fn save_json(&self, path: impl AsRef<Path>) -> SubstrateResult<()> {
        fs::write(path, serde_json::to_string_pretty(&self.results)?)?;
        Ok(())
    }
}

impl Default for BenchSuite {
    fn default() -> Self {
        Self::new()
    }
}

/// Benchmark statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkStatistics {
    /// Number of benchmarks
    pub count: usize,

    /// Cases meeting the degree lower bound
    pub optimal_count: usize,

    /// Average rounds above the lower bound
    pub avg_gap: f64,

    /// Largest gap seen
    pub max_gap: usize,

    /// Average scheduling time (ms)
    pub avg_time_ms: f64,

    /// Slowest case (ms)
    pub max_time_ms: f64,

    /// Total scheduling time (ms)
    pub total_time_ms: f64,

    /// Share of cases that exhausted the improvement budget
    pub budget_exceeded_rate: f64,
}

impl BenchmarkStatistics {
    /// Compute statistics from results
    pub fn from_results(results: &[BenchmarkResult]) -> Self {
        if results.is_empty() {
            return Self {
                count: 0,
                optimal_count: 0,
                avg_gap: 0.0,
                max_gap: 0,
                avg_time_ms: 0.0,
                max_time_ms: 0.0,
                total_time_ms: 0.0,
                budget_exceeded_rate: 0.0,
            };
        }

        let count = results.len();
        let times: Vec<f64> = results.iter().map(BenchmarkResult::time_ms).collect();
        let total_time_ms: f64 = times.iter().sum();
        let exceeded = results.iter().filter(|r| r.budget_exceeded).count();

        Self {
            count,
            optimal_count: results.iter().filter(|r| r.optimality_gap == 0).count(),
            avg_gap: results.iter().map(|r| r.optimality_gap).sum::<usize>() as f64 / count as f64,
            max_gap: results.iter().map(|r| r.optimality_gap).max().unwrap_or(0),
            avg_time_ms: total_time_ms / count as f64,
            max_time_ms: times.iter().cloned().fold(0.0, f64::max),
            total_time_ms,
            budget_exceeded_rate: exceeded as f64 / count as f64,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
