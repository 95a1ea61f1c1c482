//! Substrate scheduler entry point
//!
//! Gantree: L2_Scheduling → Scheduler
//!
//! Dispatches a resource graph to the fast or optimized strategy and offers
//! a few analysis helpers over the produced schedule.

use crate::fast::{EdgeOrder, FastStrategy};
use crate::optimized::{OptimizedConfig, OptimizedStrategy};
use crate::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use substrate_core::scheduling::round_bound;
use substrate_core::{NodeId, ResourceGraph, SubstrateError, SubstrateResult};

/// Scheduling strategy
/// Gantree: Strategy // 전략
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Single greedy pass, at most `max_degree + 1` rounds
    #[default]
    Fast,
    /// Greedy pass plus bounded improvement search
    Optimized,
}

impl Strategy {
    /// Both strategies, fast first
    pub const ALL: [Strategy; 2] = [Strategy::Fast, Strategy::Optimized];

    /// Short name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Fast => "fast",
            Strategy::Optimized => "optimized",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = SubstrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Strategy::Fast),
            "optimized" | "optimised" => Ok(Strategy::Optimized),
            other => Err(SubstrateError::InvalidConfig(format!(
                "unknown strategy '{}'",
                other
            ))),
        }
    }
}

/// Strategy options
/// Gantree: ScheduleOptions // 스케줄 옵션
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOptions {
    /// Edge visiting order of the greedy pass
    pub edge_order: EdgeOrder,

    /// Improvement search settings (optimized strategy only)
    pub optimized: OptimizedConfig,
}

impl ScheduleOptions {
    /// Builder: edge order
    pub fn with_edge_order(mut self, edge_order: EdgeOrder) -> Self {
        self.edge_order = edge_order;
        self
    }

    /// Builder: improvement search settings
    pub fn with_optimized(mut self, optimized: OptimizedConfig) -> Self {
        self.optimized = optimized;
        self
    }
}

/// Round scheduler
/// Gantree: Scheduler // 스케줄러
pub struct Scheduler;

impl Scheduler {
    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Schedule with the fast strategy and default options
    /// Gantree: compute_fast(graph) -> Result<Schedule> // 빠른 스케줄
    pub fn compute_fast(graph: &ResourceGraph) -> SubstrateResult<Schedule> {
        FastStrategy::schedule(graph, EdgeOrder::default())
    }

    /// Schedule with the optimized strategy and default options
    /// Gantree: compute_optimized(graph) -> Result<Schedule> // 최적 스케줄
    pub fn compute_optimized(graph: &ResourceGraph) -> SubstrateResult<Schedule> {
        OptimizedStrategy::schedule(graph, EdgeOrder::default(), &OptimizedConfig::default())
    }

    /// Schedule with an explicit strategy and options
    /// Gantree: compute(graph,strategy,options) -> Result<Schedule> // 스케줄
    pub fn compute(
        graph: &ResourceGraph,
        strategy: Strategy,
        options: &ScheduleOptions,
    ) -> SubstrateResult<Schedule> {
        match strategy {
            Strategy::Fast => FastStrategy::schedule(graph, options.edge_order),
            Strategy::Optimized => {
                options.optimized.validate()?;
                OptimizedStrategy::schedule(graph, options.edge_order, &options.optimized)
            }
        }
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Fewest rounds any schedule can use
    pub fn lower_bound(graph: &ResourceGraph) -> usize {
        graph.max_degree()
    }

    /// Most rounds either strategy will use
    pub fn upper_bound(graph: &ResourceGraph) -> usize {
        if graph.num_edges() == 0 {
            0
        } else {
            round_bound(graph.max_degree())
        }
    }

    /// Lower bound over achieved rounds (1.0 is optimal)
    /// Gantree: scheduling_efficiency(schedule) -> f64 // 효율
    pub fn scheduling_efficiency(schedule: &Schedule) -> f64 {
        if schedule.is_empty() {
            return 1.0;
        }
        schedule.stats().lower_bound as f64 / schedule.num_rounds() as f64
    }

    /// Node with the most operations
    pub fn find_bottleneck_node(schedule: &Schedule) -> Option<NodeId> {
        schedule.bottleneck_node()
    }
}

// ============================================================================
// Tests
// ============================================================================
