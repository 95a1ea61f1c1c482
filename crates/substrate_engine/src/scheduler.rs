//! Configured scheduling entry point
//!
//! Gantree: L4_Integration → SubstrateScheduler
//!
//! Stateless front door: validates the configuration, runs the pipeline and
//! optionally summarizes the run.

use crate::config::SchedulerConfig;
use crate::pipeline::Pipeline;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use substrate_core::{ResourceGraph, SubstrateResult};
use substrate_mapping::MappingCandidate;
use substrate_schedule::{Schedule, Strategy};

/// Schedule a graph with default settings for `strategy`
/// Gantree: schedule(graph,strategy,apply_pre_mapping) -> Result<Schedule> // 진입점
pub fn schedule(
    graph: &ResourceGraph,
    strategy: Strategy,
    apply_pre_mapping: bool,
) -> SubstrateResult<Schedule> {
    let config = SchedulerConfig::default()
        .with_strategy(strategy)
        .with_pre_mapping(apply_pre_mapping);
    SubstrateScheduler::new(config).run(graph)
}

/// Schedule quality summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Rounds used
    pub rounds: usize,

    /// Operations scheduled
    pub operations: usize,

    /// Degree lower bound
    pub lower_bound: usize,

    /// Rounds above the lower bound
    pub optimality_gap: usize,

    /// Average operations per round
    pub parallelism: f64,
}

/// Pre-mapping summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingSummary {
    /// Winning candidate
    pub candidate: MappingCandidate,

    /// Candidates evaluated
    pub evaluations: usize,

    /// Rounds saved over identity in the fast evaluation
    pub rounds_saved: usize,
}

/// Execution summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    /// Wall-clock time of the whole run
    pub total_time_ms: u64,

    /// Improvement iterations spent
    pub iterations: usize,

    /// Improvement budget exhausted
    pub budget_exceeded: bool,
}

/// Schedule with run summary
/// Gantree: ScheduleReport // 실행 보고
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Schedule in original node ids
    pub schedule: Schedule,

    /// Quality summary
    pub metrics: ScheduleMetrics,

    /// Pre-mapping summary (when the stage ran)
    pub mapping: Option<MappingSummary>,

    /// Execution summary
    pub execution: ExecutionMetrics,
}

impl ScheduleReport {
    /// True when the schedule meets the lower bound
    pub fn is_optimal(&self) -> bool {
        self.metrics.optimality_gap == 0
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SubstrateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configured substrate scheduler
/// Gantree: SubstrateScheduler // 통합 스케줄러
#[derive(Debug, Clone, Default)]
pub struct SubstrateScheduler {
    config: SchedulerConfig,
}

impl SubstrateScheduler {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create with configuration
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Fast strategy, no pre-mapping
    pub fn fast() -> Self {
        Self::new(SchedulerConfig::fast())
    }

    /// Optimized strategy, no pre-mapping
    pub fn optimized() -> Self {
        Self::new(SchedulerConfig::optimized())
    }

    /// Replace configuration
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Schedule `graph`
    /// Gantree: run(graph) -> Result<Schedule> // 스케줄 실행
    pub fn run(&self, graph: &ResourceGraph) -> SubstrateResult<Schedule> {
        Pipeline::new(graph, self.config.clone()).run()
    }

    /// Schedule `graph` and summarize the run
    pub fn run_with_report(&self, graph: &ResourceGraph) -> SubstrateResult<ScheduleReport> {
        let start_time = Instant::now();

        let mut pipeline = Pipeline::new(graph, self.config.clone());
        let schedule = pipeline.run()?;

        let mapping = pipeline.state().mapping.as_ref().map(|m| MappingSummary {
            candidate: m.candidate,
            evaluations: m.evaluations,
            rounds_saved: m.rounds_saved(),
        });

        let metrics = ScheduleMetrics {
            rounds: schedule.num_rounds(),
            operations: schedule.num_operations(),
            lower_bound: schedule.stats().lower_bound,
            optimality_gap: schedule.optimality_gap(),
            parallelism: schedule.parallelism_factor(),
        };

        let execution = ExecutionMetrics {
            total_time_ms: start_time.elapsed().as_millis() as u64,
            iterations: schedule.stats().iterations,
            budget_exceeded: schedule.stats().budget_exceeded,
        };

        Ok(ScheduleReport {
            schedule,
            metrics,
            mapping,
            execution,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use substrate_core::SubstrateError;

    fn path(n: usize) -> ResourceGraph {
        ResourceGraph::new(
            (0..n).collect(),
            (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_free_function() {
        let g = path(10);
        for strategy in Strategy::ALL {
            for pre_map in [false, true] {
                let schedule = schedule(&g, strategy, pre_map).unwrap();
                assert!(schedule.num_rounds() <= 3);
                assert!(schedule.verify(&g).is_ok());
                assert_eq!(schedule.stats().pre_mapped, pre_map);
            }
        }
    }

    #[test]
    fn test_scheduler_presets() {
        assert_eq!(SubstrateScheduler::fast().config().strategy, Strategy::Fast);
        assert_eq!(SubstrateScheduler::optimized().config().strategy, Strategy::Optimized);

        let scheduler = SubstrateScheduler::default().with_config(SchedulerConfig::benchmark());
        assert_eq!(scheduler.config(), &SchedulerConfig::benchmark());
    }

    #[test]
    fn test_report() {
        let g = path(6);
        let report = SubstrateScheduler::new(SchedulerConfig::optimized().with_pre_mapping(true))
            .run_with_report(&g)
            .unwrap();

        assert_eq!(report.metrics.rounds, 2);
        assert_eq!(report.metrics.operations, 5);
        assert!(report.is_optimal());
        assert_relative_eq!(report.metrics.parallelism, 2.5);
        assert!(report.mapping.is_some());
        assert!(!report.execution.budget_exceeded);
        assert!(report.to_json().unwrap().contains("\"rounds\": 2"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let scheduler = SubstrateScheduler::new(SchedulerConfig::optimized().with_time_limit_ms(0));
        assert!(matches!(
            scheduler.run(&path(3)),
            Err(SubstrateError::InvalidConfig(_))
        ));
    }
}
