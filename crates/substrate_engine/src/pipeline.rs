//! Pipeline for staged scheduling
//!
//! Gantree: L4_Integration → Pipeline
//!
//! `Unmapped → pre_map() → Mapped → schedule() → Scheduled`, or
//! `Unmapped → skip_mapping() → schedule() → Scheduled`. Each stage keeps its
//! intermediate result; calls out of order fail with `InvalidStage`.

use crate::config::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use substrate_core::{ResourceGraph, SubstrateError, SubstrateResult};
use substrate_mapping::{MappingResult, NodeMapping, PreMappingOptimizer};
use substrate_schedule::{Schedule, Scheduler};

/// Pipeline stage
/// Gantree: PipelineStage // 파이프라인 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    /// Graph as supplied
    Unmapped,
    /// Graph relabeled by the pre-mapping optimizer
    Mapped,
    /// Schedule produced
    Scheduled,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Unmapped => "unmapped",
            PipelineStage::Mapped => "mapped",
            PipelineStage::Scheduled => "scheduled",
        };
        f.write_str(name)
    }
}

/// Pipeline state holding intermediate results
#[derive(Debug, Clone)]
pub struct PipelineState {
    /// Current stage
    pub stage: PipelineStage,

    /// Pre-mapping outcome
    pub mapping: Option<MappingResult>,

    /// Pre-mapping was explicitly skipped
    pub mapping_skipped: bool,

    /// Schedule in original node ids
    pub schedule: Option<Schedule>,
}

impl PipelineState {
    /// Fresh state
    pub fn new() -> Self {
        Self {
            stage: PipelineStage::Unmapped,
            mapping: None,
            mapping_skipped: false,
            schedule: None,
        }
    }

    /// Check if the graph was relabeled
    pub fn is_mapped(&self) -> bool {
        self.mapping.is_some()
    }

    /// Check if scheduled
    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Staged scheduling pipeline over one graph
/// Gantree: Pipeline // 단계별 실행
pub struct Pipeline<'g> {
    /// Input graph
    graph: &'g ResourceGraph,

    /// Configuration
    config: SchedulerConfig,

    /// Current state
    state: PipelineState,
}

impl<'g> Pipeline<'g> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a pipeline for `graph`
    pub fn new(graph: &'g ResourceGraph, config: SchedulerConfig) -> Self {
        Self {
            graph,
            config,
            state: PipelineState::new(),
        }
    }

    // ========================================================================
    // Stage Accessors
    // ========================================================================

    /// Current stage
    pub fn stage(&self) -> PipelineStage {
        self.state.stage
    }

    /// Current state
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Configuration
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Input graph
    pub fn graph(&self) -> &ResourceGraph {
        self.graph
    }

    /// Mapping table, once pre-mapped
    pub fn mapping(&self) -> Option<&NodeMapping> {
        self.state.mapping.as_ref().map(|m| &m.mapping)
    }

    fn invalid(&self, requested: &str) -> SubstrateError {
        SubstrateError::InvalidStage {
            current: self.state.stage.to_string(),
            requested: requested.to_string(),
        }
    }

    // ========================================================================
    // Pipeline Stages
    // ========================================================================

    /// Stage 1a: relabel the graph
    pub fn pre_map(&mut self) -> SubstrateResult<&MappingResult> {
        if self.state.stage != PipelineStage::Unmapped || self.state.mapping_skipped {
            return Err(self.invalid("pre_map"));
        }

        let optimizer = PreMappingOptimizer::new(self.config.mapping.clone());
        let result = optimizer.optimize(self.graph, self.config.edge_order)?;

        log::info!(
            "pipeline: pre-mapped with {} ({} evaluations, {} rounds saved)",
            result.candidate,
            result.evaluations,
            result.rounds_saved()
        );

        self.state.stage = PipelineStage::Mapped;
        Ok(self.state.mapping.insert(result))
    }

    /// Stage 1b: keep the graph as supplied
    pub fn skip_mapping(&mut self) -> SubstrateResult<()> {
        if self.state.stage != PipelineStage::Unmapped {
            return Err(self.invalid("skip_mapping"));
        }

        log::info!("pipeline: pre-mapping skipped");
        self.state.mapping_skipped = true;
        Ok(())
    }

    /// Stage 2: schedule, translating back to original ids when mapped
    pub fn schedule(&mut self) -> SubstrateResult<&Schedule> {
        if self.state.stage == PipelineStage::Scheduled {
            return Err(self.invalid("schedule"));
        }

        let options = self.config.to_schedule_options();
        let schedule = match &self.state.mapping {
            Some(result) => {
                let mapped = Scheduler::compute(&result.graph, self.config.strategy, &options)?;
                let restored = result.mapping.unmap_schedule(&mapped)?;
                let mut stats = restored.stats().clone();
                stats.pre_mapped = true;
                restored.with_stats(stats)
            }
            None => Scheduler::compute(self.graph, self.config.strategy, &options)?,
        };

        log::info!(
            "pipeline: scheduled {} operations in {} rounds ({})",
            schedule.num_operations(),
            schedule.num_rounds(),
            self.config.strategy
        );

        self.state.stage = PipelineStage::Scheduled;
        Ok(self.state.schedule.insert(schedule))
    }

    /// Run every stage the configuration asks for
    pub fn run(&mut self) -> SubstrateResult<Schedule> {
        self.config.validate()?;

        if self.config.apply_pre_mapping {
            self.pre_map()?;
        } else {
            self.skip_mapping()?;
        }

        Ok(self.schedule()?.clone())
    }

    // ========================================================================
    // Reset
    // ========================================================================

    /// Reset to the unmapped stage
    pub fn reset(&mut self) {
        self.state = PipelineState::new();
    }

    /// Reset and reconfigure
    pub fn reconfigure(&mut self, config: SchedulerConfig) {
        self.config = config;
        self.state = PipelineState::new();
    }

    /// Consume the pipeline, yielding the schedule if one was produced
    pub fn into_schedule(self) -> Option<Schedule> {
        self.state.schedule
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use substrate_schedule::Strategy;

    fn wheel(n: usize) -> ResourceGraph {
        let mut edges: Vec<(usize, usize)> = (1..n).map(|i| (0, i)).collect();
        edges.extend((1..n).map(|i| (i, if i + 1 < n { i + 1 } else { 1 })));
        ResourceGraph::new((0..n).collect(), edges).unwrap()
    }

    #[test]
    fn test_stages_with_mapping() {
        let g = wheel(8);
        let mut pipeline = Pipeline::new(&g, SchedulerConfig::optimized());
        assert_eq!(pipeline.stage(), PipelineStage::Unmapped);

        pipeline.pre_map().unwrap();
        assert_eq!(pipeline.stage(), PipelineStage::Mapped);
        assert!(pipeline.mapping().is_some());

        let schedule = pipeline.schedule().unwrap().clone();
        assert_eq!(pipeline.stage(), PipelineStage::Scheduled);
        assert!(schedule.verify(&g).is_ok());
        assert!(schedule.stats().pre_mapped);
        assert_eq!(schedule.strategy(), Strategy::Optimized);
    }

    #[test]
    fn test_schedule_without_mapping_stage() {
        let g = wheel(6);
        let mut pipeline = Pipeline::new(&g, SchedulerConfig::fast());

        let schedule = pipeline.schedule().unwrap();
        assert!(!schedule.stats().pre_mapped);
        assert_eq!(schedule.num_rounds(), 5);
    }

    #[test]
    fn test_out_of_order_calls() {
        let g = wheel(6);
        let mut pipeline = Pipeline::new(&g, SchedulerConfig::fast());

        pipeline.skip_mapping().unwrap();
        assert!(matches!(pipeline.pre_map(), Err(SubstrateError::InvalidStage { .. })));

        pipeline.schedule().unwrap();
        assert!(matches!(pipeline.schedule(), Err(SubstrateError::InvalidStage { .. })));
        assert!(pipeline.skip_mapping().is_err());

        let err = pipeline.pre_map().unwrap_err();
        assert_eq!(
            err,
            SubstrateError::InvalidStage {
                current: "scheduled".into(),
                requested: "pre_map".into()
            }
        );
    }

    #[test]
    fn test_run_and_reset() {
        let g = wheel(7);
        let mut pipeline = Pipeline::new(&g, SchedulerConfig::fast().with_pre_mapping(true));

        let first = pipeline.run().unwrap();
        assert!(first.stats().pre_mapped);

        pipeline.reset();
        assert_eq!(pipeline.stage(), PipelineStage::Unmapped);
        assert!(!pipeline.state().is_scheduled());

        pipeline.reconfigure(SchedulerConfig::fast());
        let second = pipeline.run().unwrap();
        assert!(!second.stats().pre_mapped);
        assert!(pipeline.into_schedule().is_some());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let g = wheel(5);
        let config = SchedulerConfig::optimized().with_time_limit_ms(0);
        let mut pipeline = Pipeline::new(&g, config);

        assert!(matches!(pipeline.run(), Err(SubstrateError::InvalidConfig(_))));
        assert_eq!(pipeline.stage(), PipelineStage::Unmapped);
    }
}
