//! Scheduler configuration
//!
//! Gantree: L4_Integration → SchedulerConfig
//!
//! One serializable record covering strategy choice, the improvement budget
//! and the pre-mapping budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use substrate_core::scheduling::{DEFAULT_MAX_ITERATIONS, MAX_KEMPE_PAIRS_PER_MOVE, QUICK_MAX_ITERATIONS};
use substrate_core::{SubstrateError, SubstrateResult};
use substrate_mapping::MappingConfig;
use substrate_schedule::{EdgeOrder, OptimizedConfig, ScheduleOptions, Strategy};

/// Unified scheduler configuration
/// Gantree: SchedulerConfig // 통합 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    // ========================================================================
    // Strategy Parameters
    // ========================================================================
    /// Scheduling strategy
    pub strategy: Strategy,

    /// Edge visiting order of the greedy pass
    pub edge_order: EdgeOrder,

    /// Run the pre-mapping stage first
    pub apply_pre_mapping: bool,

    // ========================================================================
    // Improvement Budget
    // ========================================================================
    /// Iteration ceiling of the optimized strategy
    pub max_iterations: usize,

    /// Optional wall-clock ceiling (milliseconds)
    pub time_limit_ms: Option<u64>,

    /// Greedy restarts with other edge orders
    pub restarts: bool,

    // ========================================================================
    // Pre-Mapping Budget
    // ========================================================================
    /// Pre-mapping effort limits
    pub mapping: MappingConfig,
}

impl SchedulerConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Fast strategy, no pre-mapping
    pub fn fast() -> Self {
        Self {
            strategy: Strategy::Fast,
            edge_order: EdgeOrder::Insertion,
            apply_pre_mapping: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            time_limit_ms: None,
            restarts: true,
            mapping: MappingConfig::default(),
        }
    }

    /// Optimized strategy with the default budget
    pub fn optimized() -> Self {
        Self {
            strategy: Strategy::Optimized,
            ..Self::fast()
        }
    }

    /// Deterministic optimized settings for timing runs
    pub fn benchmark() -> Self {
        Self {
            strategy: Strategy::Optimized,
            max_iterations: QUICK_MAX_ITERATIONS,
            time_limit_ms: None,
            ..Self::fast()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set edge order
    pub fn with_edge_order(mut self, edge_order: EdgeOrder) -> Self {
        self.edge_order = edge_order;
        self
    }

    /// Enable or disable pre-mapping
    pub fn with_pre_mapping(mut self, enabled: bool) -> Self {
        self.apply_pre_mapping = enabled;
        self
    }

    /// Set iteration ceiling
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set wall-clock ceiling
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enable or disable restarts
    pub fn with_restarts(mut self, restarts: bool) -> Self {
        self.restarts = restarts;
        self
    }

    /// Set pre-mapping limits
    pub fn with_mapping(mut self, mapping: MappingConfig) -> Self {
        self.mapping = mapping;
        self
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Convert to strategy options
    pub fn to_schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            edge_order: self.edge_order,
            optimized: OptimizedConfig {
                max_iterations: self.max_iterations,
                time_limit_ms: self.time_limit_ms,
                restarts: self.restarts,
                max_kempe_pairs: MAX_KEMPE_PAIRS_PER_MOVE,
            },
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> SubstrateResult<()> {
        if self.time_limit_ms == Some(0) {
            return Err(SubstrateError::InvalidConfig(
                "time_limit_ms must be positive when set".into(),
            ));
        }

        self.to_schedule_options().optimized.validate()?;
        self.mapping.validate()
    }

    /// True when repeated runs give identical schedules
    pub fn is_deterministic(&self) -> bool {
        self.strategy == Strategy::Fast || self.time_limit_ms.is_none()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SubstrateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON; missing fields take the `fast()` defaults
    pub fn from_json(json: &str) -> SubstrateResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SubstrateResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Save as a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> SubstrateResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::fast()
    }
}

impl fmt::Display for SchedulerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SchedulerConfig({}, order={}, pre_mapping={}, max_iterations={}",
            self.strategy, self.edge_order, self.apply_pre_mapping, self.max_iterations
        )?;
        if let Some(ms) = self.time_limit_ms {
            write!(f, ", time_limit={}ms", ms)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Tests
// ============================================================================
