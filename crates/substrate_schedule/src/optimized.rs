//! Optimized strategy: bounded improvement search
//!
//! Gantree: L2_Scheduling → OptimizedStrategy
//!
//! Starts from the fast schedule and tries to empty its last round. Each
//! step either moves an edge of the last round into an earlier round where
//! both endpoints are idle, or frees such a round by flipping an alternating
//! two-round chain. Greedy restarts with the other edge orders run first.
//! The search stops at the degree lower bound, at a local optimum, or when
//! the iteration (and optional wall-clock) budget is spent.

use crate::fast::{EdgeOrder, FastStrategy};
use crate::schedule::{Schedule, ScheduleStats};
use crate::scheduler::Strategy;
use crate::table::RoundTable;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use substrate_core::scheduling::{DEFAULT_MAX_ITERATIONS, MAX_KEMPE_PAIRS_PER_MOVE, QUICK_MAX_ITERATIONS};
use substrate_core::{EdgeIndex, ResourceGraph, SubstrateError, SubstrateResult};

/// Optimized strategy settings
/// Gantree: OptimizedConfig // 최적화 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedConfig {
    /// Improvement steps before the search gives up
    pub max_iterations: usize,

    /// Wall-clock ceiling in milliseconds. Results may vary between runs
    /// when set.
    pub time_limit_ms: Option<u64>,

    /// Try greedy restarts with the other edge orders
    pub restarts: bool,

    /// Chain flips attempted per stuck edge
    pub max_kempe_pairs: usize,
}

impl Default for OptimizedConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            time_limit_ms: None,
            restarts: true,
            max_kempe_pairs: MAX_KEMPE_PAIRS_PER_MOVE,
        }
    }
}

impl OptimizedConfig {
    /// Small budget for interactive use
    pub fn quick() -> Self {
        Self {
            max_iterations: QUICK_MAX_ITERATIONS,
            ..Self::default()
        }
    }

    /// Builder: iteration ceiling
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder: wall-clock ceiling
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Builder: restarts on/off
    pub fn with_restarts(mut self, restarts: bool) -> Self {
        self.restarts = restarts;
        self
    }

    /// Validate settings
    pub fn validate(&self) -> SubstrateResult<()> {
        if self.max_kempe_pairs == 0 {
            return Err(SubstrateError::InvalidConfig(
                "max_kempe_pairs must be at least 1".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(SubstrateError::InvalidConfig(
                "time_limit_ms must be positive when set".into(),
            ));
        }
        Ok(())
    }
}

/// Iteration and time accounting
struct Budget {
    max: usize,
    used: usize,
    deadline: Option<Instant>,
    exhausted: bool,
}

impl Budget {
    fn new(config: &OptimizedConfig) -> Self {
        Self {
            max: config.max_iterations,
            used: 0,
            deadline: config
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            exhausted: false,
        }
    }

    /// Take one step, or mark the budget exhausted
    fn spend(&mut self) -> bool {
        let late = self.deadline.is_some_and(|d| Instant::now() >= d);
        if self.used >= self.max || late {
            self.exhausted = true;
            return false;
        }
        self.used += 1;
        true
    }
}

enum Move {
    Done,
    Stuck,
    OutOfBudget,
}

/// Improvement-search scheduler
/// Gantree: OptimizedStrategy // 최적화 전략
pub struct OptimizedStrategy;

impl OptimizedStrategy {
    /// Schedule `graph`, never using more rounds than the fast strategy
    /// with the same `order`
    /// Gantree: schedule(graph,order,config) -> Result<Schedule> // 개선 스케줄
    pub fn schedule(
        graph: &ResourceGraph,
        order: EdgeOrder,
        config: &OptimizedConfig,
    ) -> SubstrateResult<Schedule> {
        let lower_bound = graph.max_degree();
        let (fast, repairs) = FastStrategy::fill(graph, order)?;
        let fast_rounds = fast.rounds_used();
        let mut budget = Budget::new(config);

        let mut best = fast.clone();

        // Gantree: restart_phase // 재시작
        if config.restarts {
            for alt in EdgeOrder::ALL.into_iter().filter(|&o| o != order) {
                if best.rounds_used() <= lower_bound || !budget.spend() {
                    break;
                }
                let (candidate, _) = FastStrategy::fill(graph, alt)?;
                if candidate.rounds_used() < best.rounds_used() {
                    log::debug!("optimized: restart with {} reached {} rounds", alt, candidate.rounds_used());
                    best = candidate;
                }
            }
        }

        // Gantree: local_search // 국소 탐색
        Self::local_search(graph, &mut best, lower_bound, config.max_kempe_pairs, &mut budget);

        if budget.exhausted {
            log::warn!(
                "optimized: budget exhausted after {} iterations at {} rounds (lower bound {})",
                budget.used,
                best.rounds_used(),
                lower_bound
            );
        }

        let improved = best.rounds_used() < fast_rounds;
        let table = if improved { &best } else { &fast };

        let schedule = table.to_schedule(
            graph,
            ScheduleStats {
                strategy: Strategy::Optimized,
                lower_bound,
                iterations: budget.used,
                repairs,
                budget_exceeded: budget.exhausted,
                pre_mapped: false,
            },
        );
        debug_assert!(schedule.verify(graph).is_ok());
        debug_assert!(schedule.num_rounds() <= fast_rounds);

        log::debug!(
            "optimized: {} -> {} rounds in {} iterations",
            fast_rounds,
            schedule.num_rounds(),
            budget.used
        );

        Ok(schedule)
    }

    /// Empty the last round repeatedly until blocked
    fn local_search(
        graph: &ResourceGraph,
        table: &mut RoundTable,
        lower_bound: usize,
        max_pairs: usize,
        budget: &mut Budget,
    ) {
        loop {
            let used = table.rounds_used();
            if used <= lower_bound {
                return;
            }
            let top = used - 1;

            let mut pending = table.edges_in_round(top);
            while !pending.is_empty() {
                let mut stuck = Vec::new();
                let mut moved = false;

                for e in pending {
                    match Self::try_move(graph, table, e, top, max_pairs, budget) {
                        Move::Done => moved = true,
                        Move::Stuck => stuck.push(e),
                        Move::OutOfBudget => return,
                    }
                }

                if !moved {
                    log::debug!("optimized: local optimum at {} rounds", used);
                    return;
                }
                pending = stuck;
            }
        }
    }

    /// Move edge `e` out of round `top` into an earlier round
    /// Gantree: try_move(e,top) -> Move // 간선 이동
    fn try_move(
        graph: &ResourceGraph,
        table: &mut RoundTable,
        e: EdgeIndex,
        top: usize,
        max_pairs: usize,
        budget: &mut Budget,
    ) -> Move {
        if !budget.spend() {
            return Move::OutOfBudget;
        }

        let (a, b) = graph.endpoints_at(e);
        if let Some(round) = table.first_common_free(a, b, top) {
            table.reassign(graph, e, round);
            return Move::Done;
        }

        let free_a: Vec<usize> = table.free_rounds(a, top).collect();
        let free_b: Vec<usize> = table.free_rounds(b, top).collect();
        let mut tried = 0;

        for &ra in &free_a {
            for &rb in &free_b {
                if tried >= max_pairs {
                    return Move::Stuck;
                }
                tried += 1;
                if !budget.spend() {
                    return Move::OutOfBudget;
                }

                // `ra` is busy at `b`; flip the ra/rb chain leaving `b`
                // unless it reaches `a`
                let path = table.alternating_path(graph, b, ra, rb);
                let reaches_a = path.iter().any(|&pe| {
                    let (x, y) = graph.endpoints_at(pe);
                    x == a || y == a
                });
                if reaches_a {
                    continue;
                }

                table.swap_path(graph, &path, ra, rb);
                table.reassign(graph, e, ra);
                log::trace!("optimized: edge {} moved to round {} via chain of {}", e, ra, path.len());
                return Move::Done;
            }
        }

        Move::Stuck
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(n: usize) -> ResourceGraph {
        let edges = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        ResourceGraph::new((0..n).collect(), edges).unwrap()
    }

    fn cycle(n: usize) -> ResourceGraph {
        ResourceGraph::new((0..n).collect(), (0..n).map(|i| (i, (i + 1) % n)).collect()).unwrap()
    }

    #[test]
    fn test_never_worse_than_fast() {
        for g in [complete(6), complete(9), cycle(7), cycle(12)] {
            let fast = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();
            let opt = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &OptimizedConfig::default()).unwrap();

            assert!(opt.num_rounds() <= fast.num_rounds());
            assert!(opt.verify(&g).is_ok());
            assert_eq!(opt.strategy(), Strategy::Optimized);
        }
    }

    #[test]
    fn test_even_cycle_reaches_lower_bound() {
        let g = cycle(12);
        let opt = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &OptimizedConfig::default()).unwrap();
        assert_eq!(opt.num_rounds(), 2);
        assert!(opt.is_optimal());
    }

    #[test]
    fn test_odd_cycle_needs_three() {
        let g = cycle(7);
        let opt = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &OptimizedConfig::default()).unwrap();
        assert_eq!(opt.num_rounds(), 3);
        assert!(!opt.stats().budget_exceeded);
    }

    #[test]
    fn test_even_complete_graph() {
        // K_n with n even is class one
        let g = complete(8);
        let opt = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &OptimizedConfig::default()).unwrap();
        assert!(opt.num_rounds() <= 8);
        assert!(opt.verify(&g).is_ok());
    }

    #[test]
    fn test_zero_budget_falls_back_to_fast() {
        let g = complete(7);
        let fast = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();
        let config = OptimizedConfig::default().with_max_iterations(0);
        let opt = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &config).unwrap();

        assert_eq!(opt.rounds(), fast.rounds());
        assert_eq!(opt.stats().iterations, 0);
        // K7 is class two, so the search cannot stop at the lower bound
        assert!(opt.stats().budget_exceeded);
        assert!(opt.budget_error().is_some());
    }

    #[test]
    fn test_deadline_exhausts_budget() {
        let config = OptimizedConfig::default()
            .with_max_iterations(usize::MAX)
            .with_time_limit_ms(1);
        let mut budget = Budget::new(&config);
        std::thread::sleep(Duration::from_millis(5));

        assert!(!budget.spend());
        assert!(budget.exhausted);
        assert_eq!(budget.used, 0);
    }

    #[test]
    fn test_time_limit_stops_search() {
        // K_301 is class two: the lower bound is unreachable and one greedy
        // restart alone outlasts a 1ms limit
        let g = complete(301);
        let fast = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();
        let config = OptimizedConfig::default()
            .with_max_iterations(usize::MAX)
            .with_time_limit_ms(1);
        let opt = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &config).unwrap();

        assert!(opt.verify(&g).is_ok());
        assert!(opt.stats().budget_exceeded);
        assert!(opt.num_rounds() <= fast.num_rounds());
        assert!(opt.stats().iterations < 1_000_000);
    }

    #[test]
    fn test_optimal_fast_result_skips_search() {
        let g = ResourceGraph::new((0..5).collect(), (1..5).map(|i| (0, i)).collect()).unwrap();
        let opt = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &OptimizedConfig::default()).unwrap();

        assert_eq!(opt.num_rounds(), 4);
        assert_eq!(opt.stats().iterations, 0);
        assert!(!opt.stats().budget_exceeded);
    }

    #[test]
    fn test_deterministic_without_time_limit() {
        let g = complete(9);
        let config = OptimizedConfig::default();
        let a = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &config).unwrap();
        let b = OptimizedStrategy::schedule(&g, EdgeOrder::Insertion, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_graph() {
        let opt = OptimizedStrategy::schedule(
            &ResourceGraph::empty(),
            EdgeOrder::Insertion,
            &OptimizedConfig::default(),
        )
        .unwrap();
        assert!(opt.is_empty());
        assert!(!opt.stats().budget_exceeded);
    }

    #[test]
    fn test_config_validation() {
        assert!(OptimizedConfig::default().validate().is_ok());
        assert!(OptimizedConfig::quick().validate().is_ok());

        let bad = OptimizedConfig {
            max_kempe_pairs: 0,
            ..OptimizedConfig::default()
        };
        assert!(bad.validate().is_err());
        assert!(OptimizedConfig::default().with_time_limit_ms(0).validate().is_err());
    }
}
