//! Schedule for the substrate scheduler
//!
//! Gantree: L2_Scheduling → Schedule
//!
//! Ordered sequence of rounds plus the run statistics of the strategy that
//! produced it. `verify` is the validity core shared by both strategies and
//! the tests.

use crate::round::Round;
use crate::scheduler::Strategy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use substrate_core::{Edge, NodeId, ResourceGraph, RoundIndex, SubstrateError, SubstrateResult};

/// Statistics recorded while scheduling
/// Gantree: ScheduleStats // 실행 통계
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Strategy that produced the schedule
    pub strategy: Strategy,

    /// Round lower bound (maximum node degree)
    pub lower_bound: usize,

    /// Improvement iterations spent (0 for the fast strategy)
    pub iterations: usize,

    /// Edges placed by Misra–Gries repair instead of first-fit
    pub repairs: usize,

    /// Improvement search stopped at its ceiling
    pub budget_exceeded: bool,

    /// Graph was relabeled before scheduling
    pub pre_mapped: bool,
}

/// Complete round schedule
/// Gantree: Schedule // 전체 스케줄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Rounds in execution order
    /// Gantree: rounds: Vec<Round> // 라운드 목록
    rounds: Vec<Round>,

    /// Run statistics
    stats: ScheduleStats,
}

impl Schedule {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a schedule from rounds
    pub fn new(rounds: Vec<Round>, stats: ScheduleStats) -> Self {
        Self { rounds, stats }
    }

    /// Create a schedule from bare edge batches, numbering rounds from 0
    pub fn from_edge_rounds(rounds: Vec<Vec<Edge>>, stats: ScheduleStats) -> Self {
        let rounds = rounds
            .into_iter()
            .enumerate()
            .map(|(index, edges)| Round::new(index, edges))
            .collect();
        Self::new(rounds, stats)
    }

    /// Schedule with no rounds
    pub fn empty(strategy: Strategy) -> Self {
        Self {
            rounds: Vec::new(),
            stats: ScheduleStats {
                strategy,
                ..ScheduleStats::default()
            },
        }
    }

    /// Replace the statistics (builder style)
    pub fn with_stats(mut self, stats: ScheduleStats) -> Self {
        self.stats = stats;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Rounds in order
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Round by index
    pub fn round(&self, index: RoundIndex) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// Consume into rounds
    pub fn into_rounds(self) -> Vec<Round> {
        self.rounds
    }

    /// Number of rounds
    /// Gantree: num_rounds() -> usize // 라운드 수
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Number of scheduled operations
    pub fn num_operations(&self) -> usize {
        self.rounds.iter().map(Round::len).sum()
    }

    /// True when no round exists
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Run statistics
    pub fn stats(&self) -> &ScheduleStats {
        &self.stats
    }

    /// Strategy that produced the schedule
    pub fn strategy(&self) -> Strategy {
        self.stats.strategy
    }

    /// Round holding the operation `(a, b)`
    pub fn round_of(&self, a: NodeId, b: NodeId) -> Option<RoundIndex> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.rounds
            .iter()
            .find(|r| r.edges.iter().any(|e| e.endpoints() == key))
            .map(|r| r.index)
    }

    /// Budget report, when the improvement search hit its ceiling
    pub fn budget_error(&self) -> Option<SubstrateError> {
        self.stats
            .budget_exceeded
            .then_some(SubstrateError::BudgetExceeded {
                iterations: self.stats.iterations,
                rounds: self.rounds.len(),
            })
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Check this schedule against `graph`
    /// Gantree: verify(&self,graph) -> Result // 검증
    ///
    /// Rounds must be numbered contiguously from 0, no node may appear twice
    /// in a round, and the scheduled operations must equal the graph's edge
    /// set exactly.
    pub fn verify(&self, graph: &ResourceGraph) -> SubstrateResult<()> {
        let mut scheduled: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(graph.num_edges());

        for (position, round) in self.rounds.iter().enumerate() {
            if round.index != position {
                return Err(SubstrateError::NonContiguousRounds {
                    position,
                    index: round.index,
                });
            }

            if let Some(node) = round.find_conflict() {
                return Err(SubstrateError::ConflictInRound {
                    round: position,
                    node,
                });
            }

            for edge in &round.edges {
                let (u, v) = edge.endpoints();
                if !graph.has_edge(u, v) {
                    return Err(SubstrateError::UnexpectedOperation(u, v));
                }
                if !scheduled.insert((u, v)) {
                    return Err(SubstrateError::DuplicateOperation(u, v));
                }
            }
        }

        for edge in graph.edges() {
            let (u, v) = edge.endpoints();
            if !scheduled.contains(&(u, v)) {
                return Err(SubstrateError::MissingOperation(u, v));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Quality Metrics
    // ========================================================================

    /// Rounds above the lower bound
    /// Gantree: optimality_gap() -> usize // 최적 격차
    pub fn optimality_gap(&self) -> usize {
        self.rounds.len().saturating_sub(self.stats.lower_bound)
    }

    /// True when the round count meets the lower bound
    pub fn is_optimal(&self) -> bool {
        self.optimality_gap() == 0
    }

    /// Operations per round
    pub fn round_sizes(&self) -> Vec<usize> {
        self.rounds.iter().map(Round::len).collect()
    }

    /// Largest round
    pub fn max_round_size(&self) -> usize {
        self.rounds.iter().map(Round::len).max().unwrap_or(0)
    }

    /// Average operations per round
    /// Gantree: parallelism_factor() -> f64 // 병렬화율
    pub fn parallelism_factor(&self) -> f64 {
        if self.rounds.is_empty() {
            return 1.0;
        }
        self.num_operations() as f64 / self.rounds.len() as f64
    }

    /// Fraction of `(node, round)` slots doing work
    pub fn utilization(&self, num_nodes: usize) -> f64 {
        let slots = self.rounds.len() * num_nodes;
        if slots == 0 {
            return 0.0;
        }
        (2 * self.num_operations()) as f64 / slots as f64
    }

    // ========================================================================
    // Per-Node Analysis
    // ========================================================================

    /// Rounds in which `node` is busy
    pub fn busy_rounds(&self, node: NodeId) -> usize {
        self.rounds.iter().filter(|r| r.touches(node)).count()
    }

    /// Rounds in which `node` is idle
    pub fn idle_rounds(&self, node: NodeId) -> usize {
        self.rounds.len() - self.busy_rounds(node)
    }

    /// Operation count per node
    pub fn node_activity(&self) -> BTreeMap<NodeId, usize> {
        let mut activity = BTreeMap::new();
        for edge in self.rounds.iter().flat_map(|r| &r.edges) {
            *activity.entry(edge.u()).or_insert(0) += 1;
            *activity.entry(edge.v()).or_insert(0) += 1;
        }
        activity
    }

    /// Busiest node (smallest id on ties)
    pub fn bottleneck_node(&self) -> Option<NodeId> {
        self.node_activity()
            .into_iter()
            .fold(None, |best: Option<(NodeId, usize)>, (node, count)| match best {
                Some((_, c)) if c >= count => best,
                _ => Some((node, count)),
            })
            .map(|(node, _)| node)
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> SubstrateResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> SubstrateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule ({}):", self.stats.strategy)?;
        writeln!(f, "  Rounds: {}", self.rounds.len())?;
        writeln!(f, "  Operations: {}", self.num_operations())?;
        writeln!(f, "  Lower bound: {}", self.stats.lower_bound)?;
        writeln!(f, "  Parallelism: {:.2}", self.parallelism_factor())?;
        writeln!(f, "  Iterations: {}", self.stats.iterations)?;
        if self.stats.budget_exceeded {
            writeln!(f, "  Budget: exceeded")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn edge(a: NodeId, b: NodeId) -> Edge {
        Edge::new(a, b).unwrap()
    }

    fn path4() -> ResourceGraph {
        ResourceGraph::new((0..4).collect(), vec![(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    fn make_test_schedule() -> Schedule {
        Schedule::from_edge_rounds(
            vec![vec![edge(0, 1), edge(2, 3)], vec![edge(1, 2)]],
            ScheduleStats {
                lower_bound: 2,
                ..ScheduleStats::default()
            },
        )
    }

    #[test]
    fn test_schedule_basic() {
        let schedule = make_test_schedule();

        assert_eq!(schedule.num_rounds(), 2);
        assert_eq!(schedule.num_operations(), 3);
        assert_eq!(schedule.round_of(2, 1), Some(1));
        assert_eq!(schedule.round_of(0, 3), None);
        assert!(schedule.is_optimal());
    }

    #[test]
    fn test_verify_ok() {
        assert!(make_test_schedule().verify(&path4()).is_ok());
    }

    #[test]
    fn test_verify_conflict() {
        let schedule = Schedule::from_edge_rounds(
            vec![vec![edge(0, 1), edge(1, 2), edge(2, 3)]],
            ScheduleStats::default(),
        );

        assert_eq!(
            schedule.verify(&path4()),
            Err(SubstrateError::ConflictInRound { round: 0, node: 1 })
        );
    }

    #[test]
    fn test_verify_missing_and_duplicate() {
        let missing = Schedule::from_edge_rounds(
            vec![vec![edge(0, 1), edge(2, 3)]],
            ScheduleStats::default(),
        );
        assert_eq!(
            missing.verify(&path4()),
            Err(SubstrateError::MissingOperation(1, 2))
        );

        let duplicate = Schedule::from_edge_rounds(
            vec![vec![edge(0, 1), edge(2, 3)], vec![edge(1, 2)], vec![edge(0, 1)]],
            ScheduleStats::default(),
        );
        assert_eq!(
            duplicate.verify(&path4()),
            Err(SubstrateError::DuplicateOperation(0, 1))
        );
    }

    #[test]
    fn test_verify_unexpected_and_gap() {
        let unexpected = Schedule::from_edge_rounds(vec![vec![edge(0, 3)]], ScheduleStats::default());
        assert_eq!(
            unexpected.verify(&path4()),
            Err(SubstrateError::UnexpectedOperation(0, 3))
        );

        let gap = Schedule::new(
            vec![Round::new(0, vec![edge(0, 1)]), Round::new(2, vec![edge(1, 2)])],
            ScheduleStats::default(),
        );
        assert!(matches!(
            gap.verify(&path4()),
            Err(SubstrateError::NonContiguousRounds { position: 1, index: 2 })
        ));
    }

    #[test]
    fn test_metrics() {
        let schedule = make_test_schedule();

        assert_relative_eq!(schedule.parallelism_factor(), 1.5);
        // 6 busy slots out of 2 rounds x 4 nodes
        assert_relative_eq!(schedule.utilization(4), 0.75);
        assert_eq!(schedule.round_sizes(), vec![2, 1]);
        assert_eq!(schedule.max_round_size(), 2);
    }

    #[test]
    fn test_node_analysis() {
        let schedule = make_test_schedule();

        assert_eq!(schedule.busy_rounds(1), 2);
        assert_eq!(schedule.idle_rounds(0), 1);
        assert_eq!(schedule.bottleneck_node(), Some(1));
        assert_eq!(schedule.node_activity()[&3], 1);
    }

    #[test]
    fn test_budget_error() {
        let mut stats = ScheduleStats::default();
        assert!(Schedule::new(vec![], stats.clone()).budget_error().is_none());

        stats.budget_exceeded = true;
        stats.iterations = 7;
        let err = Schedule::new(vec![], stats).budget_error().unwrap();
        assert!(err.is_recoverable());
        assert!(matches!(err, SubstrateError::BudgetExceeded { iterations: 7, .. }));
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::empty(Strategy::Optimized);

        assert!(schedule.is_empty());
        assert_eq!(schedule.strategy(), Strategy::Optimized);
        assert!(schedule.verify(&ResourceGraph::empty()).is_ok());
        assert_eq!(schedule.bottleneck_node(), None);
        assert_relative_eq!(schedule.utilization(0), 0.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let schedule = make_test_schedule();
        let json = schedule.to_json().unwrap();
        assert_eq!(Schedule::from_json(&json).unwrap(), schedule);
    }
}
