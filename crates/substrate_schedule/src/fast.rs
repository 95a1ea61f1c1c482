//! Fast strategy: greedy list scheduling
//!
//! Gantree: L2_Scheduling → FastStrategy
//!
//! Edges are visited once in a fixed order and dropped into the earliest
//! round where both endpoints are idle. When no such round exists inside the
//! `max_degree + 1` palette the edge is placed by Misra–Gries repair, so the
//! round count never exceeds `max_degree + 1`.

use crate::schedule::{Schedule, ScheduleStats};
use crate::scheduler::Strategy;
use crate::table::RoundTable;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use substrate_core::{EdgeIndex, ResourceGraph, SubstrateResult};

/// Order in which the greedy pass visits edges
/// Gantree: EdgeOrder // 간선 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrder {
    /// Edge insertion order
    #[default]
    Insertion,
    /// Edges with the busiest endpoints first (`deg(u) + deg(v)`)
    DegreeDescending,
    /// Heaviest edges first
    WeightDescending,
}

impl EdgeOrder {
    /// Every ordering, insertion first
    pub const ALL: [EdgeOrder; 3] = [
        EdgeOrder::Insertion,
        EdgeOrder::DegreeDescending,
        EdgeOrder::WeightDescending,
    ];

    /// Short name
    pub fn name(&self) -> &'static str {
        match self {
            EdgeOrder::Insertion => "insertion",
            EdgeOrder::DegreeDescending => "degree_descending",
            EdgeOrder::WeightDescending => "weight_descending",
        }
    }

    /// Edge indices of `graph` in this order; ties keep insertion order
    /// Gantree: arrange(graph) -> Vec<EdgeIndex> // 순서 결정
    pub fn arrange(&self, graph: &ResourceGraph) -> Vec<EdgeIndex> {
        let mut order: Vec<EdgeIndex> = (0..graph.num_edges()).collect();

        match self {
            EdgeOrder::Insertion => {}
            EdgeOrder::DegreeDescending => order.sort_by_key(|&e| {
                let (a, b) = graph.endpoints_at(e);
                Reverse(graph.degree_at(a) + graph.degree_at(b))
            }),
            EdgeOrder::WeightDescending => order.sort_by_key(|&e| Reverse(graph.edge(e).weight)),
        }

        order
    }
}

impl fmt::Display for EdgeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Greedy list scheduler
/// Gantree: FastStrategy // 빠른 전략
pub struct FastStrategy;

impl FastStrategy {
    /// Schedule `graph` visiting edges in `order`
    /// Gantree: schedule(graph,order) -> Result<Schedule> // 탐욕 스케줄
    pub fn schedule(graph: &ResourceGraph, order: EdgeOrder) -> SubstrateResult<Schedule> {
        let (table, repairs) = Self::fill(graph, order)?;

        let schedule = table.to_schedule(
            graph,
            ScheduleStats {
                strategy: Strategy::Fast,
                lower_bound: graph.max_degree(),
                repairs,
                ..ScheduleStats::default()
            },
        );
        debug_assert!(schedule.verify(graph).is_ok());

        Ok(schedule)
    }

    /// Run the greedy pass, returning the filled table and the number of
    /// edges that needed repair
    pub(crate) fn fill(graph: &ResourceGraph, order: EdgeOrder) -> SubstrateResult<(RoundTable, usize)> {
        let mut table = RoundTable::new(graph);
        let palette = table.palette();
        let mut repairs = 0;

        for e in order.arrange(graph) {
            let (a, b) = graph.endpoints_at(e);
            match table.first_common_free(a, b, palette) {
                Some(round) => table.assign(graph, e, round),
                None => {
                    table.insert_with_repair(graph, e)?;
                    repairs += 1;
                }
            }
        }

        debug_assert!(table.is_complete());

        log::debug!(
            "fast[{}]: {} edges -> {} rounds (max degree {}, {} repairs)",
            order,
            graph.num_edges(),
            table.rounds_used(),
            graph.max_degree(),
            repairs
        );

        Ok((table, repairs))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> ResourceGraph {
        ResourceGraph::new(
            (0..n).collect(),
            (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect(),
        )
        .unwrap()
    }

    fn star(n: usize) -> ResourceGraph {
        ResourceGraph::new((0..n).collect(), (1..n).map(|i| (0, i)).collect()).unwrap()
    }

    fn complete(n: usize) -> ResourceGraph {
        let edges = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        ResourceGraph::new((0..n).collect(), edges).unwrap()
    }

    #[test]
    fn test_path_10() {
        let g = path(10);
        let schedule = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();

        assert!(schedule.num_rounds() <= 3);
        assert!(schedule.verify(&g).is_ok());
        assert_eq!(schedule.strategy(), Strategy::Fast);
        assert_eq!(schedule.stats().iterations, 0);
    }

    #[test]
    fn test_star_10_serializes_hub() {
        let g = star(10);
        let schedule = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();

        assert_eq!(schedule.num_rounds(), 9);
        assert!(schedule.rounds().iter().all(|r| r.len() == 1));
    }

    #[test]
    fn test_large_sparse_star() {
        // 40k nodes, one hub: bookkeeping must follow the edge count
        let g = star(40_000);
        let schedule = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();

        assert_eq!(schedule.num_rounds(), 39_999);
        assert_eq!(schedule.num_operations(), 39_999);
        assert!(schedule.is_optimal());
    }

    #[test]
    fn test_complete_10() {
        let g = complete(10);
        let schedule = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();

        assert!(schedule.num_rounds() <= 10);
        assert_eq!(schedule.num_operations(), 45);
        assert!(schedule.verify(&g).is_ok());
    }

    #[test]
    fn test_every_order_respects_bound() {
        for n in [5, 8, 11] {
            let g = complete(n);
            for order in EdgeOrder::ALL {
                let schedule = FastStrategy::schedule(&g, order).unwrap();
                assert!(
                    schedule.num_rounds() <= g.max_degree() + 1,
                    "K{} with {} used {} rounds",
                    n,
                    order,
                    schedule.num_rounds()
                );
                assert!(schedule.verify(&g).is_ok());
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let schedule = FastStrategy::schedule(&ResourceGraph::empty(), EdgeOrder::Insertion).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_isolated_nodes_only() {
        let g = ResourceGraph::new(vec![0, 1, 2], vec![]).unwrap();
        let schedule = FastStrategy::schedule(&g, EdgeOrder::DegreeDescending).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let g = complete(9);
        let a = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();
        let b = FastStrategy::schedule(&g, EdgeOrder::Insertion).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degree_order_puts_hub_edges_first() {
        // hub 0 with three leaves, plus a pendant chain 4-5
        let g = ResourceGraph::new((0..6).collect(), vec![(4, 5), (0, 1), (0, 2), (0, 3)]).unwrap();
        let order = EdgeOrder::DegreeDescending.arrange(&g);
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_weight_order() {
        let g = ResourceGraph::with_weighted_edges(
            (0..4).collect(),
            vec![(0, 1, 1), (1, 2, 9), (2, 3, 4)],
        )
        .unwrap();
        assert_eq!(EdgeOrder::WeightDescending.arrange(&g), vec![1, 2, 0]);
    }
}
