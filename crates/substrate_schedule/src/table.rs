//! Round occupancy table
//!
//! Gantree: L2_Scheduling → RoundTable
//!
//! Bookkeeping shared by both strategies: which edge occupies each
//! `(node, round)` slot, the round of every edge, and a per-node hint for the
//! lowest round that may still be free. Rounds are capped at
//! `max_degree + 1`; Misra–Gries repair keeps every edge inside that palette.
//! Each node only stores the rounds it is busy in, so the table grows with
//! the edge count rather than with `nodes × rounds`.

use crate::round::Round;
use crate::schedule::{Schedule, ScheduleStats};
use std::collections::BTreeMap;
use substrate_core::scheduling::round_bound;
use substrate_core::{EdgeIndex, ResourceGraph, SubstrateError, SubstrateResult};

const EMPTY: usize = usize::MAX;

/// Sparse `node × round` occupancy table
/// Gantree: RoundTable // 점유 테이블
#[derive(Debug, Clone)]
pub(crate) struct RoundTable {
    /// Rounds available (`max_degree + 1`)
    palette: usize,

    /// Busy rounds of each node mapped to the edge holding them
    busy: Vec<BTreeMap<usize, EdgeIndex>>,

    /// Round of each edge
    rounds: Vec<usize>,

    /// Invariant: every round below `low[x]` is occupied at `x`
    low: Vec<usize>,

    /// Scratch marks for fan construction
    mark: Vec<usize>,
    stamp: usize,
}

impl RoundTable {
    /// Empty table sized for `graph`
    pub fn new(graph: &ResourceGraph) -> Self {
        let palette = round_bound(graph.max_degree());
        let n = graph.num_nodes();

        Self {
            palette,
            busy: vec![BTreeMap::new(); n],
            rounds: vec![EMPTY; graph.num_edges()],
            low: vec![0; n],
            mark: vec![0; n],
            stamp: 0,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of rounds the table may use
    pub fn palette(&self) -> usize {
        self.palette
    }

    /// Edge occupying `node` in `round`
    #[inline]
    pub fn occupant(&self, node: usize, round: usize) -> Option<EdgeIndex> {
        self.busy[node].get(&round).copied()
    }

    /// Check if `node` is idle in `round`
    #[inline]
    pub fn is_free(&self, node: usize, round: usize) -> bool {
        !self.busy[node].contains_key(&round)
    }

    /// Round assigned to edge `e`
    #[inline]
    pub fn round_of(&self, e: EdgeIndex) -> Option<usize> {
        match self.rounds[e] {
            EMPTY => None,
            r => Some(r),
        }
    }

    /// Lowest round below `limit` where both nodes are idle
    /// Gantree: first_common_free(a,b,limit) -> Option<usize> // 공통 빈 라운드
    pub fn first_common_free(&self, a: usize, b: usize, limit: usize) -> Option<usize> {
        let start = self.low[a].max(self.low[b]);
        (start..limit.min(self.palette)).find(|&r| self.is_free(a, r) && self.is_free(b, r))
    }

    /// Lowest round below `limit` where `node` is idle
    pub fn first_free(&self, node: usize, limit: usize) -> Option<usize> {
        (self.low[node]..limit.min(self.palette)).find(|&r| self.is_free(node, r))
    }

    /// Rounds below `limit` where `node` is idle, ascending
    pub fn free_rounds(&self, node: usize, limit: usize) -> impl Iterator<Item = usize> + '_ {
        (self.low[node]..limit.min(self.palette)).filter(move |&r| self.is_free(node, r))
    }

    /// Highest assigned round + 1
    pub fn rounds_used(&self) -> usize {
        self.rounds
            .iter()
            .filter(|&&r| r != EMPTY)
            .map(|&r| r + 1)
            .max()
            .unwrap_or(0)
    }

    /// Edges assigned to `round`, ascending
    pub fn edges_in_round(&self, round: usize) -> Vec<EdgeIndex> {
        self.rounds
            .iter()
            .enumerate()
            .filter(|(_, &r)| r == round)
            .map(|(e, _)| e)
            .collect()
    }

    /// True once every edge has a round
    pub fn is_complete(&self) -> bool {
        self.rounds.iter().all(|&r| r != EMPTY)
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Put edge `e` into `round`; both endpoints must be idle there
    pub fn assign(&mut self, graph: &ResourceGraph, e: EdgeIndex, round: usize) {
        let (a, b) = graph.endpoints_at(e);
        debug_assert_eq!(self.rounds[e], EMPTY);
        debug_assert!(self.is_free(a, round) && self.is_free(b, round));

        self.rounds[e] = round;
        for x in [a, b] {
            self.busy[x].insert(round, e);
            while self.low[x] < self.palette && !self.is_free(x, self.low[x]) {
                self.low[x] += 1;
            }
        }
    }

    /// Take edge `e` out of its round, returning the round it held
    pub fn unassign(&mut self, graph: &ResourceGraph, e: EdgeIndex) -> Option<usize> {
        let round = self.round_of(e)?;
        let (a, b) = graph.endpoints_at(e);

        self.rounds[e] = EMPTY;
        for x in [a, b] {
            self.busy[x].remove(&round);
            self.low[x] = self.low[x].min(round);
        }
        Some(round)
    }

    /// Move edge `e` to `round`
    pub fn reassign(&mut self, graph: &ResourceGraph, e: EdgeIndex, round: usize) {
        self.unassign(graph, e);
        self.assign(graph, e, round);
    }

    // ========================================================================
    // Alternating Paths (Kempe chains)
    // ========================================================================

    /// Walk the path from `start` whose edges alternate between rounds
    /// `first` and `second`, beginning with a `first` edge
    /// Gantree: alternating_path(start,a,b) -> Vec<EdgeIndex> // 켐프 체인
    pub fn alternating_path(
        &self,
        graph: &ResourceGraph,
        start: usize,
        first: usize,
        second: usize,
    ) -> Vec<EdgeIndex> {
        let mut path = Vec::new();
        let mut node = start;
        let (mut want, mut next) = (first, second);

        while let Some(e) = self.occupant(node, want) {
            // a proper two-round subgraph has no path longer than the edge count
            if path.len() >= self.rounds.len() {
                break;
            }
            path.push(e);
            let (a, b) = graph.endpoints_at(e);
            node = if a == node { b } else { a };
            std::mem::swap(&mut want, &mut next);
        }

        path
    }

    /// Exchange rounds `r1` and `r2` along `path`
    pub fn swap_path(&mut self, graph: &ResourceGraph, path: &[EdgeIndex], r1: usize, r2: usize) {
        let held: Vec<Option<usize>> = path.iter().map(|&e| self.unassign(graph, e)).collect();

        for (&e, old) in path.iter().zip(held) {
            let new = if old == Some(r1) { r2 } else { r1 };
            self.assign(graph, e, new);
        }
    }

    // ========================================================================
    // Misra–Gries Repair
    // ========================================================================

    /// Place unassigned edge `e` inside the palette by fan rotation and
    /// alternating-path inversion. Always succeeds on a proper table.
    /// Gantree: insert_with_repair(e) -> Result<usize> // 비징 복구
    pub fn insert_with_repair(&mut self, graph: &ResourceGraph, e: EdgeIndex) -> SubstrateResult<usize> {
        let (x, y) = graph.endpoints_at(e);

        // Gantree: build_fan(x) // 팬 구성
        self.stamp += 1;
        let stamp = self.stamp;
        self.mark[y] = stamp;
        let mut fan: Vec<(usize, EdgeIndex)> = vec![(y, e)];
        loop {
            let tip = fan[fan.len() - 1].0;
            let next = graph
                .neighbor_indices(x)
                .iter()
                .zip(graph.incident_edges(x))
                .find(|(&w, &ew)| {
                    self.mark[w] != stamp
                        && self.rounds[ew] != EMPTY
                        && self.is_free(tip, self.rounds[ew])
                });
            match next {
                Some((&w, &ew)) => {
                    self.mark[w] = stamp;
                    fan.push((w, ew));
                }
                None => break,
            }
        }

        let tip = fan[fan.len() - 1].0;
        let c = self
            .first_free(x, self.palette)
            .ok_or_else(|| SubstrateError::InternalError("fan centre has no idle round".into()))?;
        let d = self
            .first_free(tip, self.palette)
            .ok_or_else(|| SubstrateError::InternalError("fan tip has no idle round".into()))?;

        // Gantree: invert_cd_path(x,c,d) // 경로 반전
        if c != d {
            let path = self.alternating_path(graph, x, d, c);
            self.swap_path(graph, &path, d, c);
        }

        // Gantree: find_pivot(fan,d) // 회전 지점
        let mut pivot = None;
        for i in 0..fan.len() {
            if i > 0 {
                let prev = fan[i - 1].0;
                let r = self.rounds[fan[i].1];
                if r == EMPTY || !self.is_free(prev, r) {
                    break;
                }
            }
            if self.is_free(fan[i].0, d) {
                pivot = Some(i);
                break;
            }
        }
        let pivot = pivot
            .ok_or_else(|| SubstrateError::InternalError("no rotation pivot in fan".into()))?;

        // Gantree: rotate_fan(pivot) // 팬 회전
        let shifted: Vec<usize> = (1..=pivot).map(|j| self.rounds[fan[j].1]).collect();
        for &(_, fe) in &fan[1..=pivot] {
            self.unassign(graph, fe);
        }
        for (j, &round) in shifted.iter().enumerate() {
            self.assign(graph, fan[j].1, round);
        }
        self.assign(graph, fan[pivot].1, d);

        log::trace!(
            "repair: edge {} placed in round {} (fan {}, pivot {})",
            e,
            d,
            fan.len(),
            pivot
        );
        Ok(d)
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Group assigned edges by round, dropping empty rounds
    pub fn edge_rounds(&self) -> Vec<Vec<EdgeIndex>> {
        let mut buckets: Vec<Vec<EdgeIndex>> = vec![Vec::new(); self.rounds_used()];
        for (e, &r) in self.rounds.iter().enumerate() {
            if r != EMPTY {
                buckets[r].push(e);
            }
        }
        buckets.retain(|b| !b.is_empty());
        buckets
    }

    /// Build the caller-facing schedule
    pub fn to_schedule(&self, graph: &ResourceGraph, stats: ScheduleStats) -> Schedule {
        let rounds = self
            .edge_rounds()
            .into_iter()
            .enumerate()
            .map(|(index, edges)| Round::new(index, edges.iter().map(|&e| *graph.edge(e)).collect()))
            .collect();

        Schedule::new(rounds, stats)
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

    fn assert_proper(table: &RoundTable, graph: &ResourceGraph) {
        for e in 0..graph.num_edges() {
            let r = table.round_of(e).expect("edge unassigned");
            let (a, b) = graph.endpoints_at(e);
            assert_eq!(table.occupant(a, r), Some(e));
            assert_eq!(table.occupant(b, r), Some(e));
        }
    }

    #[test]
    fn test_assign_and_unassign() {
        let g = ResourceGraph::new(vec![0, 1, 2], vec![(0, 1), (1, 2)]).unwrap();
        let mut table = RoundTable::new(&g);

        assert_eq!(table.palette(), 3);
        table.assign(&g, 0, 0);
        assert_eq!(table.first_common_free(1, 2, 3), Some(1));

        table.assign(&g, 1, 1);
        assert_eq!(table.rounds_used(), 2);
        assert!(table.is_complete());

        assert_eq!(table.unassign(&g, 0), Some(0));
        assert_eq!(table.first_free(1, 3), Some(0));
        assert_eq!(table.rounds_used(), 2);
    }

    #[test]
    fn test_alternating_path_swap() {
        // path 0-1-2-3 coloured 0,1,0
        let g = ResourceGraph::new((0..4).collect(), vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let mut table = RoundTable::new(&g);
        table.assign(&g, 0, 0);
        table.assign(&g, 1, 1);
        table.assign(&g, 2, 0);

        let path = table.alternating_path(&g, 0, 0, 1);
        assert_eq!(path, vec![0, 1, 2]);

        table.swap_path(&g, &path, 0, 1);
        assert_eq!(table.round_of(0), Some(1));
        assert_eq!(table.round_of(1), Some(0));
        assert_eq!(table.round_of(2), Some(1));
        assert_proper(&table, &g);
    }

    #[test]
    fn test_repair_stays_in_palette() {
        let g = complete(7);
        let mut table = RoundTable::new(&g);

        for e in 0..g.num_edges() {
            let (a, b) = g.endpoints_at(e);
            match table.first_common_free(a, b, table.palette()) {
                Some(r) => table.assign(&g, e, r),
                None => {
                    table.insert_with_repair(&g, e).unwrap();
                }
            }
        }

        assert!(table.is_complete());
        assert!(table.rounds_used() <= g.max_degree() + 1);
        assert_proper(&table, &g);
    }

    #[test]
    fn test_repair_from_empty_table() {
        // every edge placed by the repair path alone
        let g = complete(6);
        let mut table = RoundTable::new(&g);
        for e in 0..g.num_edges() {
            table.insert_with_repair(&g, e).unwrap();
        }

        assert!(table.rounds_used() <= 6);
        assert_proper(&table, &g);
    }

    #[test]
    fn test_edge_rounds_compacts() {
        let g = ResourceGraph::new((0..4).collect(), vec![(0, 1), (2, 3)]).unwrap();
        let mut table = RoundTable::new(&g);
        table.assign(&g, 0, 1);
        table.assign(&g, 1, 1);

        assert_eq!(table.edge_rounds(), vec![vec![0, 1]]);
    }
}
