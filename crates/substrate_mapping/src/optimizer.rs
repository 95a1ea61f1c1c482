//! Pre-mapping optimizer
//!
//! Gantree: L3_Mapping → PreMappingOptimizer
//!
//! Tries a handful of node orderings, relabels the graph for each and keeps
//! the one whose fast schedule uses the fewest rounds. Identity wins ties,
//! and graphs above the edge cap skip the search altogether.

use crate::mapping::NodeMapping;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use substrate_core::mapping::{DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_EDGES};
use substrate_core::{NodeId, ResourceGraph, SubstrateError, SubstrateResult};
use substrate_schedule::{EdgeOrder, FastStrategy};

/// Candidate node ordering
/// Gantree: MappingCandidate // 매핑 후보
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingCandidate {
    /// Keep original ids
    #[default]
    Identity,
    /// Highest-degree nodes get the smallest ids
    DegreeDescending,
    /// Breadth-first from each component's hub, busier neighbors first
    BreadthFirst,
}

impl MappingCandidate {
    /// Candidates in evaluation order
    pub const ALL: [MappingCandidate; 3] = [
        MappingCandidate::Identity,
        MappingCandidate::DegreeDescending,
        MappingCandidate::BreadthFirst,
    ];

    /// Short name
    pub fn name(&self) -> &'static str {
        match self {
            MappingCandidate::Identity => "identity",
            MappingCandidate::DegreeDescending => "degree_descending",
            MappingCandidate::BreadthFirst => "breadth_first",
        }
    }

    /// Build the mapping this candidate proposes for `graph`
    pub fn mapping(&self, graph: &ResourceGraph) -> SubstrateResult<NodeMapping> {
        match self {
            MappingCandidate::Identity => Ok(NodeMapping::identity(graph)),
            MappingCandidate::DegreeDescending => NodeMapping::from_order(graph, &degree_order(graph)),
            MappingCandidate::BreadthFirst => NodeMapping::from_order(graph, &breadth_first_order(graph)),
        }
    }
}

impl fmt::Display for MappingCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dense indices sorted by degree, highest first; ties keep node order
fn indices_by_degree(graph: &ResourceGraph) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.num_nodes()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(graph.degree_at(i)));
    order
}

/// Node ids, highest degree first
fn degree_order(graph: &ResourceGraph) -> Vec<NodeId> {
    indices_by_degree(graph)
        .into_iter()
        .map(|i| graph.id_at(i))
        .collect()
}

/// Node ids in breadth-first order (Cuthill–McKee style)
/// Gantree: breadth_first_order(graph) -> Vec<NodeId> // 너비 우선 순서
fn breadth_first_order(graph: &ResourceGraph) -> Vec<NodeId> {
    let n = graph.num_nodes();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut queue = VecDeque::new();

    for start in indices_by_degree(graph) {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);

        while let Some(i) = queue.pop_front() {
            order.push(graph.id_at(i));

            let mut next: Vec<usize> = graph
                .neighbor_indices(i)
                .iter()
                .copied()
                .filter(|&j| !visited[j])
                .collect();
            next.sort_by_key(|&j| (std::cmp::Reverse(graph.degree_at(j)), j));
            next.dedup();

            for j in next {
                visited[j] = true;
                queue.push_back(j);
            }
        }
    }

    order
}

/// Pre-mapping effort budget
/// Gantree: MappingConfig // 매핑 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Candidates evaluated per call, identity included
    pub max_candidates: usize,

    /// Graphs with more edges only get the identity mapping
    pub max_edges: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_edges: DEFAULT_MAX_EDGES,
        }
    }
}

impl MappingConfig {
    /// Builder: candidate limit
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Builder: edge cap
    pub fn with_max_edges(mut self, max_edges: usize) -> Self {
        self.max_edges = max_edges;
        self
    }

    /// Validate settings
    pub fn validate(&self) -> SubstrateResult<()> {
        if self.max_candidates == 0 {
            return Err(SubstrateError::InvalidConfig(
                "mapping.max_candidates must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of the pre-mapping stage
/// Gantree: MappingResult // 매핑 결과
#[derive(Debug, Clone)]
pub struct MappingResult {
    /// Relabeled graph
    pub graph: ResourceGraph,

    /// Table for translating results back
    pub mapping: NodeMapping,

    /// Winning candidate
    pub candidate: MappingCandidate,

    /// Fast-strategy rounds under identity (None when not evaluated)
    pub baseline_rounds: Option<usize>,

    /// Fast-strategy rounds under the winning candidate
    pub mapped_rounds: Option<usize>,

    /// Candidates evaluated
    pub evaluations: usize,
}

impl MappingResult {
    /// True when a non-identity candidate won
    pub fn improved(&self) -> bool {
        self.candidate != MappingCandidate::Identity
    }

    /// Rounds saved over identity
    pub fn rounds_saved(&self) -> usize {
        match (self.baseline_rounds, self.mapped_rounds) {
            (Some(before), Some(after)) => before.saturating_sub(after),
            _ => 0,
        }
    }
}

/// Chooses a node relabeling before scheduling
/// Gantree: PreMappingOptimizer // 사전 매핑 최적화
#[derive(Debug, Clone, Default)]
pub struct PreMappingOptimizer {
    config: MappingConfig,
}

impl PreMappingOptimizer {
    /// Create with configuration
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Pick the best relabeling of `graph` for a greedy pass in `order`
    /// Gantree: optimize(graph,order) -> Result<MappingResult> // 최적 매핑 탐색
    ///
    /// Never fails on a valid graph: an exhausted budget yields identity.
    pub fn optimize(&self, graph: &ResourceGraph, order: EdgeOrder) -> SubstrateResult<MappingResult> {
        self.config.validate()?;

        let identity = NodeMapping::identity(graph);

        // Gantree: edge_cap() // 크기 제한
        if graph.num_edges() > self.config.max_edges {
            log::debug!(
                "pre-mapping: {} edges above cap {}, keeping identity",
                graph.num_edges(),
                self.config.max_edges
            );
            return Ok(MappingResult {
                graph: identity.apply(graph)?,
                mapping: identity,
                candidate: MappingCandidate::Identity,
                baseline_rounds: None,
                mapped_rounds: None,
                evaluations: 0,
            });
        }

        // Gantree: evaluate_identity() // 기준선
        let mut best_graph = identity.apply(graph)?;
        let baseline = FastStrategy::schedule(&best_graph, order)?.num_rounds();
        let mut best = (MappingCandidate::Identity, identity, baseline);
        let mut evaluations = 1;

        // Gantree: evaluate_candidates() // 후보 평가
        for candidate in MappingCandidate::ALL
            .into_iter()
            .skip(1)
            .take(self.config.max_candidates.saturating_sub(1))
        {
            let mapping = candidate.mapping(graph)?;
            let mapped = mapping.apply(graph)?;
            let rounds = FastStrategy::schedule(&mapped, order)?.num_rounds();
            evaluations += 1;

            log::debug!("pre-mapping: {} -> {} rounds", candidate, rounds);

            if rounds < best.2 {
                best = (candidate, mapping, rounds);
                best_graph = mapped;
            }
        }

        let (candidate, mapping, rounds) = best;
        log::debug!(
            "pre-mapping: chose {} ({} -> {} rounds, {} evaluations)",
            candidate,
            baseline,
            rounds,
            evaluations
        );

        Ok(MappingResult {
            graph: best_graph,
            mapping,
            candidate,
            baseline_rounds: Some(baseline),
            mapped_rounds: Some(rounds),
            evaluations,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn star(n: usize) -> ResourceGraph {
        ResourceGraph::new((0..n).collect(), (1..n).map(|i| (0, i)).collect()).unwrap()
    }

    #[test]
    fn test_degree_order() {
        // node 3 is the hub
        let g = ResourceGraph::new((0..5).collect(), vec![(3, 0), (3, 1), (3, 2), (0, 4)]).unwrap();
        assert_eq!(degree_order(&g), vec![3, 0, 1, 2, 4]);
    }

    #[test]
    fn test_breadth_first_covers_components() {
        let g = ResourceGraph::new((0..6).collect(), vec![(0, 1), (1, 2), (4, 5)]).unwrap();
        let order = breadth_first_order(&g);

        assert_eq!(order.len(), 6);
        assert_eq!(&order[..3], &[1, 0, 2]);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_star_keeps_identity() {
        // every ordering needs 9 rounds, identity wins the tie
        let g = star(10);
        let result = PreMappingOptimizer::default().optimize(&g, EdgeOrder::Insertion).unwrap();

        assert_eq!(result.candidate, MappingCandidate::Identity);
        assert!(result.mapping.is_identity());
        assert!(!result.improved());
        assert_eq!(result.evaluations, 3);
        assert_eq!(result.mapped_rounds, Some(9));
    }

    #[test]
    fn test_edge_cap_skips_search() {
        let optimizer = PreMappingOptimizer::new(MappingConfig::default().with_max_edges(2));
        let result = optimizer.optimize(&star(6), EdgeOrder::Insertion).unwrap();

        assert_eq!(result.evaluations, 0);
        assert!(result.mapping.is_identity());
        assert_eq!(result.baseline_rounds, None);
        assert_eq!(result.rounds_saved(), 0);
    }

    #[test]
    fn test_candidate_limit() {
        let optimizer = PreMappingOptimizer::new(MappingConfig::default().with_max_candidates(1));
        let result = optimizer.optimize(&star(6), EdgeOrder::Insertion).unwrap();
        assert_eq!(result.evaluations, 1);

        let bad = PreMappingOptimizer::new(MappingConfig::default().with_max_candidates(0));
        assert!(bad.optimize(&star(6), EdgeOrder::Insertion).is_err());
    }

    #[test]
    fn test_result_preserves_edge_set() {
        let g = ResourceGraph::new(
            (0..7).collect(),
            vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 0), (0, 3)],
        )
        .unwrap();
        let result = PreMappingOptimizer::default().optimize(&g, EdgeOrder::Insertion).unwrap();

        assert_eq!(result.graph.num_edges(), g.num_edges());
        for edge in g.edges() {
            let mapped = result.mapping.map_edge(edge).unwrap();
            assert!(result.graph.has_edge(mapped.u(), mapped.v()));
        }
        assert!(result.mapped_rounds <= result.baseline_rounds);
    }

    #[test]
    fn test_empty_graph() {
        let result = PreMappingOptimizer::default()
            .optimize(&ResourceGraph::empty(), EdgeOrder::Insertion)
            .unwrap();
        assert!(result.mapping.is_empty());
        assert_eq!(result.mapped_rounds, Some(0));
    }
}
