//! Node relabeling table
//!
//! Gantree: L3_Mapping → NodeMapping
//!
//! Bijection from original node ids to new ids. The new id set equals the
//! original id set, so a mapping is a permutation of the graph's own ids.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use substrate_core::{Coordinate, Edge, Node, NodeId, ResourceGraph, SubstrateError, SubstrateResult};
use substrate_schedule::{Round, Schedule};

/// Original id ↔ new id table
/// Gantree: NodeMapping // 노드 매핑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMapping {
    /// Original id → new id
    forward: BTreeMap<NodeId, NodeId>,

    /// New id → original id
    backward: BTreeMap<NodeId, NodeId>,
}

impl NodeMapping {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Every node keeps its id
    /// Gantree: identity(graph) -> NodeMapping // 항등 매핑
    pub fn identity(graph: &ResourceGraph) -> Self {
        let forward: BTreeMap<NodeId, NodeId> = graph.nodes().iter().map(|n| (n.id, n.id)).collect();
        let backward = forward.clone();
        Self { forward, backward }
    }

    /// Relabel so that `order[k]` receives the k-th smallest node id
    /// Gantree: from_order(graph,order) -> Result<NodeMapping> // 순서 매핑
    ///
    /// `order` must list every node of `graph` exactly once.
    pub fn from_order(graph: &ResourceGraph, order: &[NodeId]) -> SubstrateResult<Self> {
        if order.len() != graph.num_nodes() {
            return Err(SubstrateError::InvalidConfig(format!(
                "ordering lists {} nodes, graph has {}",
                order.len(),
                graph.num_nodes()
            )));
        }

        let mut targets: Vec<NodeId> = graph.nodes().iter().map(|n| n.id).collect();
        targets.sort_unstable();

        let mut seen = HashSet::with_capacity(order.len());
        let mut forward = BTreeMap::new();
        let mut backward = BTreeMap::new();
        for (&original, &new) in order.iter().zip(&targets) {
            if !graph.contains_node(original) {
                return Err(SubstrateError::UnmappedNode(original));
            }
            if !seen.insert(original) {
                return Err(SubstrateError::InvalidConfig(format!(
                    "node {} appears twice in ordering",
                    original
                )));
            }
            forward.insert(original, new);
            backward.insert(new, original);
        }

        Ok(Self { forward, backward })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// New id of an original node
    pub fn map(&self, original: NodeId) -> Option<NodeId> {
        self.forward.get(&original).copied()
    }

    /// Original id of a relabeled node
    pub fn unmap(&self, new: NodeId) -> Option<NodeId> {
        self.backward.get(&new).copied()
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// True when no node is covered
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// True when every node keeps its id
    pub fn is_identity(&self) -> bool {
        self.forward.iter().all(|(a, b)| a == b)
    }

    /// `(original, new)` pairs in original-id order
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.forward.iter().map(|(&a, &b)| (a, b))
    }

    // ========================================================================
    // Translation
    // ========================================================================

    /// Relabel an edge, keeping its weight
    pub fn map_edge(&self, edge: &Edge) -> SubstrateResult<Edge> {
        let (u, v) = edge.endpoints();
        let a = self.map(u).ok_or(SubstrateError::UnmappedNode(u))?;
        let b = self.map(v).ok_or(SubstrateError::UnmappedNode(v))?;
        Edge::weighted(a, b, edge.weight)
    }

    /// Translate a relabeled edge back to original ids
    pub fn unmap_edge(&self, edge: &Edge) -> SubstrateResult<Edge> {
        let (u, v) = edge.endpoints();
        let a = self.unmap(u).ok_or(SubstrateError::UnmappedNode(u))?;
        let b = self.unmap(v).ok_or(SubstrateError::UnmappedNode(v))?;
        Edge::weighted(a, b, edge.weight)
    }

    /// Translate a schedule of the relabeled graph back to original ids
    /// Gantree: unmap_schedule(schedule) -> Result<Schedule> // 결과 역변환
    ///
    /// Round structure and statistics are kept.
    pub fn unmap_schedule(&self, schedule: &Schedule) -> SubstrateResult<Schedule> {
        let rounds = schedule
            .rounds()
            .iter()
            .map(|round| {
                let edges = round
                    .edges
                    .iter()
                    .map(|e| self.unmap_edge(e))
                    .collect::<SubstrateResult<Vec<_>>>()?;
                Ok(Round::new(round.index, edges))
            })
            .collect::<SubstrateResult<Vec<_>>>()?;

        Ok(Schedule::new(rounds, schedule.stats().clone()))
    }

    /// Build the relabeled graph
    /// Gantree: apply(graph) -> Result<ResourceGraph> // 그래프 변환
    ///
    /// Nodes are laid out in new-id order on a square grid. Edges follow
    /// ascending relabeled endpoints, except under the identity mapping,
    /// which keeps the original edge order.
    pub fn apply(&self, graph: &ResourceGraph) -> SubstrateResult<ResourceGraph> {
        let mut ids = graph
            .nodes()
            .iter()
            .map(|n| self.map(n.id).ok_or(SubstrateError::UnmappedNode(n.id)))
            .collect::<SubstrateResult<Vec<_>>>()?;
        ids.sort_unstable();

        let width = grid_width(ids.len()) as i64;
        let nodes: Vec<Node> = ids
            .into_iter()
            .enumerate()
            .map(|(rank, id)| {
                let rank = rank as i64;
                Node::placed(id, Coordinate::new(rank % width, rank / width))
            })
            .collect();

        let mut edges = graph
            .edges()
            .iter()
            .map(|e| self.map_edge(e))
            .collect::<SubstrateResult<Vec<_>>>()?;
        if !self.is_identity() {
            edges.sort_by_key(|e| e.endpoints());
        }

        let mapped = ResourceGraph::from_parts(nodes, edges)?;
        Ok(match graph.name() {
            Some(name) => mapped.with_name(name),
            None => mapped,
        })
    }
}

/// Side of the smallest square grid holding `n` nodes
fn grid_width(n: usize) -> usize {
    let mut width = (n as f64).sqrt() as usize;
    while width * width < n {
        width += 1;
    }
    width.max(1)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use substrate_schedule::Scheduler;

    fn path4() -> ResourceGraph {
        ResourceGraph::new((0..4).collect(), vec![(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    #[test]
    fn test_identity() {
        let g = path4();
        let mapping = NodeMapping::identity(&g);

        assert!(mapping.is_identity());
        assert_eq!(mapping.len(), 4);
        assert_eq!(mapping.map(2), Some(2));
        assert_eq!(mapping.unmap(3), Some(3));
        assert_eq!(mapping.map(9), None);
    }

    #[test]
    fn test_from_order() {
        let g = path4();
        let mapping = NodeMapping::from_order(&g, &[2, 1, 3, 0]).unwrap();

        assert!(!mapping.is_identity());
        assert_eq!(mapping.map(2), Some(0));
        assert_eq!(mapping.map(0), Some(3));
        assert_eq!(mapping.unmap(1), Some(1));
    }

    #[test]
    fn test_from_order_rejects_bad_orders() {
        let g = path4();
        assert!(NodeMapping::from_order(&g, &[0, 1, 2]).is_err());
        assert!(matches!(
            NodeMapping::from_order(&g, &[0, 1, 2, 7]),
            Err(SubstrateError::UnmappedNode(7))
        ));
        assert!(NodeMapping::from_order(&g, &[0, 1, 1, 2]).is_err());
    }

    #[test]
    fn test_apply_preserves_topology() {
        let g = path4();
        let mapping = NodeMapping::from_order(&g, &[2, 1, 3, 0]).unwrap();
        let mapped = mapping.apply(&g).unwrap();

        assert_eq!(mapped.num_nodes(), 4);
        assert_eq!(mapped.num_edges(), 3);
        for edge in g.edges() {
            let relabeled = mapping.map_edge(edge).unwrap();
            assert!(mapped.has_edge(relabeled.u(), relabeled.v()));
        }
    }

    #[test]
    fn test_apply_places_on_grid() {
        let g = ResourceGraph::new((0..5).collect(), vec![(0, 1)]).unwrap();
        let mapped = NodeMapping::identity(&g).apply(&g).unwrap();

        // 5 nodes fit a 3-wide grid
        assert_eq!(mapped.node(4).unwrap().coordinate, Some(Coordinate::new(1, 1)));
        assert_eq!(mapped.node(0).unwrap().coordinate, Some(Coordinate::new(0, 0)));
    }

    #[test]
    fn test_unmap_schedule() {
        let g = path4();
        let mapping = NodeMapping::from_order(&g, &[3, 2, 1, 0]).unwrap();
        let mapped = mapping.apply(&g).unwrap();

        let schedule = Scheduler::compute_fast(&mapped).unwrap();
        let restored = mapping.unmap_schedule(&schedule).unwrap();

        assert!(restored.verify(&g).is_ok());
        assert_eq!(restored.num_rounds(), schedule.num_rounds());
    }

    #[test]
    fn test_grid_width() {
        assert_eq!(grid_width(0), 1);
        assert_eq!(grid_width(1), 1);
        assert_eq!(grid_width(4), 2);
        assert_eq!(grid_width(5), 3);
        assert_eq!(grid_width(1000), 32);
    }
}
