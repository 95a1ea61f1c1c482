//! Resource graph for the substrate scheduler
//!
//! Gantree: L1_Graph → ResourceGraph
//!
//! Undirected graph whose nodes are operands and whose edges are required
//! pairwise operations. Stored as flat arrays with a CSR adjacency so the
//! scheduling strategies can walk neighbourhoods by dense index.

use crate::error::{SubstrateError, SubstrateResult};
use crate::types::{Edge, EdgeIndex, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Wire form of a resource graph (validated on the way in)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRepr {
    #[serde(default)]
    name: Option<String>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Immutable resource graph
/// Gantree: ResourceGraph // 자원 그래프
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct ResourceGraph {
    /// Nodes in declaration order (dense index = position)
    /// Gantree: nodes: Vec<Node> // 노드 배열
    nodes: Vec<Node>,

    /// Stable id → dense index
    index: HashMap<NodeId, usize>,

    /// Required operations in insertion order (duplicates removed)
    /// Gantree: edges: Vec<Edge> // 간선 배열
    edges: Vec<Edge>,

    /// Dense endpoint indices per edge
    endpoints: Vec<(usize, usize)>,

    /// CSR row offsets (`nodes.len() + 1` entries)
    offsets: Vec<usize>,

    /// CSR neighbour indices
    adjacency: Vec<usize>,

    /// CSR incident edge indices, parallel to `adjacency`
    incident: Vec<EdgeIndex>,

    /// Cached maximum degree
    max_degree: usize,

    /// Optional graph name
    name: Option<String>,
}

impl ResourceGraph {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Build from an explicit node set and edge list
    /// Gantree: new(nodes,edges) -> Result<Self> // 생성+검증
    ///
    /// Fails with `InvalidEdge` on a self-loop and with `UnknownNode` when an
    /// edge endpoint is not declared in `nodes`.
    pub fn new(nodes: Vec<NodeId>, edges: Vec<(NodeId, NodeId)>) -> SubstrateResult<Self> {
        let edges = edges
            .into_iter()
            .map(|(a, b)| Edge::new(a, b))
            .collect::<SubstrateResult<Vec<_>>>()?;

        Self::from_parts(nodes.into_iter().map(Node::new).collect(), edges)
    }

    /// Build with per-edge weights
    pub fn with_weighted_edges(
        nodes: Vec<NodeId>,
        edges: Vec<(NodeId, NodeId, u32)>,
    ) -> SubstrateResult<Self> {
        let edges = edges
            .into_iter()
            .map(|(a, b, w)| Edge::weighted(a, b, w))
            .collect::<SubstrateResult<Vec<_>>>()?;

        Self::from_parts(nodes.into_iter().map(Node::new).collect(), edges)
    }

    /// Build from an edge list alone; the node set is every endpoint,
    /// in first-seen order
    pub fn from_edges(edges: Vec<(NodeId, NodeId)>) -> SubstrateResult<Self> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::new();
        for &(a, b) in &edges {
            for id in [a, b] {
                if seen.insert(id) {
                    nodes.push(id);
                }
            }
        }

        Self::new(nodes, edges)
    }

    /// Graph with no nodes and no edges
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            endpoints: Vec::new(),
            offsets: vec![0],
            adjacency: Vec::new(),
            incident: Vec::new(),
            max_degree: 0,
            name: None,
        }
    }

    /// Build from already-constructed nodes and edges
    /// Gantree: from_parts(nodes,edges) -> Result<Self> // 핵심 생성자
    ///
    /// Duplicate node ids collapse to the first occurrence; duplicate edges
    /// collapse to a single operation keeping the first weight.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> SubstrateResult<Self> {
        // Gantree: collect_nodes() // 노드 집합
        let mut index = HashMap::with_capacity(nodes.len());
        let mut unique_nodes = Vec::with_capacity(nodes.len());
        for node in nodes {
            if !index.contains_key(&node.id) {
                index.insert(node.id, unique_nodes.len());
                unique_nodes.push(node);
            }
        }

        // Gantree: validate_edges() // 간선 검증
        let mut seen = HashSet::with_capacity(edges.len());
        let mut unique_edges = Vec::with_capacity(edges.len());
        let mut endpoints = Vec::with_capacity(edges.len());
        for edge in edges {
            let (u, v) = edge.endpoints();
            let iu = *index
                .get(&u)
                .ok_or(SubstrateError::UnknownNode { node: u, u, v })?;
            let iv = *index
                .get(&v)
                .ok_or(SubstrateError::UnknownNode { node: v, u, v })?;

            if seen.insert((u, v)) {
                unique_edges.push(edge);
                endpoints.push((iu, iv));
            }
        }

        // Gantree: build_csr() // 인접 배열
        let n = unique_nodes.len();
        let mut degree = vec![0usize; n];
        for &(iu, iv) in &endpoints {
            degree[iu] += 1;
            degree[iv] += 1;
        }

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);
        for d in &degree {
            let last = *offsets.last().unwrap_or(&0);
            offsets.push(last + d);
        }

        let total = offsets[n];
        let mut adjacency = vec![0usize; total];
        let mut incident = vec![0usize; total];
        let mut cursor = offsets[..n].to_vec();
        for (e, &(iu, iv)) in endpoints.iter().enumerate() {
            adjacency[cursor[iu]] = iv;
            incident[cursor[iu]] = e;
            cursor[iu] += 1;

            adjacency[cursor[iv]] = iu;
            incident[cursor[iv]] = e;
            cursor[iv] += 1;
        }

        let max_degree = degree.iter().copied().max().unwrap_or(0);

        Ok(Self {
            nodes: unique_nodes,
            index,
            edges: unique_edges,
            endpoints,
            offsets,
            adjacency,
            incident,
            max_degree,
            name: None,
        })
    }

    /// Attach a name (builder style)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct required operations
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge by dense index
    pub fn edge(&self, e: EdgeIndex) -> &Edge {
        &self.edges[e]
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Graph name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Maximum node degree (0 for an edgeless graph)
    /// Gantree: max_degree() -> usize // 최대 차수
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    // ========================================================================
    // Connectivity Queries
    // ========================================================================

    /// Check node membership
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Check if `a` and `b` share a required operation
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.index.get(&a), self.index.get(&b)) else {
            return false;
        };
        // Scan the shorter row
        let (from, to) = if self.degree_at(ia) <= self.degree_at(ib) {
            (ia, ib)
        } else {
            (ib, ia)
        };
        self.neighbor_indices(from).contains(&to)
    }

    /// Neighbours of a node, in edge insertion order
    /// Gantree: neighbors(id) -> Vec<NodeId> // 이웃
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        match self.index.get(&id) {
            Some(&i) => self
                .neighbor_indices(i)
                .iter()
                .map(|&j| self.nodes[j].id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Degree of a node (0 for unknown ids)
    /// Gantree: degree(id) -> usize // 차수
    pub fn degree(&self, id: NodeId) -> usize {
        self.index.get(&id).map_or(0, |&i| self.degree_at(i))
    }

    /// Average node degree
    pub fn average_degree(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        2.0 * self.edges.len() as f64 / self.nodes.len() as f64
    }

    /// Edge density in [0, 1]
    pub fn density(&self) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            return 0.0;
        }
        self.edges.len() as f64 / (n * (n - 1) / 2) as f64
    }

    // ========================================================================
    // Dense-Index Views (used by the scheduling strategies)
    // ========================================================================

    /// Dense index of a node id
    #[inline]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Node id at a dense index
    #[inline]
    pub fn id_at(&self, index: usize) -> NodeId {
        self.nodes[index].id
    }

    /// Degree at a dense index
    #[inline]
    pub fn degree_at(&self, index: usize) -> usize {
        self.offsets[index + 1] - self.offsets[index]
    }

    /// Neighbour dense indices of a node
    #[inline]
    pub fn neighbor_indices(&self, index: usize) -> &[usize] {
        &self.adjacency[self.offsets[index]..self.offsets[index + 1]]
    }

    /// Incident edge indices of a node, parallel to `neighbor_indices`
    #[inline]
    pub fn incident_edges(&self, index: usize) -> &[EdgeIndex] {
        &self.incident[self.offsets[index]..self.offsets[index + 1]]
    }

    /// Dense endpoint indices of an edge
    #[inline]
    pub fn endpoints_at(&self, e: EdgeIndex) -> (usize, usize) {
        self.endpoints[e]
    }
}

impl Default for ResourceGraph {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Serde Conversions
// ============================================================================

impl TryFrom<GraphRepr> for ResourceGraph {
    type Error = SubstrateError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        let graph = Self::from_parts(repr.nodes, repr.edges)?;
        Ok(match repr.name {
            Some(name) => graph.with_name(name),
            None => graph,
        })
    }
}

impl From<ResourceGraph> for GraphRepr {
    fn from(graph: ResourceGraph) -> Self {
        Self {
            name: graph.name,
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for ResourceGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ResourceGraph({} nodes, {} edges, max degree {}{})",
            self.num_nodes(),
            self.num_edges(),
            self.max_degree,
            self.name
                .as_ref()
                .map(|n| format!(", {}", n))
                .unwrap_or_default()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
