//! Core types for the substrate scheduler
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Node and edge identities plus the value types stored in a resource graph.

use crate::constants::graph::DEFAULT_EDGE_WEIGHT;
use crate::error::{SubstrateError, SubstrateResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Stable node identifier (chosen by whoever builds the graph)
/// Gantree: NodeId // pub type NodeId = usize
pub type NodeId = usize;

/// Position of a round in a schedule (0-based, contiguous)
/// Gantree: RoundIndex // pub type RoundIndex = usize
pub type RoundIndex = usize;

/// Dense index of an edge inside a `ResourceGraph`
pub type EdgeIndex = usize;

// ============================================================================
// Coordinate
// ============================================================================

/// Physical-layout coordinate assigned by pre-mapping
/// Gantree: Coordinate // 물리 좌표
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column
    pub x: i64,
    /// Row
    pub y: i64,
}

impl Coordinate {
    /// Create a coordinate
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: &Coordinate) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// Node
// ============================================================================

/// One schedulable operand
/// Gantree: Node // 노드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Stable id
    pub id: NodeId,

    /// Layout position (only set after pre-mapping)
    pub coordinate: Option<Coordinate>,
}

impl Node {
    /// Create a node without a layout coordinate
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            coordinate: None,
        }
    }

    /// Create a node placed at `coordinate`
    pub fn placed(id: NodeId, coordinate: Coordinate) -> Self {
        Self {
            id,
            coordinate: Some(coordinate),
        }
    }
}

impl From<NodeId> for Node {
    fn from(id: NodeId) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Edge
// ============================================================================

/// One required pairwise operation
/// Gantree: Edge // 간선 (연산)
///
/// Endpoints are stored canonically (`u < v`), so `Edge::new(3, 1)` and
/// `Edge::new(1, 3)` describe the same operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawEdge")]
pub struct Edge {
    u: NodeId,
    v: NodeId,
    /// Priority weight (higher = more important)
    pub weight: u32,
}

impl Edge {
    /// Create an edge with the default weight
    /// Gantree: new(a,b) -> Result<Self> // 생성+검증
    pub fn new(a: NodeId, b: NodeId) -> SubstrateResult<Self> {
        Self::weighted(a, b, DEFAULT_EDGE_WEIGHT)
    }

    /// Create an edge with an explicit weight
    pub fn weighted(a: NodeId, b: NodeId, weight: u32) -> SubstrateResult<Self> {
        if a == b {
            return Err(SubstrateError::self_loop(a));
        }
        let (u, v) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { u, v, weight })
    }

    /// Smaller endpoint
    #[inline]
    pub fn u(&self) -> NodeId {
        self.u
    }

    /// Larger endpoint
    #[inline]
    pub fn v(&self) -> NodeId {
        self.v
    }

    /// Endpoints as a canonical pair
    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.u, self.v)
    }

    /// Check if the edge touches `node`
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.u == node || self.v == node
    }

    /// Check if two edges share an endpoint
    pub fn conflicts_with(&self, other: &Edge) -> bool {
        self.touches(other.u) || self.touches(other.v)
    }

    /// Endpoint opposite to `node`, if the edge touches it
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.u {
            Some(self.v)
        } else if node == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}

/// Unvalidated wire form of an edge
#[derive(Deserialize)]
struct RawEdge {
    u: NodeId,
    v: NodeId,
    #[serde(default = "default_weight")]
    weight: u32,
}

fn default_weight() -> u32 {
    DEFAULT_EDGE_WEIGHT
}

impl TryFrom<RawEdge> for Edge {
    type Error = SubstrateError;

    fn try_from(raw: RawEdge) -> Result<Self, Self::Error> {
        Edge::weighted(raw.u, raw.v, raw.weight)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

// ============================================================================
// Tests
// ============================================================================
