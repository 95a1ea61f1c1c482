//! Graph generators for benchmarking
//!
//! Gantree: L5_Benchmark → Generators
//!
//! Standard graph families of the timing matrix. Random families draw from a
//! seeded `StdRng` so every run sees the same graphs.

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use substrate_core::bench::DEFAULT_SEED;
use substrate_core::{NodeId, ResourceGraph, SubstrateResult};

/// Graph generator for benchmarks
/// Gantree: GraphGenerator // 그래프 생성기
pub struct GraphGenerator {
    /// Random seed
    seed: Option<u64>,
}

impl GraphGenerator {
    /// Create new generator (fixed default seed)
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create generator with seed
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn get_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed.unwrap_or(DEFAULT_SEED))
    }

    fn build(n: usize, edges: Vec<(NodeId, NodeId)>) -> SubstrateResult<ResourceGraph> {
        ResourceGraph::new((0..n).collect(), edges)
    }

    // ========================================================================
    // Deterministic Families
    // ========================================================================

    /// Chain `0 - 1 - ... - (n-1)`
    pub fn path(&self, n: usize) -> SubstrateResult<ResourceGraph> {
        let edges = (1..n).map(|i| (i - 1, i)).collect();
        Ok(Self::build(n, edges)?.with_name(format!("path_graph({})", n)))
    }

    /// Ring of `n` nodes
    pub fn cycle(&self, n: usize) -> SubstrateResult<ResourceGraph> {
        let mut edges: Vec<(NodeId, NodeId)> = (1..n).map(|i| (i - 1, i)).collect();
        if n > 2 {
            edges.push((n - 1, 0));
        }
        Ok(Self::build(n, edges)?.with_name(format!("cycle_graph({})", n)))
    }

    /// Every pair connected
    pub fn complete(&self, n: usize) -> SubstrateResult<ResourceGraph> {
        let edges = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        Ok(Self::build(n, edges)?.with_name(format!("complete_graph({})", n)))
    }

    /// Hub `0` joined to `n - 1` leaves (`n` nodes in total)
    pub fn star(&self, n: usize) -> SubstrateResult<ResourceGraph> {
        let edges = (1..n).map(|i| (0, i)).collect();
        Ok(Self::build(n, edges)?.with_name(format!("star_graph({})", n)))
    }

    /// Hub `0` joined to every node of the rim cycle `1..n`
    pub fn wheel(&self, n: usize) -> SubstrateResult<ResourceGraph> {
        let mut edges: Vec<(NodeId, NodeId)> = (1..n).map(|i| (0, i)).collect();
        edges.extend((2..n).map(|i| (i - 1, i)));
        if n > 3 {
            edges.push((n - 1, 1));
        }
        Ok(Self::build(n, edges)?.with_name(format!("wheel_graph({})", n)))
    }

    /// Two `m1`-cliques joined by a path of `m2` nodes (`2*m1 + m2` nodes)
    pub fn barbell(&self, m1: usize, m2: usize) -> SubstrateResult<ResourceGraph> {
        let n = 2 * m1 + m2;
        let clique = |offset: usize| {
            (0..m1).flat_map(move |i| (i + 1..m1).map(move |j| (offset + i, offset + j)))
        };

        let mut edges: Vec<(NodeId, NodeId)> = clique(0).collect();
        if m1 > 0 {
            // bridge: last node of the first clique through the path to the second clique
            edges.extend((m1..=m1 + m2).map(|i| (i - 1, i)));
        }
        edges.extend(clique(m1 + m2));

        Ok(Self::build(n, edges)?.with_name(format!("barbell_graph({}, {})", m1, m2)))
    }

    /// `rows × cols` lattice
    pub fn grid(&self, rows: usize, cols: usize) -> SubstrateResult<ResourceGraph> {
        let mut edges = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let node = r * cols + c;
                if c + 1 < cols {
                    edges.push((node, node + 1));
                }
                if r + 1 < rows {
                    edges.push((node, node + cols));
                }
            }
        }
        Ok(Self::build(rows * cols, edges)?.with_name(format!("grid_graph({}, {})", rows, cols)))
    }

    // ========================================================================
    // Random Families
    // ========================================================================

    /// G(n, p): each pair joined independently with probability `p`
    pub fn erdos_renyi(&self, n: usize, p: f64) -> SubstrateResult<ResourceGraph> {
        let mut rng = self.get_rng();
        let mut edges = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen::<f64>() < p {
                    edges.push((i, j));
                }
            }
        }

        Ok(Self::build(n, edges)?.with_name(format!("erdos_renyi({}, {})", n, p)))
    }
}

impl Default for GraphGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Graph family of the timing matrix
/// Gantree: GraphKind // 그래프 종류
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// `path_graph(n)`
    Path,
    /// `complete_graph(n)`
    Complete,
    /// `star_graph(n)`
    Star,
    /// `wheel_graph(n)`
    Wheel,
    /// `barbell_graph(n / 4, n - 2 * (n / 4))`, exactly `n` nodes
    Barbell,
    /// `erdos_renyi(n, p)`
    ErdosRenyi(f64),
}

impl GraphKind {
    /// Families exercised by the timing matrix
    pub fn matrix() -> Vec<GraphKind> {
        let mut kinds = vec![
            GraphKind::Path,
            GraphKind::Complete,
            GraphKind::Star,
            GraphKind::Wheel,
            GraphKind::Barbell,
        ];
        kinds.extend(
            substrate_core::bench::ER_PROBABILITIES
                .iter()
                .map(|&p| GraphKind::ErdosRenyi(p)),
        );
        kinds
    }

    /// Benchmark name (`path_graph`, `erdos_renyi_0.01`, ...)
    pub fn name(&self) -> String {
        match self {
            GraphKind::Path => "path_graph".to_string(),
            GraphKind::Complete => "complete_graph".to_string(),
            GraphKind::Star => "star_graph".to_string(),
            GraphKind::Wheel => "wheel_graph".to_string(),
            GraphKind::Barbell => "barbell_graph".to_string(),
            GraphKind::ErdosRenyi(p) => format!("erdos_renyi_{}", p),
        }
    }

    /// Build the family member with `n` nodes
    pub fn build(&self, generator: &GraphGenerator, n: usize) -> SubstrateResult<ResourceGraph> {
        match *self {
            GraphKind::Path => generator.path(n),
            GraphKind::Complete => generator.complete(n),
            GraphKind::Star => generator.star(n),
            GraphKind::Wheel => generator.wheel(n),
            GraphKind::Barbell => generator.barbell(n / 4, n - 2 * (n / 4)),
            GraphKind::ErdosRenyi(p) => generator.erdos_renyi(n, p),
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
