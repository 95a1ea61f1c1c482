//! Benchmark reporting
//!
//! Gantree: L5_Benchmark → Reporter
//!
//! Markdown, JSON, CSV and plain-text renderings of benchmark results.

use crate::suite::{BenchmarkResult, BenchmarkStatistics};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Markdown table
    Markdown,
    /// JSON
    Json,
    /// CSV
    Csv,
    /// Plain text summary
    Text,
}

/// Benchmark reporter
/// Gantree: Reporter // 결과 리포팅
pub struct Reporter;

impl Reporter {
    // ========================================================================
    // Format Converters
    // ========================================================================

    /// Generate report in specified format
    pub fn report(results: &[BenchmarkResult], format: ReportFormat) -> String {
        match format {
            ReportFormat::Markdown => Self::to_markdown(results),
            ReportFormat::Json => Self::to_json(results),
            ReportFormat::Csv => Self::to_csv(results),
            ReportFormat::Text => Self::to_text(results),
        }
    }

    /// Convert results to Markdown table
    pub fn to_markdown(results: &[BenchmarkResult]) -> String {
        let mut output = String::new();

        writeln!(output, "# Substrate Scheduler Timing\n").unwrap();

        let stats = BenchmarkStatistics::from_results(results);
        writeln!(output, "## Summary\n").unwrap();
        writeln!(output, "- **Benchmarks**: {}", stats.count).unwrap();
        writeln!(
            output,
            "- **At Lower Bound**: {}/{}",
            stats.optimal_count, stats.count
        )
        .unwrap();
        writeln!(output, "- **Avg Gap**: {:.2} rounds", stats.avg_gap).unwrap();
        writeln!(
            output,
            "- **Budget Exceeded**: {:.1}%",
            stats.budget_exceeded_rate * 100.0
        )
        .unwrap();
        writeln!(output, "- **Total Time**: {:.2}ms\n", stats.total_time_ms).unwrap();

        writeln!(output, "## Detailed Results\n").unwrap();
        writeln!(
            output,
            "| Name | Nodes | Edges | Rounds | Bound | Gap | Iters | Budget | Time(ms) |"
        )
        .unwrap();
        writeln!(
            output,
            "|------|-------|-------|--------|-------|-----|-------|--------|----------|"
        )
        .unwrap();

        for r in results {
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {:.3} |",
                r.name,
                r.num_nodes,
                r.num_edges,
                r.rounds,
                r.lower_bound,
                r.optimality_gap,
                r.iterations,
                if r.budget_exceeded { "✗" } else { "-" },
                r.time_ms()
            )
            .unwrap();
        }

        output
    }

    /// Convert results to JSON
    pub fn to_json(results: &[BenchmarkResult]) -> String {
        let stats = BenchmarkStatistics::from_results(results);

        let report = serde_json::json!({
            "statistics": stats,
            "results": results,
        });

        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Convert results to CSV
    pub fn to_csv(results: &[BenchmarkResult]) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "name,n,kind,strategy,pre_mapping,nodes,edges,rounds,lower_bound,gap,iterations,budget_exceeded,time_us"
        )
        .unwrap();

        for r in results {
            writeln!(
                output,
                "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                r.name,
                r.case.n,
                r.case.kind,
                r.case.strategy,
                r.case.pre_mapping,
                r.num_nodes,
                r.num_edges,
                r.rounds,
                r.lower_bound,
                r.optimality_gap,
                r.iterations,
                r.budget_exceeded,
                r.time_us
            )
            .unwrap();
        }

        output
    }

    /// Convert results to plain text summary
    pub fn to_text(results: &[BenchmarkResult]) -> String {
        let mut output = String::new();
        let stats = BenchmarkStatistics::from_results(results);

        writeln!(output, "Substrate Scheduler Timing").unwrap();
        writeln!(output, "==========================\n").unwrap();

        writeln!(output, "Summary:").unwrap();
        writeln!(output, "  Benchmarks run: {}", stats.count).unwrap();
        writeln!(output, "  At lower bound: {}", stats.optimal_count).unwrap();
        writeln!(output, "  Largest gap: {}", stats.max_gap).unwrap();
        writeln!(output, "  Slowest case: {:.3}ms", stats.max_time_ms).unwrap();
        writeln!(output, "  Total time: {:.3}ms\n", stats.total_time_ms).unwrap();

        writeln!(output, "Individual Results:").unwrap();
        for r in results {
            writeln!(
                output,
                "  {}: {} rounds (bound {}), {:.3}ms{}",
                r.name,
                r.rounds,
                r.lower_bound,
                r.time_ms(),
                if r.budget_exceeded { " [budget exceeded]" } else { "" }
            )
            .unwrap();
        }

        output
    }

    // ========================================================================
    // Specialized Reports
    // ========================================================================

    /// Compare two result sets (e.g. plain vs pre-mapped)
    pub fn comparison_report(baseline: &[BenchmarkResult], candidate: &[BenchmarkResult]) -> String {
        let mut output = String::new();

        writeln!(output, "# Substrate Scheduler Comparison\n").unwrap();

        let base = BenchmarkStatistics::from_results(baseline);
        let cand = BenchmarkStatistics::from_results(candidate);

        writeln!(output, "| Metric | Baseline | Candidate | Change |").unwrap();
        writeln!(output, "|--------|----------|-----------|--------|").unwrap();
        writeln!(
            output,
            "| Avg Gap | {:.2} | {:.2} | {:+.2} |",
            base.avg_gap,
            cand.avg_gap,
            cand.avg_gap - base.avg_gap
        )
        .unwrap();
        writeln!(
            output,
            "| At Lower Bound | {} | {} | {:+} |",
            base.optimal_count,
            cand.optimal_count,
            cand.optimal_count as i64 - base.optimal_count as i64
        )
        .unwrap();
        writeln!(
            output,
            "| Avg Time (ms) | {:.3} | {:.3} | {:+.3} |",
            base.avg_time_ms,
            cand.avg_time_ms,
            cand.avg_time_ms - base.avg_time_ms
        )
        .unwrap();

        output
    }

    /// Time and rounds per size for each family/strategy
    pub fn size_scaling_report(results: &[BenchmarkResult]) -> String {
        let mut output = String::new();

        writeln!(output, "# Size Scaling Analysis\n").unwrap();
        writeln!(output, "| N | Edges | Rounds | Time(ms) | Time/Edge(us) |").unwrap();
        writeln!(output, "|---|-------|--------|----------|---------------|").unwrap();

        let mut sorted: Vec<&BenchmarkResult> = results.iter().collect();
        sorted.sort_by_key(|r| r.case.n);

        for r in sorted {
            let per_edge = if r.num_edges == 0 {
                0.0
            } else {
                r.time_us as f64 / r.num_edges as f64
            };
            writeln!(
                output,
                "| {} | {} | {} | {:.3} | {:.2} |",
                r.case.n,
                r.num_edges,
                r.rounds,
                r.time_ms(),
                per_edge
            )
            .unwrap();
        }

        output
    }
}

// ============================================================================
// Tests
// ============================================================================
