//! Substrate Scheduler Timing Benchmark
//!
//! Runs the timing matrix and prints the report.
//!
//! Usage: `scheduler_benchmark [markdown|json|csv|text] [SIZE ...]`
//! (defaults: `text`, sizes 10 and 100).

use anyhow::{bail, Context};
use substrate_bench::prelude::*;
use substrate_core::bench::DEFAULT_SEED;

fn parse_format(arg: &str) -> anyhow::Result<ReportFormat> {
    Ok(match arg {
        "markdown" | "md" => ReportFormat::Markdown,
        "json" => ReportFormat::Json,
        "csv" => ReportFormat::Csv,
        "text" => ReportFormat::Text,
        other => bail!("unknown report format '{}'", other),
    })
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let format = match args.next() {
        Some(arg) => parse_format(&arg)?,
        None => ReportFormat::Text,
    };

    let mut sizes = args
        .map(|s| s.parse::<usize>().with_context(|| format!("invalid size '{}'", s)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if sizes.is_empty() {
        sizes = vec![10, 100];
    }

    eprintln!("Configuration:");
    eprintln!("  • Sizes: {:?}", sizes);
    eprintln!("  • Families: {:?}", GraphKind::matrix().iter().map(GraphKind::name).collect::<Vec<_>>());
    eprintln!("  • Random seed: {}", DEFAULT_SEED);
    eprintln!();

    let mut suite = BenchSuite::with_seed(DEFAULT_SEED);
    let results = suite.run_matrix(&sizes).context("benchmark run failed")?;

    println!("{}", Reporter::report(&results, format));

    if format == ReportFormat::Markdown {
        let (mapped, plain): (Vec<BenchmarkResult>, Vec<BenchmarkResult>) =
            results.iter().cloned().partition(|r| r.case.pre_mapping);
        println!("{}", Reporter::comparison_report(&plain, &mapped));
        println!("{}", Reporter::size_scaling_report(&plain));
    }

    Ok(())
}
