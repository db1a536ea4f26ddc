//! Criterion benchmarks for the assessment pipeline.
//!
//! Covers individual evaluators, the aggregator, and end-to-end
//! `assess_quality` with the assessment cache warm and disabled.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

use assay::config::{Config, Preset};
use assay::engine::QualityEngine;
use assay::evaluators::{ConsistencyMode, EvaluationInput, EvaluatorSet};
use assay::scoring::{QualityDimension, ScoreAggregator};
use assay::source::{Source, SourceReliabilityAnalyzer};

const SUBJECT: &str = "solid-state batteries";

fn bench_content() -> String {
    let mut content = String::from(
        "The technology relies on a sulfide electrolyte architecture and its implementation \
         uses a dry-room process. The market is expected to reach $120 billion by 2030, with \
         demand growing 25% per year according to BloombergNEF. Key risks include dendrite \
         formation and supply limitations. In conclusion, the approach is promising.",
    );
    while content.len() < 2_000 {
        content.push_str(" Engineers continue to refine the design.");
    }
    content
}

fn bench_sources() -> Vec<Source> {
    vec![
        Source::new("https://nature.com/articles/1", "Peer-reviewed journal study", "nature.com")
            .with_snippet("doi 10.1038/s41586-024-0001"),
        Source::new("https://energy.gov/report", "Battery research report", "energy.gov"),
        Source::new("https://reuters.com/markets", "Industry analysis", "reuters.com"),
        Source::new("https://randomblog.net/post", "Opinion blog post", "randomblog.net"),
    ]
}

fn bench_evaluators(c: &mut Criterion) {
    let analyzer = Arc::new(SourceReliabilityAnalyzer::uncached());
    let evaluators = EvaluatorSet::canonical(analyzer, ConsistencyMode::Standard);
    let input = EvaluationInput::new(bench_content(), bench_sources(), SUBJECT);

    let mut group = c.benchmark_group("evaluators");
    for evaluator in evaluators.iter() {
        group.bench_function(evaluator.kind().display_name(), |b| {
            b.iter(|| black_box(evaluator.evaluate(black_box(&input))));
        });
    }
    group.finish();
}

fn bench_aggregator(c: &mut Criterion) {
    let analyzer = Arc::new(SourceReliabilityAnalyzer::uncached());
    let evaluators = EvaluatorSet::canonical(analyzer, ConsistencyMode::Standard);
    let input = EvaluationInput::new(bench_content(), bench_sources(), SUBJECT);
    let dimensions: Vec<QualityDimension> =
        evaluators.iter().map(|e| e.evaluate(&input)).collect();
    let aggregator = ScoreAggregator::new();

    c.bench_function("aggregate_four_dimensions", |b| {
        b.iter(|| black_box(aggregator.compile(black_box(dimensions.clone()), 4)));
    });
}

fn bench_assess_quality(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let content = bench_content();
    let sources = bench_sources();

    let mut group = c.benchmark_group("assess_quality");

    let cached = QualityEngine::new(Config::default()).unwrap();
    group.bench_function("cache_warm", |b| {
        b.iter(|| {
            runtime.block_on(async {
                black_box(cached.assess_quality(&content, &sources, SUBJECT).await)
            })
        });
    });

    for preset in Preset::ALL {
        let engine = QualityEngine::new(Config {
            enable_caching: false,
            ..Config::preset(preset)
        })
        .unwrap();
        group.bench_function(format!("uncached_{preset}"), |b| {
            b.iter(|| {
                runtime.block_on(async {
                    black_box(engine.assess_quality(&content, &sources, SUBJECT).await)
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluators, bench_aggregator, bench_assess_quality);
criterion_main!(benches);
