//! Assay command-line entrypoint.
//!
//! Reads an assessment request as JSON on stdin and prints the assessment as JSON:
//!
//! ```text
//! echo '{"content": "...", "sources": [...], "subject": "..."}' | assay [--preset fast]
//! echo '{"content": "..."}' | assay --benchmark 50
//! ```
//!
//! Without `--preset`, configuration comes from `ASSAY_*` environment variables.

use std::io::Read;

use anyhow::Context;
use mimalloc::MiMalloc;

use assay::config::{Config, Preset};
use assay::engine::{AssessmentRequest, QualityEngine};
use assay::monitor::Benchmark;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: assay [--preset default|fast|precision] [--benchmark ITERATIONS] < request.json";

#[derive(Debug, Default)]
struct Args {
    preset: Option<Preset>,
    benchmark: Option<usize>,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = Args::default();
    let mut raw = std::env::args().skip(1);

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--preset" => {
                let value = raw.next().context("--preset needs a value")?;
                args.preset = Some(value.parse()?);
            }
            "--benchmark" => {
                let value = raw.next().context("--benchmark needs an iteration count")?;
                args.benchmark = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid iteration count '{value}'"))?,
                );
            }
            other => anyhow::bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }

    Ok(Some(args))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args()? else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let request: AssessmentRequest =
        serde_json::from_str(&input).context("request is not valid JSON")?;

    if let Some(iterations) = args.benchmark {
        tracing::info!(iterations, "Comparing configuration presets");
        let results = Benchmark::compare_presets(&request, iterations).await?;
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let config = match args.preset {
        Some(preset) => Config::preset(preset),
        None => Config::from_env()?,
    };
    tracing::info!(
        parallel = config.enable_parallel_processing,
        stage_gating = config.enable_stage_gating,
        threshold = config.stage_gate_threshold,
        "Assay starting"
    );

    let engine = QualityEngine::new(config)?;
    let assessment = engine
        .assess_quality(&request.content, &request.sources, &request.subject)
        .await;
    engine.shutdown();

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
