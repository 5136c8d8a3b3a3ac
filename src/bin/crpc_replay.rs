// CRPC Replay Runner — seeded walk-throughs of all six phases
// Aggregates verification outcomes across runs and checks ring consistency
//
// Usage:
//   cargo run --release --bin crpc_replay                       # 30 runs, 6 nodes
//   cargo run --release --bin crpc_replay -- --runs 200         # More runs
//   cargo run --release --bin crpc_replay -- --nodes 12         # Larger ring
//   cargo run --release --bin crpc_replay -- --seed 42          # Custom base seed
//   cargo run --release --bin crpc_replay -- --manual 10,25,40  # Fixed node values

use crpc_engine::*;
use serde::Serialize;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    nodes: u32,
    manual: Option<Vec<i64>>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        nodes: 6,
        manual: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--nodes" => {
                i += 1;
                if i < args.len() {
                    cli.nodes = args[i].parse().unwrap_or(6);
                }
            }
            "--manual" => {
                i += 1;
                if i < args.len() {
                    let values: Vec<i64> = args[i]
                        .split(',')
                        .filter_map(|v| v.trim().parse().ok())
                        .collect();
                    cli.manual = Some(values);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Report Types ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
struct Stats {
    mean: f64,
    std_dev: f64,
    ci_lower: f64,
    ci_upper: f64,
    min: f64,
    max: f64,
    n: usize,
}

impl Stats {
    fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    seed: u64,
    validated: usize,
    disputed: usize,
    delta_sum: Option<i64>,
    consistent: bool,
    max_abs_delta: i64,
    final_state: SimulationState,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    timestamp: String,
    version: &'static str,
    prng: &'static str,
    nodes: u32,
    runs: usize,
    base_seed: u64,
    manual_values: Option<Vec<i64>>,
    validated_rate: Stats,
    max_abs_delta: Stats,
    inconsistent_runs: usize,
    results: Vec<RunResult>,
}

// ─── Runs ───────────────────────────────────────────────────────────────────

fn run_single(nodes: u32, seed: u64, manual: Option<&[i64]>) -> Result<RunResult, SimError> {
    let mut sim = SimulationController::with_config(SimulationConfig {
        node_count: nodes,
        seed: Some(seed),
        ..SimulationConfig::default()
    })?;

    if let Some(values) = manual {
        sim.set_random_values(false);
        for (i, value) in values.iter().enumerate() {
            sim.set_manual_value(&format!("node-{}", i), *value)?;
        }
    }

    // Commit, then walk to Verification.
    while sim.advance_phase() {}

    let state = sim.state().clone();
    let validated = state.nodes.iter().filter(|n| n.status == NodeStatus::Validated).count();
    let disputed = state.nodes.iter().filter(|n| n.status == NodeStatus::Disputed).count();
    let delta_sum = ring_delta_sum(&state.edges);
    let max_abs_delta = state.edges.iter().filter_map(|e| e.delta).map(i64::abs).max().unwrap_or(0);

    Ok(RunResult {
        seed,
        validated,
        disputed,
        delta_sum,
        consistent: delta_sum == Some(0),
        max_abs_delta,
        final_state: state,
    })
}

fn write_report(report: &ReplayReport) -> std::io::Result<std::path::PathBuf> {
    let dir = std::path::Path::new("replay-results");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("replay-{}.json", report.timestamp));
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(&path, json)?;
    Ok(path)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();

    println!("\n  CRPC Replay Runner v{}", env!("CARGO_PKG_VERSION"));
    println!("  PRNG: ChaCha8Rng | Runs: {} | Nodes: {} | Base seed: {}",
        cli.runs, cli.nodes, cli.seed);
    println!("  {:<8} {:>10} {:>9} {:>10} {:>9}",
        "Seed", "Validated", "Disputed", "DeltaSum", "MaxDelta");
    println!("  {}", "-".repeat(52));

    let start = Instant::now();
    let mut results = Vec::with_capacity(cli.runs);
    for run in 0..cli.runs {
        let seed = cli.seed.wrapping_add(run as u64);
        match run_single(cli.nodes, seed, cli.manual.as_deref()) {
            Ok(result) => {
                println!("  {:<8} {:>10} {:>9} {:>10} {:>9}",
                    result.seed,
                    result.validated,
                    result.disputed,
                    result.delta_sum.map_or_else(|| "-".to_string(), |d| d.to_string()),
                    result.max_abs_delta,
                );
                results.push(result);
            }
            Err(e) => {
                eprintln!("  run {} failed: {}", seed, e);
                std::process::exit(1);
            }
        }
    }
    let elapsed = start.elapsed();

    let validated_rate: Vec<f64> = results
        .iter()
        .map(|r| r.validated as f64 / (r.validated + r.disputed).max(1) as f64)
        .collect();
    let max_delta: Vec<f64> = results.iter().map(|r| r.max_abs_delta as f64).collect();
    let inconsistent_runs = results.iter().filter(|r| !r.consistent).count();

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    let report = ReplayReport {
        timestamp: format!("{}", ts),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        nodes: cli.nodes,
        runs: cli.runs,
        base_seed: cli.seed,
        manual_values: cli.manual.clone(),
        validated_rate: Stats::from_samples(&validated_rate),
        max_abs_delta: Stats::from_samples(&max_delta),
        inconsistent_runs,
        results,
    };

    println!("  {}", "-".repeat(52));
    println!("  Validated rate: {:.3} ± {:.3}  (expected {:.1})",
        report.validated_rate.mean,
        (report.validated_rate.ci_upper - report.validated_rate.ci_lower) / 2.0,
        SimulationConfig::default().validation_probability);
    println!("  Ring consistency: {} / {} runs sum to zero",
        cli.runs - inconsistent_runs, cli.runs);
    println!("  Time: {:.1} ms\n", elapsed.as_secs_f64() * 1000.0);

    match write_report(&report) {
        Ok(path) => println!("  Results saved to: {}\n", path.display()),
        Err(e) => {
            eprintln!("  Failed to write report: {}", e);
            std::process::exit(1);
        }
    }

    if inconsistent_runs > 0 {
        std::process::exit(1);
    }
}
