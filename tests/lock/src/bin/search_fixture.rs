//! Binary that runs built-in worlds through the search pipeline and prints
//! deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture [world_id] [config.json]`
//!
//! Without arguments every built-in world runs with the default config.
//! Logs go to stderr (filter with `RUST_LOG`); stdout carries only
//! key=value lines.

use tracing_subscriber::EnvFilter;
use waymark_harness::config::SearchConfigV1;
use waymark_harness::runner::run_world_by_id;
use waymark_harness::worlds::WORLD_IDS;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 3 {
        eprintln!("usage: search_fixture [world_id] [config.json]");
        std::process::exit(1);
    }

    let config = match args.get(2) {
        Some(path) => {
            let text = std::fs::read_to_string(path).expect("failed to read config");
            SearchConfigV1::from_json_str(&text).expect("invalid config JSON")
        }
        None => SearchConfigV1::default(),
    };
    let worlds: Vec<&str> = match args.get(1) {
        Some(id) => vec![id.as_str()],
        None => WORLD_IDS.to_vec(),
    };

    for world_id in worlds {
        let report = run_world_by_id(world_id, &config).expect("search run failed");
        let cost = report
            .plan
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.cost.to_string());
        println!("world={world_id}");
        println!("status={}", report.status.as_str());
        println!("plan_cost={cost}");
        println!("expanded={}", report.statistics.expanded);
        println!("reopened={}", report.statistics.reopened);
        println!("config_digest={}", report.config_digest.as_str());
        println!("report_digest={}", report.digest.as_str());
    }
}
