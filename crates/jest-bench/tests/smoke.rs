use std::fs;
use std::path::Path;

use jest_bench::config::BenchmarkConfig;
use jest_bench::tournament::{RunSummary, TournamentRunner};
use sha2::{Digest, Sha256};
use tempfile::tempdir;

fn load_config(output_dir: &Path, extra_rules: &str) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
games:
  seed: 4242
  count: 3
  permutations: 2
{extra_rules}
agents:
  - name: "baseline"
    style: "greedy"
  - name: "shy"
    style: "defensive"
  - name: "dice"
    style: "random"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
metrics:
  baseline: "baseline"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_in(dir: &Path, extra_rules: &str) -> RunSummary {
    let config = load_config(dir, extra_rules);
    let outputs = config.resolved_outputs();
    let runner = TournamentRunner::new(config, outputs).expect("runner created");
    runner.run().expect("tournament completes")
}

fn jsonl_digest(summary: &RunSummary) -> String {
    let jsonl = fs::read(&summary.jsonl_path).expect("jsonl readable");
    let mut hasher = Sha256::new();
    hasher.update(&jsonl);
    hex::encode(hasher.finalize())
}

#[test]
fn tournament_smoke_test_is_reproducible() {
    let first_dir = tempdir().expect("temp dir");
    let second_dir = tempdir().expect("temp dir");

    let first = run_in(first_dir.path(), "");
    let second = run_in(second_dir.path(), "");

    assert_eq!(first.games_played, 3);
    assert_eq!(first.permutations, 2);
    assert_eq!(first.rows_written, 6);
    assert!(first.telemetry_path.is_none());
    assert_eq!(
        jsonl_digest(&first),
        jsonl_digest(&second),
        "same seed must produce byte-identical JSONL"
    );

    assert!(first.summary_path.exists(), "summary markdown missing");
    let markdown = fs::read_to_string(&first.summary_path).expect("summary readable");
    for agent in ["baseline", "shy", "dice"] {
        assert!(markdown.contains(&format!("| {agent} |")), "{agent} row missing");
    }
}

#[test]
fn rows_describe_complete_games() {
    let dir = tempdir().expect("temp dir");
    let rules = "rules:\n  variant:\n    kind: \"quick\"\n    max_rounds: 4\n  extension: \"magic\"";
    let summary = run_in(dir.path(), rules);

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 6);

    for row in &rows {
        assert_eq!(row["run_id"], "test_smoke");
        assert_eq!(row["variant"], "quick");
        assert_eq!(row["extension"], "magic");
        let rounds = row["rounds_played"].as_u64().expect("rounds");
        assert!((1..=4).contains(&rounds));

        let seats = row["seats"].as_array().expect("seats");
        assert_eq!(seats.len(), 3);
        let trophies: usize = seats
            .iter()
            .map(|seat| seat["trophies"].as_array().map_or(0, Vec::len))
            .sum();
        assert!(trophies <= 3);
        assert!(seats.iter().any(|seat| seat["rank"] == 1));
    }

    // Both permutations of a game share the deal seed but move the agents around.
    assert_eq!(rows[0]["game_seed"], rows[1]["game_seed"]);
    assert_ne!(rows[0]["seats"][1]["bot"], rows[1]["seats"][1]["bot"]);
}
