//! Cross-process determinism: the `search_fixture` binary prints the same
//! lines under different working directories, locales, log filters and
//! unrelated environment variables.

use std::path::Path;
use std::process::Command;

use waymark_kernel::proof::hash::ContentHash;

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_search_fixture");

    let mut command = Command::new(bin);
    command.current_dir(work_dir).args(args);
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn all_worlds_identical_across_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[], &[]);

    assert!(baseline.contains("world=diamond\nstatus=solved\nplan_cost=2\n"));
    assert!(baseline.contains("world=unreachable\nstatus=failed\nplan_cost=none\n"));
    assert!(baseline.contains("world=maze_9x7\nstatus=solved\nplan_cost=26\n"));
    let digests: Vec<ContentHash> = baseline
        .lines()
        .filter_map(|l| l.strip_prefix("report_digest="))
        .map(|d| ContentHash::parse(d).expect("digest line parses"))
        .collect();
    assert_eq!(digests.len(), 8, "one report per built-in world");
    assert!(digests
        .iter()
        .all(|d| d.algorithm() == "sha256" && d.hex_digest().len() == 64));
    assert!(baseline.contains("config_digest=sha256:"));

    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    assert_eq!(
        baseline,
        run_variant(alt_cwd, &[], &[]),
        "output differs when cwd changes from {root} to {alt_cwd}"
    );
    assert_eq!(
        baseline,
        run_variant(&root, &[], &[("LC_ALL", "C"), ("LANG", "C")]),
        "output differs when LC_ALL=C LANG=C"
    );
    // Debug logging goes to stderr and must not disturb stdout.
    assert_eq!(
        baseline,
        run_variant(&root, &[], &[("RUST_LOG", "debug")]),
        "output differs with RUST_LOG=debug"
    );
    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[],
            &[
                ("WAYMARK_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("HOME", "/nonexistent"),
            ],
        ),
        "output differs with spurious env vars"
    );
}

#[test]
fn config_file_changes_config_digest_only_where_expected() {
    let root = workspace_root();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lazy.json");
    std::fs::write(&path, br#"{"lazy": "d"}"#).expect("write config");
    let path = path.to_string_lossy().to_string();

    let default = run_variant(&root, &["lazy_distance"], &[]);
    let lazy_a = run_variant(&root, &["lazy_distance", &path], &[]);
    let lazy_b = run_variant("/tmp", &["lazy_distance", &path], &[("LC_ALL", "C")]);

    assert_eq!(lazy_a, lazy_b);
    assert_ne!(default, lazy_a);
    // Same plan either way.
    assert!(default.contains("plan_cost=4\n"));
    assert!(lazy_a.contains("plan_cost=4\n"));
}
