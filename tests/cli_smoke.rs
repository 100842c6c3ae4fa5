use assert_cmd::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const TODAY: &str = "2024-06-12";

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

/// Commit a change with both author and committer time pinned to `when`.
fn commit_at(dir: &Path, name: &str, content: &str, when: &str) {
    commit_with_dates(dir, name, content, when, when);
}

fn commit_with_dates(dir: &Path, name: &str, content: &str, authored: &str, committed: &str) {
    let path = dir.join(name);
    let mut f = File::options().create(true).append(true).open(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "."]);
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("touch {name}")])
        .env("GIT_AUTHOR_DATE", authored)
        .env("GIT_COMMITTER_DATE", committed)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

/// alpha: two commits on 2024-06-10, one on 2024-06-11.
/// beta: one commit on 2024-06-10, one long before the window.
fn populate(root: &Path) {
    let alpha = root.join("alpha");
    init_git_repo(&alpha);
    commit_at(&alpha, "a.txt", "1\n", "2024-06-10 09:00:00 +0000");
    commit_at(&alpha, "a.txt", "2\n", "2024-06-10 17:30:00 +0000");
    commit_at(&alpha, "a.txt", "3\n", "2024-06-11 08:00:00 +0000");

    let beta = root.join("beta");
    init_git_repo(&beta);
    commit_at(&beta, "b.txt", "1\n", "2020-01-01 12:00:00 +0000");
    commit_at(&beta, "b.txt", "2\n", "2024-06-10 12:00:00 +0000");

    fs::create_dir_all(root.join("notes")).unwrap();
    fs::write(root.join("README.md"), "not a repository\n").unwrap();
}

fn commitmap(root: &Path, rc: &Path) -> Command {
    let mut cmd = Command::cargo_bin("commitmap").unwrap();
    cmd.arg("--root")
        .arg(root)
        .arg("--config")
        .arg(rc)
        .args(["--today", TODAY, "--no-progress"]);
    cmd
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn map_json_counts_commits_in_window() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("repos");
    populate(&root);

    let v = json_of(commitmap(&root, &dir.path().join("rc")).args(["map", "--json"]));
    assert_eq!(v["status"], "ready");
    assert_eq!(v["today"], TODAY);
    assert_eq!(v["window_start"], "2023-06-11");
    assert_eq!(v["rows"], 7);
    assert_eq!(v["columns"], 53);
    assert_eq!(v["total_commits"], 4);

    let days = v["days"].as_array().unwrap();
    assert_eq!(days.len(), 368);
    let busiest = days.iter().find(|d| d["date"] == "2024-06-10").unwrap();
    assert_eq!(busiest["count"], 3);
    assert_eq!(busiest["row"], 1);
    assert_eq!(busiest["column"], 52);
    assert_eq!(busiest["level"], 1);
    assert!(days.iter().all(|d| d["date"] != "2020-01-01"));

    let repos: Vec<&str> = v["repositories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["repo"].as_str().unwrap())
        .collect();
    assert_eq!(repos, vec!["alpha", "beta"]);
}

#[test]
fn git_log_source_agrees_with_gix() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("repos");
    populate(&root);
    let rc = dir.path().join("rc");

    let gix = json_of(commitmap(&root, &rc).args(["scan", "--json"]));
    let cli = json_of(commitmap(&root, &rc).args(["--source", "git", "scan", "--json"]));
    assert_eq!(gix["total_commits"], 5);
    assert_eq!(gix["repositories"], cli["repositories"]);
    assert_eq!(gix["total_commits"], cli["total_commits"]);
}

#[test]
fn commits_land_on_their_author_date() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("repos");
    let rebased = root.join("rebased");
    init_git_repo(&rebased);
    commit_with_dates(
        &rebased,
        "r.txt",
        "1\n",
        "2024-06-01 10:00:00 +0000",
        "2024-06-10 10:00:00 +0000",
    );
    let rc = dir.path().join("rc");

    for source in ["gix", "git"] {
        let day = |date: &str| {
            json_of(commitmap(&root, &rc).args(["--source", source, "day", date, "--json"]))
        };
        assert_eq!(day("2024-06-01")["total"], 1, "{source}");
        assert_eq!(day("2024-06-10")["total"], 0, "{source}");
    }
}

#[test]
fn day_and_cell_drill_down() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("repos");
    populate(&root);
    let rc = dir.path().join("rc");

    let day = json_of(commitmap(&root, &rc).args(["day", "2024-06-10", "--json"]));
    assert_eq!(day["available"], true);
    assert_eq!(day["total"], 3);
    assert_eq!(
        day["repositories"],
        serde_json::json!([
            {"repo": "alpha", "commits": 2},
            {"repo": "beta", "commits": 1}
        ])
    );

    let cell = json_of(commitmap(&root, &rc).args(["cell", "--row", "1", "--column", "52", "--json"]));
    assert_eq!(cell, day);

    // Saturday after today has no day behind it.
    let future = json_of(commitmap(&root, &rc).args(["cell", "--row", "6", "--column", "52", "--json"]));
    assert_eq!(future["available"], false);

    let out = commitmap(&root, &rc)
        .args(["day", TODAY])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(out).unwrap().trim(),
        "2024-06-12: No commits on this day."
    );
}

#[test]
fn broken_repository_is_skipped() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("repos");
    populate(&root);
    fs::create_dir_all(root.join("zombie").join(".git")).unwrap();

    let v = json_of(commitmap(&root, &dir.path().join("rc")).args(["scan", "--json"]));
    assert_eq!(v["status"], "ready");
    let zombie = v["repositories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["repo"] == "zombie")
        .unwrap();
    assert_eq!(zombie["outcome"], "skipped");
    assert!(!zombie["reason"].as_str().unwrap().is_empty());
}

#[test]
fn empty_and_missing_roots_report_no_repositories() {
    let dir = tempdir().unwrap();
    let rc = dir.path().join("rc");
    let empty = dir.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    let v = json_of(commitmap(&empty, &rc).args(["map", "--json"]));
    assert_eq!(v["status"], "no_repositories");
    assert_eq!(v["days"].as_array().unwrap().len(), 0);

    let missing = dir.path().join("missing");
    let v = json_of(commitmap(&missing, &rc).args(["map", "--json"]));
    assert_eq!(v["status"], "no_repositories");
    assert!(v["root_error"].is_string());

    let out = commitmap(&empty, &rc)
        .arg("map")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(out)
        .unwrap()
        .starts_with("No repositories found in"));
}

#[test]
fn repositories_without_commits_report_no_commits() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let root = dir.path().join("repos");
    init_git_repo(&root.join("fresh"));

    let v = json_of(commitmap(&root, &dir.path().join("rc")).args(["map", "--json"]));
    assert_eq!(v["status"], "no_commits");
}

#[test]
fn root_is_remembered_unless_no_save() {
    let dir = tempdir().unwrap();
    let rc = dir.path().join("rc");
    let root = dir.path().join("repos");
    fs::create_dir_all(&root).unwrap();
    fs::write(&rc, r#"{"server": "example.com"}"#).unwrap();

    commitmap(&root, &rc)
        .args(["--no-save", "scan", "--json"])
        .assert()
        .success();
    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(&rc).unwrap()).unwrap();
    assert!(stored.get("local_repo_base").is_none());

    commitmap(&root, &rc).args(["scan", "--json"]).assert().success();
    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(&rc).unwrap()).unwrap();
    assert_eq!(stored["local_repo_base"], root.to_string_lossy().as_ref());
    assert_eq!(stored["server"], "example.com");

    // Later runs fall back to the stored root.
    let v = json_of(
        Command::cargo_bin("commitmap")
            .unwrap()
            .arg("--config")
            .arg(&rc)
            .args(["--today", TODAY, "scan", "--json"]),
    );
    assert_eq!(v["root"], root.to_string_lossy().as_ref());
}

#[test]
fn unparsable_settings_survive_a_run() {
    let dir = tempdir().unwrap();
    let rc = dir.path().join("rc");
    let root = dir.path().join("repos");
    fs::create_dir_all(&root).unwrap();
    let original = r#"{"server":"example.com","port":"22","heatmap_shading":"Fixed"}"#;
    fs::write(&rc, original).unwrap();

    commitmap(&root, &rc).args(["scan", "--json"]).assert().success();
    assert_eq!(fs::read_to_string(&rc).unwrap(), original);
}

#[test]
fn config_commands_round_trip() {
    let dir = tempdir().unwrap();
    let rc = dir.path().join("rc");

    let config = |args: &[&str]| {
        let mut cmd = Command::cargo_bin("commitmap").unwrap();
        cmd.arg("--config").arg(&rc).arg("config").args(args);
        cmd
    };

    config(&["set-thresholds", "0,2,4"]).assert().success();
    config(&["set-shading", "normalized"]).assert().success();
    config(&["set-thresholds", "4,2"]).assert().failure();
    config(&["set-thresholds", "0,4294967295"]).assert().failure();
    config(&["set-root", dir.path().join("nope").to_str().unwrap()])
        .assert()
        .failure();

    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(&rc).unwrap()).unwrap();
    assert_eq!(stored["heatmap_thresholds"], serde_json::json!([0, 2, 4]));
    assert_eq!(stored["heatmap_shading"], "normalized");

    let out = config(&["show"]).assert().success().get_output().stdout.clone();
    assert!(String::from_utf8(out).unwrap().contains("heatmap_shading"));
}

#[test]
fn thresholds_flag_changes_legend_and_rejects_bad_lists() {
    let dir = tempdir().unwrap();
    let rc = dir.path().join("rc");
    let root = dir.path().join("repos");
    fs::create_dir_all(&root).unwrap();

    let v = json_of(commitmap(&root, &rc).args(["--thresholds", "0,1,2", "map", "--json"]));
    let labels: Vec<&str> = v["legend"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["0", "1", "2", "3+"]);

    commitmap(&root, &rc)
        .args(["--thresholds", "5,1", "map", "--json"])
        .assert()
        .failure();
}

#[test]
fn missing_root_setting_is_an_error() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("commitmap")
        .unwrap()
        .arg("--config")
        .arg(dir.path().join("rc"))
        .args(["scan"])
        .assert()
        .failure();
}
