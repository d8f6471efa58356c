use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::{TempDir, tempdir};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_recipe-query")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

fn fixture() -> (TempDir, String) {
    let dir = tempdir().expect("temp dir");
    let data = dir.path().join("recipes.json");
    write_file(
        &data,
        r#"[
            {"id": 1, "title": "Sweet Potato Pie", "cuisine": "Southern Recipes", "rating": 4.8,
             "total_time": 115, "description": "A classic", "nutrients": {"calories": "389 kcal"}},
            {"id": 2, "title": "Peach Cobbler", "rating": null, "total_time": 60,
             "description": "Summer dessert", "nutrients": {"calories": "520 kcal"}},
            {"id": 3, "title": "Apple Pie", "rating": 4.2, "total_time": 45,
             "description": "Autumn dessert"}
        ]"#,
    );
    let data = data.to_str().expect("utf8 path").to_string();
    (dir, data)
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .env_remove("RUST_LOG")
        .env_remove("RECIPES_CONFIG")
        .args(args)
        .output()
        .expect("command should run")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_search_json_output_applies_filters() {
    let (_dir, data) = fixture();
    let output = run(&[
        "--data",
        &data,
        "--format",
        "json",
        "search",
        "--calories",
        "lte:400",
    ]);

    let body = stdout_json(&output);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["id"], 1);
}

#[test]
fn test_list_json_output_is_sorted_with_unrated_last() {
    let (_dir, data) = fixture();
    let output = run(&["--data", &data, "--format", "json", "list"]);

    let body = stdout_json(&output);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn test_list_rejects_limit_above_configured_max() {
    let (dir, data) = fixture();
    let config = dir.path().join("config.toml");
    write_file(&config, "[paging]\nmax_limit = 2\n");

    let output = run(&[
        "--data",
        &data,
        "--config",
        config.to_str().unwrap(),
        "list",
        "--limit",
        "3",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("limit must be at most 2"), "stderr: {stderr}");
}

#[test]
fn test_search_accepts_limit_above_listing_max() {
    let (dir, data) = fixture();
    let config = dir.path().join("config.toml");
    write_file(&config, "[paging]\nmax_limit = 2\n");

    let output = run(&[
        "--data",
        &data,
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
        "search",
        "--limit",
        "500",
    ]);

    let body = stdout_json(&output);
    assert_eq!(body["limit"], 500);
    assert_eq!(body["total"], 3);
}

#[test]
fn test_get_missing_recipe_fails() {
    let (_dir, data) = fixture();
    let output = run(&["--data", &data, "get", "99"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Recipe 99 not found"));
}

#[test]
fn test_get_text_output_shows_recipe() {
    let (_dir, data) = fixture();
    let output = run(&["--data", &data, "get", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sweet Potato Pie"));
    assert!(stdout.contains("389 kcal"));
}

#[test]
fn test_missing_data_file_reports_path() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("nope.json");
    let output = run(&["--data", missing.to_str().unwrap(), "list"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.json"));
}
