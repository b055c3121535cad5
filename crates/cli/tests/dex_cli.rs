use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const DATASET: &str = r#"[
  { "id": 1, "name": { "english": "Bulbasaur" }, "type": ["Grass", "Poison"],
    "species": "Seed Pokémon", "evolution": { "next": [["2", "Level 16"]] },
    "image": { "sprite": "s/001.png", "thumbnail": "t/001.png", "hires": "h/001.png" } },
  { "id": 2, "name": { "english": "Ivysaur" }, "type": ["Grass", "Poison"],
    "species": "Seed Pokémon", "evolution": { "prev": ["1", "Level 16"], "next": [["3", "Level 32"]] } },
  { "id": 3, "name": { "english": "Venusaur" }, "type": ["Grass", "Poison"],
    "species": "Seed Pokémon", "evolution": { "prev": ["2", "Level 32"] } },
  { "id": 83, "name": { "english": "Farfetch'd" }, "type": ["Normal", "Flying"],
    "species": "Wild Duck Pokémon", "evolution": {} },
  { "id": 133, "name": { "english": "Eevee" }, "type": ["Normal"],
    "species": "Evolution Pokémon",
    "evolution": { "next": [["134", "Water Stone"], ["135", "Thunder Stone"], ["136", "Fire Stone"]] } },
  { "id": 134, "name": { "english": "Vaporeon" }, "type": ["Water"], "evolution": { "prev": ["133", "Water Stone"] } },
  { "id": 135, "name": { "english": "Jolteon" }, "type": ["Electric"], "evolution": { "prev": ["133", "Thunder Stone"] } },
  { "id": 136, "name": { "english": "Flareon" }, "type": ["Fire"], "evolution": { "prev": ["133", "Fire Stone"] } }
]"#;

fn setup_catalog() -> (TempDir, PathBuf) {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("pokedex.json");
    fs::write(&path, DATASET).expect("write dataset");
    (temp, path)
}

#[allow(deprecated)]
fn dex(catalog: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dex").expect("binary");
    cmd.env_remove("DEX_CATALOG")
        .arg("--quiet")
        .arg("--catalog")
        .arg(catalog);
    cmd
}

fn run_json(catalog: &Path, args: &[&str]) -> Value {
    let output = dex(catalog).args(args).output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn tree_marks_focus_and_path() {
    let (_temp, catalog) = setup_catalog();
    let body = run_json(&catalog, &["tree", "2"]);

    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "Ivysaur");
    assert_eq!(body["family"], "1");

    let tree = &body["tree"];
    assert_eq!(tree["layout"], "linear");
    assert_eq!(tree["total_members"], 3);
    assert_eq!(tree["max_depth"], 2);
    assert_eq!(tree["current_path"], serde_json::json!([1, 2]));

    let root = &tree["roots"][0];
    assert_eq!(root["node"]["id"], 1);
    assert_eq!(root["method"], Value::Null);
    let child = &root["children"][0];
    assert_eq!(child["node"]["name"], "Ivysaur");
    assert_eq!(child["method"], "Level 16");
    assert_eq!(child["is_current"], true);
    assert_eq!(child["children"][0]["is_current"], false);
}

#[test]
fn tree_text_rendering() {
    let (_temp, catalog) = setup_catalog();
    dex(&catalog)
        .args(["tree", "135", "--text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layout: branching"))
        .stdout(predicate::str::contains("#133 Eevee"))
        .stdout(predicate::str::contains("[Thunder Stone] #135 Jolteon *"));
}

#[test]
fn family_lists_nodes_edges_and_bases() {
    let (_temp, catalog) = setup_catalog();
    let body = run_json(&catalog, &["family", "136"]);

    assert_eq!(body["id"], "133");
    assert_eq!(body["base_ids"], serde_json::json!([133]));
    assert_eq!(body["edges"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["nodes"].as_object().map(|m| m.len()), Some(4));
    assert_eq!(body["nodes"]["134"]["name"], "Vaporeon");
}

#[test]
fn chain_follows_first_successor() {
    let (_temp, catalog) = setup_catalog();
    let body = run_json(&catalog, &["chain", "3"]);

    let ids: Vec<u64> = body["chain"]
        .as_array()
        .expect("chain array")
        .iter()
        .filter_map(|l| l["node"]["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(body["chain"][2]["is_current"], true);
}

#[test]
fn families_can_filter_by_layout() {
    let (_temp, catalog) = setup_catalog();

    let all = run_json(&catalog, &["families"]);
    assert_eq!(all.as_array().map(Vec::len), Some(3));

    let branching = run_json(&catalog, &["families", "--layout", "branching"]);
    let families = branching.as_array().expect("array");
    assert_eq!(families.len(), 1);
    assert_eq!(families[0]["family"], "133");
    assert_eq!(families[0]["members"], 4);
    assert_eq!(families[0]["placed"], 4);
}

#[test]
fn stats_summarize_catalog() {
    let (_temp, catalog) = setup_catalog();
    let body = run_json(&catalog, &["stats"]);

    assert_eq!(body["records"], 8);
    assert_eq!(body["families"], 3);
    assert_eq!(body["edges"], 5);
    assert_eq!(body["layouts"]["linear"], 2);
    assert_eq!(body["layouts"]["branching"], 1);
    assert_eq!(body["unreachable_members"], serde_json::json!([]));
}

#[test]
fn show_returns_raw_record() {
    let (_temp, catalog) = setup_catalog();
    let body = run_json(&catalog, &["show", "83"]);
    assert_eq!(body["name"]["english"], "Farfetch'd");
    assert_eq!(body["type"], serde_json::json!(["Normal", "Flying"]));
}

#[test]
fn unknown_id_fails_with_not_found() {
    let (_temp, catalog) = setup_catalog();
    dex(&catalog)
        .args(["tree", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pokemon 999 not found"));
}

#[test]
fn catalog_path_from_environment() {
    let (_temp, catalog) = setup_catalog();
    #[allow(deprecated)]
    let output = Command::cargo_bin("dex")
        .expect("binary")
        .env("DEX_CATALOG", &catalog)
        .args(["--quiet", "family", "83"])
        .output()
        .expect("command run");

    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["id"], "83");
}

#[test]
fn missing_catalog_is_reported() {
    let temp = tempdir().expect("tempdir");
    dex(&temp.path().join("absent.json"))
        .args(["stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read catalog"));
}
