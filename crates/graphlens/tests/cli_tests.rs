//! Integration tests for the graphlens CLI.
//!
//! These run the built binary end to end inside temporary directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use graphlens::domain::AnyNetwork;
use rstest::{fixture, rstest};
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn run_graphlens(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphlens"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute graphlens binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const TRIANGLE_PLUS_ISOLATED: &str = r#"graph [
  node [ id 0 label "a" ]
  node [ id 1 label "b" ]
  node [ id 2 label "c" ]
  node [ id 3 label "d" ]
  edge [ source 0 target 1 ]
  edge [ source 1 target 2 ]
  edge [ source 2 target 0 ]
]
"#;

// ============================================================================
// Graph source
// ============================================================================

#[rstest]
fn no_source_prints_guidance_and_succeeds(temp_dir: TempDir) {
    let output = run_graphlens(temp_dir.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("--input"));
    assert!(stdout(&output).contains("--create_random_graph"));
}

#[rstest]
#[case(&["ten", "1.0"], "for n")]
#[case(&["10", "abc"], "for c")]
#[case(&["0", "1.0"], "for n")]
#[case(&["10", "-1"], "for c")]
fn malformed_generator_arguments_fail(
    temp_dir: TempDir,
    #[case] values: &[&str],
    #[case] expected: &str,
) {
    let mut args = vec!["--create_random_graph"];
    args.extend_from_slice(values);
    args.push("--output");
    args.push("out.gml");

    let output = run_graphlens(temp_dir.path(), &args);

    assert!(!output.status.success());
    assert!(stderr(&output).contains(expected), "stderr: {}", stderr(&output));
    assert!(!temp_dir.path().join("out.gml").exists());
}

#[rstest]
fn missing_and_malformed_input_are_distinguished(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("bad.gml"), "graph [ node [ id 0 ").unwrap();

    let missing = run_graphlens(temp_dir.path(), &["--input", "absent.gml", "--analyze"]);
    let malformed = run_graphlens(temp_dir.path(), &["--input", "bad.gml", "--analyze"]);

    assert!(!missing.status.success());
    assert!(!malformed.status.success());
    assert!(stderr(&missing).contains("not found"));
    assert!(stderr(&malformed).contains("could not read"));
    assert!(stderr(&malformed).contains("caused by"));
}

// ============================================================================
// Stages
// ============================================================================

#[rstest]
fn analyze_reports_triangle_plus_isolated(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("g.gml"), TRIANGLE_PLUS_ISOLATED).unwrap();

    let output = run_graphlens(temp_dir.path(), &["--input", "g.gml", "--analyze"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Results Of Analyzing Graph"));
    assert!(text.contains("There are 2 connected components"));
    assert!(text.contains("There is a cycle."));
    assert!(text.contains("There are 1 isolated nodes"));
    assert!(text.contains("The graph is not connected"));
}

#[rstest]
fn analyze_json_is_machine_readable(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("g.gml"), TRIANGLE_PLUS_ISOLATED).unwrap();

    let output = run_graphlens(temp_dir.path(), &["--input", "g.gml", "--analyze", "--json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["connected_components"], 2);
    assert_eq!(value["has_cycle"], true);
}

#[rstest]
fn unknown_bfs_root_fails(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("g.gml"), TRIANGLE_PLUS_ISOLATED).unwrap();

    let output = run_graphlens(temp_dir.path(), &["--input", "g.gml", "--multi_BFS", "zz"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("'zz'"));
}

#[rstest]
fn bfs_prints_levels_and_renders_panels(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("g.gml"), TRIANGLE_PLUS_ISOLATED).unwrap();

    let output = run_graphlens(
        temp_dir.path(),
        &["--input", "g.gml", "--multi_BFS", "a", "d", "--figure-dir", "figs"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("BFS levels from root a"));
    assert!(text.contains("BFS levels from root d"));
    let svg = fs::read_to_string(temp_dir.path().join("figs/bfs_trees.svg")).unwrap();
    assert!(svg.contains("BFS tree from root a"));
}

#[rstest]
fn plot_writes_graph_figure(temp_dir: TempDir) {
    let output = run_graphlens(
        temp_dir.path(),
        &["--create_random_graph", "12", "1.0", "--seed", "1", "--plot"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(temp_dir.path().join("graph.svg").exists());
}

#[rstest]
fn output_is_enriched_gml(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("g.gml"), TRIANGLE_PLUS_ISOLATED).unwrap();

    let output = run_graphlens(
        temp_dir.path(),
        &["--input", "g.gml", "--multi_BFS", "a", "--output", "out.gml"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = fs::read_to_string(temp_dir.path().join("out.gml")).unwrap();
    assert!(text.contains("component"));
    assert!(text.contains("isolated 1"));
    assert!(text.contains("dist_from_a"));

    let AnyNetwork::Undirected(net) =
        graphlens::io::load(&temp_dir.path().join("out.gml")).unwrap()
    else {
        panic!("expected an undirected graph");
    };
    assert_eq!(net.node_count(), 4);
    assert_eq!(net.edge_count(), 3);
}

#[rstest]
fn seeded_generation_is_reproducible(temp_dir: TempDir) {
    let args = |out: &'static str| {
        [
            "--create_random_graph",
            "20",
            "1.5",
            "--seed",
            "11",
            "--output",
            out,
        ]
    };

    assert!(run_graphlens(temp_dir.path(), &args("one.gml")).status.success());
    assert!(run_graphlens(temp_dir.path(), &args("two.gml")).status.success());

    let one = fs::read_to_string(temp_dir.path().join("one.gml")).unwrap();
    let two = fs::read_to_string(temp_dir.path().join("two.gml")).unwrap();
    assert_eq!(one, two);
}

#[rstest]
fn invalid_config_fails(temp_dir: TempDir) {
    fs::write(temp_dir.path().join("render.yaml"), "width: 1\n").unwrap();

    let output = run_graphlens(
        temp_dir.path(),
        &["--create_random_graph", "5", "1", "--plot", "--config", "render.yaml"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("width"));
}
