//! Import graph construction and blast-radius queries over temp repositories.

use proptest::prelude::*;
use tempfile::TempDir;

use sdf_analysis::graph::{analyze_blast_radius, BlastRadiusAnalyzer, ImportGraph};
use sdf_core::config::BlastRadiusConfig;
use sdf_core::errors::{GraphError, SdfErrorCode};

fn write(dir: &TempDir, rel: &str, content: &str) {
    let path = dir.path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// a imports b, b imports c.
fn chain_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.py", "import b\n");
    write(&dir, "b.py", "import c\n");
    write(&dir, "c.py", "import os\n");
    dir
}

#[test]
fn test_change_at_top_of_chain_affects_only_itself() {
    let dir = chain_repo();
    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    let r = analyzer.calculate_blast_radius(&["a.py"]);
    assert_eq!(r.directly_affected, 1);
    assert_eq!(r.transitively_affected, 0);
    assert_eq!(r.total_affected, 1);
    assert_eq!(r.affected_files, vec!["a.py"]);
    assert_eq!(r.blast_radius_factor, 1.0);
}

#[test]
fn test_change_at_bottom_of_chain_propagates() {
    let dir = chain_repo();
    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    let r = analyzer.calculate_blast_radius(&["c.py"]);
    assert_eq!(r.directly_affected, 1);
    assert_eq!(r.transitively_affected, 2);
    assert_eq!(r.affected_files, vec!["a.py", "b.py", "c.py"]);
    assert_eq!(r.blast_radius_factor, 3.0);
    assert!(!r.is_high_impact(5.0));
    assert!(r.is_high_impact(2.5));
    assert!(!analyzer.is_high_impact(&r));
}

#[test]
fn test_dependents_and_dependencies() {
    let dir = chain_repo();
    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    assert_eq!(analyzer.get_dependents("c.py"), vec!["a.py", "b.py"]);
    assert!(analyzer.get_dependents("a.py").is_empty());
    // `os` has no file, so it is not reported.
    assert_eq!(analyzer.get_dependencies("a.py"), vec!["b.py", "c.py"]);
    assert!(analyzer.get_dependencies("missing.py").is_empty());
}

#[test]
fn test_changed_file_outside_graph_counts_only_itself() {
    let dir = chain_repo();
    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    let r = analyzer.calculate_blast_radius(&["docs/readme.md", "c.py"]);
    assert_eq!(r.directly_affected, 2);
    assert_eq!(r.total_affected, 4);
    assert_eq!(r.affected_files, vec!["a.py", "b.py", "c.py"]);
    assert_eq!(r.blast_radius_factor, 2.0);
}

#[test]
fn test_empty_change_set() {
    let dir = chain_repo();
    let r = analyze_blast_radius::<&str>(&[], dir.path()).unwrap();
    assert_eq!(r.directly_affected, 0);
    assert_eq!(r.blast_radius_factor, 0.0);
    assert!(r.affected_files.is_empty());
}

#[test]
fn test_absolute_changed_path_under_root() {
    let dir = chain_repo();
    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    let abs = dir.path().join("b.py").display().to_string();
    let r = analyzer.calculate_blast_radius(&[abs]);
    assert_eq!(r.affected_files, vec!["a.py", "b.py"]);
}

#[test]
fn test_packages_and_relative_imports() {
    let dir = TempDir::new().unwrap();
    write(&dir, "pkg/__init__.py", "from .core import run\n");
    write(&dir, "pkg/core.py", "from . import util\n");
    write(&dir, "pkg/util.py", "VALUE = 1\n");
    write(&dir, "app/main.py", "from pkg import core\nimport pkg.util as u\n");

    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    let graph = analyzer.graph();
    assert!(graph.has_path("pkg"));
    assert!(graph.has_path("pkg.core"));
    assert!(graph.has_path("app.main"));

    let r = analyzer.calculate_blast_radius(&["pkg/util.py"]);
    assert_eq!(
        r.affected_files,
        vec!["app/main.py", "pkg/__init__.py", "pkg/core.py", "pkg/util.py"]
    );
}

#[test]
fn test_test_files_and_excluded_dirs_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(&dir, "lib.py", "X = 1\n");
    write(&dir, "test_lib.py", "import lib\n");
    write(&dir, "lib_test.py", "import lib\n");
    write(&dir, "__pycache__/lib.py", "import lib\n");
    write(&dir, "vendor/thing.py", "import lib\n");

    let config = BlastRadiusConfig {
        excluded_dirs: vec!["vendor".to_string(), "__pycache__".to_string()],
        ..Default::default()
    };
    let analyzer = BlastRadiusAnalyzer::from_config(dir.path(), &config).unwrap();
    let stats = analyzer.stats();
    assert_eq!(stats.files, 1);
    assert!(analyzer.get_dependents("lib.py").is_empty());
}

#[test]
fn test_gitignored_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(&dir, ".gitignore", "generated/\n");
    write(&dir, "core.py", "X = 1\n");
    write(&dir, "generated/client.py", "import core\n");

    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    assert!(analyzer.get_dependents("core.py").is_empty());

    let config = BlastRadiusConfig {
        respect_gitignore: Some(false),
        ..Default::default()
    };
    let analyzer = BlastRadiusAnalyzer::from_config(dir.path(), &config).unwrap();
    assert_eq!(analyzer.get_dependents("core.py"), vec!["generated/client.py"]);
}

#[test]
fn test_parse_errors_are_swallowed() {
    let dir = TempDir::new().unwrap();
    write(&dir, "good.py", "import broken\n");
    write(&dir, "broken.py", "def oops(:\n    import good\n");

    let analyzer = BlastRadiusAnalyzer::new(dir.path()).unwrap();
    assert!(analyzer.graph().has_path("good"));
    assert!(!analyzer.graph().has_path("broken"));
    // The broken file is still a node via good's import, just without a path.
    let r = analyzer.calculate_blast_radius(&["broken.py"]);
    assert_eq!(r.affected_files, vec!["good.py"]);
    assert_eq!(r.total_affected, 2);
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    match BlastRadiusAnalyzer::new(&missing) {
        Err(e @ GraphError::RootNotFound { .. }) => assert_eq!(e.error_code(), "GRAPH_ERROR"),
        Err(e) => panic!("unexpected error {e}"),
        Ok(_) => panic!("expected an error"),
    }
}

fn chain_graph(len: usize) -> ImportGraph {
    let mut g = ImportGraph::new();
    for i in 0..len {
        g.set_path(&format!("m{i}"), format!("m{i}.py"));
        if i > 0 {
            g.add_import(&format!("m{}", i - 1), &format!("m{i}"), 1);
        }
    }
    g
}

proptest! {
    #[test]
    fn prop_factor_is_total_over_direct(len in 1usize..12, picks in prop::collection::vec(0usize..12, 0..6)) {
        let analyzer = BlastRadiusAnalyzer::from_graph("/repo", chain_graph(len));
        let changed: Vec<String> = picks.iter().map(|i| format!("m{i}.py")).collect();
        let r = analyzer.calculate_blast_radius(&changed);
        if r.directly_affected == 0 {
            prop_assert_eq!(r.blast_radius_factor, 0.0);
        } else {
            let expected = r.total_affected as f64 / r.directly_affected as f64;
            prop_assert!((r.blast_radius_factor - expected).abs() < 1e-12);
        }
        prop_assert_eq!(r.total_affected, r.directly_affected + r.transitively_affected);
        // Every changed module present in the graph is reported.
        for i in &picks {
            if *i < len {
                let f = format!("m{i}.py");
                prop_assert!(r.affected_files.contains(&f));
            }
        }
    }
}
