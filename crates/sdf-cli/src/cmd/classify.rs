use std::path::Path;

use sdf_analysis::QuartetDetector;

use super::files_or_staged;
use crate::output::print_json;

pub fn run(root: &Path, files: Vec<String>, json: bool) -> anyhow::Result<()> {
    let files = files_or_staged(root, files)?;
    let detector = QuartetDetector::new();

    if json {
        let classified: Vec<_> = files
            .iter()
            .map(|f| serde_json::json!({ "path": f, "classification": detector.classify(f) }))
            .collect();
        let quartet = detector.detect_from_changes(&files);
        return print_json(&serde_json::json!({
            "files": classified,
            "quartet": quartet,
            "issues": detector.validate(&quartet),
        }));
    }

    for file in &files {
        println!("{:<8} {file}", detector.classify(file).as_str());
    }

    let quartet = detector.detect_from_changes(&files);
    let issues = detector.validate(&quartet);
    if !issues.is_empty() {
        println!();
        for issue in &issues {
            println!("  ! {issue}");
        }
    }
    Ok(())
}
