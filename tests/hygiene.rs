//! Hygiene — enforces coding standards at test time.
//!
//! Scans the crate's `src/` tree for antipatterns and holds each to a
//! budget. The nonzero budgets cover the `cfg(not(feature = "hydrate"))`
//! stub arms and the localStorage acquisition chain, which discard by
//! contract. A budget never grows: to add an instance, fix an existing one
//! first.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    note: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics — these crash the client.
    Budget { pattern: ".unwrap()", max: 0, note: "propagate or degrade instead" },
    Budget { pattern: ".expect(", max: 0, note: "propagate or degrade instead" },
    Budget { pattern: "panic!(", max: 0, note: "propagate or degrade instead" },
    Budget { pattern: "unreachable!(", max: 0, note: "propagate or degrade instead" },
    Budget { pattern: "todo!(", max: 0, note: "no unfinished stubs" },
    Budget { pattern: "unimplemented!(", max: 0, note: "no unfinished stubs" },
    // Silent loss — discards errors without inspecting.
    Budget { pattern: "let _ =", max: 4, note: "non-hydrate stub arms only" },
    Budget { pattern: ".ok()", max: 1, note: "localStorage acquisition only" },
    // Structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, note: "delete dead code instead" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding sibling test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        if path.extension().is_none_or(|e| e != "rs") {
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn source_tree_is_scanned() {
    assert!(!source_files().is_empty(), "hygiene scan found no source files");
}

#[test]
fn pattern_budgets_hold() {
    let files = source_files();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        assert!(
            count <= budget.max,
            "`{}` budget exceeded: found {count}, max {} ({}).\n{}",
            budget.pattern,
            budget.max,
            budget.note,
            format_hits(&found)
        );
    }
}
