//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! domain is pure, application only knows ports, infra never renders.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of every file under `src/<layer>` that
/// contain any of `needles`.
fn find_in_layer(layer: &str, needles: &[&str], skip_files: &[&str]) -> Vec<String> {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut violations = Vec::new();

    for file in collect_rs_files(&manifest.join("src").join(layer)) {
        let rel = file
            .strip_prefix(manifest)
            .unwrap_or(&file)
            .display()
            .to_string();
        if skip_files.iter().any(|skip| rel.ends_with(skip)) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };

        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            for needle in needles {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{}: `{needle}`: {trimmed}", i + 1));
                }
            }
        }
    }
    violations
}

#[test]
fn domain_is_pure() {
    let violations = find_in_layer(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::output",
            "tokio",
            "std::fs",
            "std::process",
        ],
        &[],
    );
    assert!(
        violations.is_empty(),
        "domain/ must not perform I/O or import outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_depends_only_on_domain() {
    let violations = find_in_layer(
        "application",
        &["crate::infra", "crate::output", "crate::cli", "crate::app::", "std::fs"],
        &["test_support.rs"],
    );
    assert!(
        violations.is_empty(),
        "application/ must only use domain and ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_cli_or_output() {
    let violations = find_in_layer("infra", &["crate::cli", "crate::output", "crate::app::"], &[]);
    assert!(
        violations.is_empty(),
        "infra/ must not import from cli or output:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let violations = find_in_layer("infra", &["println!", "eprintln!"], &[]);
    assert!(
        violations.is_empty(),
        "infra/ must not use println!/eprintln! outside #[cfg(test)]:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_take_trait_bounds_not_adapters() {
    let violations = find_in_layer(
        "application",
        &[
            "TokioCommandRunner",
            "AptPackageManager",
            "StatusFile",
            "HostFs",
        ],
        &[],
    );
    assert!(
        violations.is_empty(),
        "application/ must use port traits, not concrete adapters:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_unwrap_in_production_code() {
    for layer in ["domain", "application", "infra", "output"] {
        let violations = find_in_layer(layer, &[".unwrap()"], &["test_support.rs", "tests.rs"]);
        assert!(
            violations.is_empty(),
            "{layer}/ must propagate errors instead of unwrapping:\n{}",
            violations.join("\n")
        );
    }
}
