//! Checks that `tests/unit` mirrors `src` and that every unit file is compiled

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Entry points and module organization files don't require separate test files
    fn is_exempt(relative_path: &str) -> bool {
        relative_path == "main.rs" || relative_path == "lib.rs" || relative_path.ends_with("mod.rs")
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<BTreeSet<String>, io::Error> {
        let mut paths = BTreeSet::new();

        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();
            let relative_path = path
                .strip_prefix(base)
                .map_err(|_prefix_error| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative_path);
                paths.extend(collect_relative_paths(&path, base)?);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative_path);
            }
        }

        Ok(paths)
    }

    fn tree(dir: &str) -> BTreeSet<String> {
        let root = Path::new(dir);
        collect_relative_paths(root, root)
            .unwrap_or_else(|error| unreachable!("Failed to read {dir}: {error}"))
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let test_paths = tree(UNIT_DIR);
        let missing: Vec<String> = tree(SRC_DIR)
            .into_iter()
            .filter(|path| !is_exempt(path) && !test_paths.contains(path))
            .map(|path| format!("  - src/{path} -> {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src_paths = tree(SRC_DIR);
        let orphaned: Vec<String> = tree(UNIT_DIR)
            .into_iter()
            .filter(|path| !path.ends_with("mod.rs") && !src_paths.contains(path))
            .map(|path| format!("  - {UNIT_DIR}/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    // A unit file not declared in its mod.rs is silently never compiled
    #[test]
    fn test_all_unit_files_are_declared() {
        let mut undeclared = Vec::new();

        for path in tree(UNIT_DIR) {
            let relative = Path::new(&path);
            let Some(stem) = relative.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == "mod" {
                continue;
            }
            let parent = relative.parent().unwrap_or_else(|| Path::new(""));
            let module_file = Path::new(UNIT_DIR).join(parent).join("mod.rs");
            let declarations = fs::read_to_string(&module_file).unwrap_or_default();

            let declared = declarations.lines().any(|line| {
                let line = line.trim();
                line == format!("mod {stem};") || line == format!("pub mod {stem};")
            });
            if !declared {
                undeclared.push(format!("  - {UNIT_DIR}/{path}"));
            }
        }

        assert!(
            undeclared.is_empty(),
            "The following unit test files are not declared in their mod.rs:\n{}",
            undeclared.join("\n")
        );
    }

    #[test]
    fn test_all_unit_files_contain_tests() {
        let without_tests: Vec<String> = tree(UNIT_DIR)
            .into_iter()
            .filter(|path| path.ends_with(".rs") && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(Path::new(UNIT_DIR).join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            without_tests.join("\n")
        );
    }

    // Tests every test and bench crate root carries a crate doc
    // Verified by removing the doc line from the unit test root
    #[test]
    fn test_test_targets_have_crate_docs() {
        let mut roots = vec![
            format!("{UNIT_DIR}/mod.rs"),
            "tests/meta/coverage.rs".to_string(),
        ];
        for entry in fs::read_dir("tests").into_iter().flatten().flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                roots.push(path.to_string_lossy().replace('\\', "/"));
            }
        }
        for entry in fs::read_dir("benches").into_iter().flatten().flatten() {
            roots.push(entry.path().to_string_lossy().replace('\\', "/"));
        }

        let undocumented: Vec<String> = roots
            .into_iter()
            .filter(|root| {
                fs::read_to_string(root)
                    .map(|content| !content.trim_start().starts_with("//!"))
                    .unwrap_or(true)
            })
            .map(|root| format!("  - {root}"))
            .collect();

        assert!(
            undocumented.is_empty(),
            "The following test or bench crate roots lack a //! crate doc:\n{}",
            undocumented.join("\n")
        );
    }
}
