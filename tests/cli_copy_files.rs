//! Integration tests for `tsdev copy-files`.

mod common;

use common::TestProject;

fn project_with_assets() -> TestProject {
    let project = TestProject::new();
    project
        .write("src/index.ts", "export const x = 1;\n")
        .write("src/vendor/legacy.js", "module.exports = 1;\n")
        .write("src/example-config.ts", "export default {};\n")
        .write("package.json", "{\"name\":\"app\"}\n");
    project
}

#[test]
fn test_copy_files_copies_js_and_examples() {
    let project = project_with_assets();

    let result = project.run(&["copy-files"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(project.read("dist/vendor/legacy.js"), "module.exports = 1;\n");
    assert_eq!(project.read("dist/example-config.ts"), "export default {};\n");
    assert!(!project.path("dist/index.ts").exists());
    assert!(
        !project.path("dist/package.json").exists(),
        "package.json ships in production only"
    );
}

#[test]
fn test_production_copies_package_json_one_level_up() {
    let project = project_with_assets();

    let result = project.run(&["copy-files", "--production"]);

    assert!(result.success, "{}", result.combined_output());
    let dist = project.workspace().join("dist");
    assert_eq!(
        std::fs::read_to_string(dist.join("package.json")).unwrap(),
        "{\"name\":\"app\"}\n"
    );
    assert!(dist.join("vendor/legacy.js").exists());
    assert!(!project.path("dist").exists());
}

#[test]
fn test_copy_files_json_counts_copies() {
    let project = project_with_assets();

    let result = project.run(&["copy-files", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let complete = result.events_named("copy_complete");
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0]["copied"], 2);
}
