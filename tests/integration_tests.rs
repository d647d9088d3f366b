use beautidir::cli::run_cli_with_config;
/// Integration tests for beautidir
///
/// These tests simulate real-world usage scenarios, testing the complete
/// end-to-end functionality of the beautidir in-place beautifier.
///
/// Test categories:
/// 1. Basic beautification workflows
/// 2. Dispatch and skipping behaviour
/// 3. Exclusion rules
/// 4. Error handling and abort semantics
/// 5. Dry-run mode verification
/// 6. Repeated runs
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// A test fixture that sets up a temporary directory with configurable
/// file structure for testing.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with a temporary directory.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    /// Get the path to the test directory.
    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file with content in the test directory.
    fn create_file(&self, name: &str, content: &str) {
        let file_path = self.path().join(name);
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    /// Create a subdirectory in the test directory.
    fn create_subdir(&self, name: &str) {
        let dir_path = self.path().join(name);
        fs::create_dir(&dir_path).expect("Failed to create subdirectory");
    }

    /// Create multiple files at once.
    fn create_files(&self, files: &[(&str, &str)]) {
        for (name, content) in files {
            self.create_file(name, content);
        }
    }

    /// Read the content of a file at the given relative path.
    fn read_file(&self, rel_path: &str) -> String {
        fs::read_to_string(self.path().join(rel_path)).expect("Failed to read file")
    }

    /// Assert that a file's content is unchanged from the given original.
    fn assert_file_unchanged(&self, rel_path: &str, original: &str) {
        assert_eq!(
            self.read_file(rel_path),
            original,
            "File should be untouched: {}",
            rel_path
        );
    }
}

// ============================================================================
// Test Data: Realistic File Content
// ============================================================================

const MESSY_JS: &str = "function add(a,b){return a+b;}";

const TIDY_JS: &str = "function add(a, b) {\n    return a + b;\n}";

const MESSY_JSON: &str = "{\"name\":\"app\",\"tags\":[1,2]}";

const TIDY_JSON: &str = "{\n  \"name\": \"app\",\n  \"tags\": [\n    1,\n    2\n  ]\n}";

const MESSY_HTML: &str = "<div><p>hi</p></div>";

const TIDY_HTML: &str = "<div>\n  <p>\n    hi\n  </p>\n</div>";

// ============================================================================
// Test Suite 1: Basic Beautification
// ============================================================================

#[test]
fn test_beautify_empty_directory() {
    let fixture = TestFixture::new();

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok(), "Should succeed on empty directory");
}

#[test]
fn test_beautify_javascript_file() {
    let fixture = TestFixture::new();
    fixture.create_file("app.js", MESSY_JS);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok(), "Result error: {:?}", result.err());
    assert_eq!(fixture.read_file("app.js"), TIDY_JS);
}

#[test]
fn test_beautify_json_file() {
    let fixture = TestFixture::new();
    fixture.create_file("package.json", MESSY_JSON);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok());
    assert_eq!(fixture.read_file("package.json"), TIDY_JSON);
}

#[test]
fn test_beautify_html_file() {
    let fixture = TestFixture::new();
    fixture.create_file("index.html", MESSY_HTML);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok());
    assert_eq!(fixture.read_file("index.html"), TIDY_HTML);
}

#[test]
fn test_beautify_nested_directories() {
    let fixture = TestFixture::new();
    fixture.create_subdir("static");
    fixture.create_subdir("static/js");
    fixture.create_files(&[
        ("index.html", MESSY_HTML),
        ("static/config.json", MESSY_JSON),
        ("static/js/app.js", MESSY_JS),
    ]);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok());
    assert_eq!(fixture.read_file("index.html"), TIDY_HTML);
    assert_eq!(fixture.read_file("static/config.json"), TIDY_JSON);
    assert_eq!(fixture.read_file("static/js/app.js"), TIDY_JS);
}

// ============================================================================
// Test Suite 2: Dispatch and Skipping
// ============================================================================

#[test]
fn test_undispatched_extensions_are_untouched() {
    let fixture = TestFixture::new();
    let readme = "# readme\n\nbadly   spaced    text";
    let css = "body{margin:0}";
    fixture.create_files(&[
        ("README.md", readme),
        ("style.css", css),
        ("Makefile", "all:\n\techo hi"),
        ("app.js", MESSY_JS),
    ]);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok());
    fixture.assert_file_unchanged("README.md", readme);
    fixture.assert_file_unchanged("style.css", css);
    fixture.assert_file_unchanged("Makefile", "all:\n\techo hi");
    assert_eq!(fixture.read_file("app.js"), TIDY_JS);
}

#[test]
fn test_uppercase_extensions_are_dispatched() {
    let fixture = TestFixture::new();
    fixture.create_file("DATA.JSON", MESSY_JSON);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok());
    assert_eq!(fixture.read_file("DATA.JSON"), TIDY_JSON);
}

// ============================================================================
// Test Suite 3: Exclusion Rules
// ============================================================================

#[test]
fn test_vendored_jquery_is_skipped_by_default() {
    let fixture = TestFixture::new();
    let minified = "!function(e){var t=e.fn}(jQuery);";
    fixture.create_files(&[
        ("jquery-3.6.0.min.js", minified),
        ("jquery-10.2.33.min.js", minified),
        ("app.js", "var a=1;"),
    ]);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_ok());
    fixture.assert_file_unchanged("jquery-3.6.0.min.js", minified);
    fixture.assert_file_unchanged("jquery-10.2.33.min.js", minified);
    assert_eq!(fixture.read_file("app.js"), "var a = 1;");
}

#[test]
fn test_explicit_config_excludes_by_filename() {
    let fixture = TestFixture::new();

    let config_path = fixture.path().join("rules.toml");
    let config_content = r#"
[exclude]
filenames = ["keep.js"]
"#;
    fs::write(&config_path, config_content).expect("Failed to write config");

    fixture.create_files(&[("keep.js", "var a=1;"), ("other.js", "var b=2;")]);

    let result = run_cli_with_config(fixture.path(), false, Some(&config_path));

    assert!(result.is_ok(), "Result error: {:?}", result.err());
    fixture.assert_file_unchanged("keep.js", "var a=1;");
    assert_eq!(fixture.read_file("other.js"), "var b = 2;");
}

#[test]
fn test_explicit_config_excludes_by_glob() {
    let fixture = TestFixture::new();

    let config_path = fixture.path().join("rules.toml");
    let config_content = r#"
[exclude]
patterns = ["vendor/**"]
"#;
    fs::write(&config_path, config_content).expect("Failed to write config");

    fixture.create_subdir("vendor");
    fixture.create_files(&[("vendor/lib.js", "var v=1;"), ("app.js", "var a=1;")]);

    let result = run_cli_with_config(fixture.path(), false, Some(&config_path));

    assert!(result.is_ok());
    fixture.assert_file_unchanged("vendor/lib.js", "var v=1;");
    assert_eq!(fixture.read_file("app.js"), "var a = 1;");
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let fixture = TestFixture::new();
    fixture.create_file("app.js", "var a=1;");

    let result = run_cli_with_config(
        fixture.path(),
        false,
        Some(Path::new("/nonexistent/rules.toml")),
    );

    assert!(result.is_err());
    fixture.assert_file_unchanged("app.js", "var a=1;");
}

// ============================================================================
// Test Suite 4: Error Handling and Abort Semantics
// ============================================================================

#[test]
fn test_invalid_json_aborts_the_run() {
    let fixture = TestFixture::new();
    fixture.create_files(&[("a_broken.json", "{ not json"), ("z_fine.json", MESSY_JSON)]);

    let result = run_cli_with_config(fixture.path(), false, None);

    let err = result.expect_err("Invalid JSON should abort the run");
    assert!(
        err.contains("a_broken.json"),
        "Error should name the failing file, got: {}",
        err
    );
    assert!(err.contains("invalid JSON"), "got: {}", err);

    // The broken file and everything after it stay untouched
    fixture.assert_file_unchanged("a_broken.json", "{ not json");
    fixture.assert_file_unchanged("z_fine.json", MESSY_JSON);
}

#[test]
fn test_files_before_the_failure_are_written() {
    let fixture = TestFixture::new();
    fixture.create_files(&[("a_first.json", MESSY_JSON), ("m_broken.json", "oops{")]);

    let result = run_cli_with_config(fixture.path(), false, None);

    assert!(result.is_err());
    // Filename order puts a_first.json before m_broken.json
    assert_eq!(fixture.read_file("a_first.json"), TIDY_JSON);
    fixture.assert_file_unchanged("m_broken.json", "oops{");
}

// ============================================================================
// Test Suite 5: Dry-Run Mode
// ============================================================================

#[test]
fn test_dry_run_writes_nothing() {
    let fixture = TestFixture::new();
    fixture.create_files(&[
        ("app.js", MESSY_JS),
        ("data.json", MESSY_JSON),
        ("index.html", MESSY_HTML),
    ]);

    let result = run_cli_with_config(fixture.path(), true, None);

    assert!(result.is_ok());
    fixture.assert_file_unchanged("app.js", MESSY_JS);
    fixture.assert_file_unchanged("data.json", MESSY_JSON);
    fixture.assert_file_unchanged("index.html", MESSY_HTML);
}

#[test]
fn test_dry_run_then_actual_run() {
    let fixture = TestFixture::new();
    fixture.create_file("app.js", MESSY_JS);

    let dry_run_result = run_cli_with_config(fixture.path(), true, None);
    assert!(dry_run_result.is_ok());
    fixture.assert_file_unchanged("app.js", MESSY_JS);

    let actual_result = run_cli_with_config(fixture.path(), false, None);
    assert!(actual_result.is_ok());
    assert_eq!(fixture.read_file("app.js"), TIDY_JS);
}

// ============================================================================
// Test Suite 6: Repeated Runs
// ============================================================================

#[test]
fn test_javascript_and_json_runs_are_stable() {
    let fixture = TestFixture::new();
    fixture.create_files(&[("app.js", MESSY_JS), ("data.json", MESSY_JSON)]);

    let result1 = run_cli_with_config(fixture.path(), false, None);
    assert!(result1.is_ok());
    let js_after_first = fixture.read_file("app.js");
    let json_after_first = fixture.read_file("data.json");

    let result2 = run_cli_with_config(fixture.path(), false, None);
    assert!(result2.is_ok());

    assert_eq!(fixture.read_file("app.js"), js_after_first);
    assert_eq!(fixture.read_file("data.json"), json_after_first);
}

#[test]
fn test_html_indentation_grows_on_repeated_runs() {
    let fixture = TestFixture::new();
    fixture.create_file("page.html", "<div>\nalpha\n  beta\n</div>");

    let result1 = run_cli_with_config(fixture.path(), false, None);
    assert!(result1.is_ok());
    let after_first = fixture.read_file("page.html");
    assert_eq!(after_first, "<div>\n  alpha\n      beta\n</div>");

    let result2 = run_cli_with_config(fixture.path(), false, None);
    assert!(result2.is_ok());
    let after_second = fixture.read_file("page.html");

    // Interior text lines keep their leading whitespace, so the doubling
    // pass compounds across runs.
    assert_ne!(after_first, after_second);
}
