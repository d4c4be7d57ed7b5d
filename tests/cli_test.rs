//! CLI integration tests for the schemalint binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("schemalint"))
}

// Helper to create a temp schema file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const CLEAN: &str = r#"{"type": "object", "properties": {"id": {"type": "string"}}}"#;

const BAD_UNION: &str = r#"{
    "$defs": {
        "BadUnion": {
            "anyOf": [
                {"type": "object", "properties": {"name": {"type": "string"}}},
                {"type": "object", "properties": {"title": {"type": "string"}}}
            ]
        }
    }
}"#;

const TAGGED_PAIR: &str = r#"{
    "oneOf": [
        {"type": "object", "properties": {"type": {"const": "a"}}},
        {"type": "object", "properties": {"type": {"const": "b"}}}
    ]
}"#;

mod lint_command {
    use super::*;

    #[test]
    fn clean_schema() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout("✅ No issues found\n");
    }

    #[test]
    fn errors_exit_one() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", BAD_UNION);

        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "[error] $/$defs/BadUnion/anyOf: anyOf union has no discriminator field",
            ))
            .stdout(predicate::str::contains("  suggestion: Add a const property"))
            .stdout(predicate::str::contains("Summary: 1 error(s), 0 warning(s)"));
    }

    #[test]
    fn warnings_exit_two() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", TAGGED_PAIR);

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--max-union-variants", "1"])
            .assert()
            .code(2)
            .stdout(predicate::str::contains(
                "[warning] $/oneOf: Union has 2 variants (threshold: 1)",
            ))
            .stdout(predicate::str::contains("Summary: 0 error(s), 1 warning(s)"));
    }

    #[test]
    fn max_union_depth_flag() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", TAGGED_PAIR);

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--max-union-depth", "0"])
            .assert()
            .code(2)
            .stdout(predicate::str::contains(
                "Union nested 1 levels deep (threshold: 0)",
            ));
    }

    #[test]
    fn discriminator_field_flag() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"anyOf": [
                {"type": "object", "properties": {"variant": {"const": "a"}}},
                {"type": "object", "properties": {"variant": {"const": "b"}}}
            ]}"#,
        );

        // Not a default candidate
        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .assert()
            .code(1);

        cmd()
            .args([
                "lint",
                schema.to_str().unwrap(),
                "--discriminator-field",
                "variant",
            ])
            .assert()
            .success();
    }

    #[test]
    fn scale_profile() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type": "object", "anyOf": [{"type": "string"}]}"#,
        );

        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .assert()
            .success();

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--profile", "scale"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "[error] $/anyOf: anyOf is disallowed in scale profile",
            ))
            .stdout(predicate::str::contains("missing explicit type").not());
    }

    #[test]
    fn property_case() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type": "object", "properties": {"myProperty": {"type": "string"}}}"#,
        );

        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .assert()
            .success();

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--property-case", "snake_case"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "Property 'myProperty' is not in snake_case",
            ));

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--property-case", "none"])
            .assert()
            .success();
    }

    #[test]
    fn verbose_logs_to_stderr() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        cmd()
            .args(["-v", "lint", schema.to_str().unwrap()])
            .env_remove("RUST_LOG")
            .assert()
            .success()
            .stdout("✅ No issues found\n")
            .stderr(predicate::str::contains("lint complete"));
    }

    #[test]
    fn quiet_by_default() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .env_remove("RUST_LOG")
            .assert()
            .success()
            .stderr("");
    }
}

mod output_formats {
    use super::*;

    #[test]
    fn json_output() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", BAD_UNION);

        let output = cmd()
            .args(["lint", schema.to_str().unwrap(), "--output", "json"])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_path"], schema.to_str().unwrap());
        let issues = value["issues"].as_array().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0]["code"], "union-no-discriminator");
        assert_eq!(issues[0]["severity"], "error");
        assert_eq!(issues[0]["path"], "$/$defs/BadUnion/anyOf");
        assert_eq!(issues[0]["type_name"], "BadUnion");
    }

    #[test]
    fn json_output_clean() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        let output = cmd()
            .args(["lint", schema.to_str().unwrap(), "-o", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["issues"], serde_json::json!([]));
    }

    #[test]
    fn github_output() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", BAD_UNION);
        let expected = format!(
            "::error file={}::union-no-discriminator - anyOf union has no discriminator field\n",
            schema.display()
        );

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--output", "github"])
            .assert()
            .code(1)
            .stdout(expected);
    }

    #[test]
    fn unknown_output_format() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--output", "xml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("xml"));
    }
}

mod multiple_inputs {
    use super::*;

    #[test]
    fn directory_is_searched_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        write_temp_file(&dir, "a.json", CLEAN);
        write_temp_file(&dir, "nested/b.json", BAD_UNION);
        write_temp_file(&dir, "notes.txt", "not a schema");

        cmd()
            .args(["lint", dir.path().to_str().unwrap()])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("a.json\n✅ No issues found"))
            .stdout(predicate::str::contains("b.json\n[error] $/$defs/BadUnion/anyOf"))
            .stdout(predicate::str::contains("notes.txt").not());
    }

    #[test]
    fn worst_status_wins() {
        let dir = TempDir::new().unwrap();
        let warn = write_temp_file(&dir, "warn.json", TAGGED_PAIR);
        let clean = write_temp_file(&dir, "clean.json", CLEAN);

        cmd()
            .args([
                "lint",
                clean.to_str().unwrap(),
                warn.to_str().unwrap(),
                "--max-union-variants",
                "1",
            ])
            .assert()
            .code(2);

        let error = write_temp_file(&dir, "error.json", BAD_UNION);
        cmd()
            .args([
                "lint",
                warn.to_str().unwrap(),
                error.to_str().unwrap(),
                "--max-union-variants",
                "1",
            ])
            .assert()
            .code(1);
    }

    #[test]
    fn json_output_is_an_array() {
        let dir = TempDir::new().unwrap();
        let first = write_temp_file(&dir, "first.json", CLEAN);
        let second = write_temp_file(&dir, "second.json", BAD_UNION);

        let output = cmd()
            .args([
                "lint",
                first.to_str().unwrap(),
                second.to_str().unwrap(),
                "--output",
                "json",
            ])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let results = value.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["schema_path"], first.to_str().unwrap());
        assert_eq!(results[1]["issues"][0]["code"], "union-no-discriminator");
    }

    #[test]
    fn empty_directory_warns() {
        let dir = TempDir::new().unwrap();

        cmd()
            .args(["lint", dir.path().to_str().unwrap()])
            .assert()
            .success()
            .stderr(predicate::str::contains("no .json files found"));
    }

    #[test]
    fn hard_failure_prints_no_results() {
        let dir = TempDir::new().unwrap();
        let good = write_temp_file(&dir, "good.json", BAD_UNION);
        let broken = write_temp_file(&dir, "broken.json", "{ not json");

        cmd()
            .args(["lint", good.to_str().unwrap(), broken.to_str().unwrap()])
            .assert()
            .code(3)
            .stdout("");
    }
}

mod config_file {
    use super::*;

    #[test]
    fn discovered_from_working_directory() {
        let dir = TempDir::new().unwrap();
        write_temp_file(&dir, "schema.json", r#"{"properties": {"myProperty": {}}}"#);
        write_temp_file(&dir, "schemalint.toml", "property_case = \"snake_case\"\n");

        cmd()
            .current_dir(dir.path())
            .args(["lint", "schema.json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("not in snake_case"));
    }

    #[test]
    fn flags_override_file() {
        let dir = TempDir::new().unwrap();
        write_temp_file(&dir, "schema.json", r#"{"properties": {"myProperty": {}}}"#);
        write_temp_file(&dir, "schemalint.toml", "property_case = \"snake_case\"\n");

        cmd()
            .current_dir(dir.path())
            .args(["lint", "schema.json", "--property-case", "camelCase"])
            .assert()
            .success();
    }

    #[test]
    fn explicit_config_path() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", TAGGED_PAIR);
        let config = write_temp_file(&dir, "strict.toml", "max_union_variants = 1\n");

        cmd()
            .args([
                "lint",
                schema.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("threshold: 1"));
    }

    #[test]
    fn invalid_config_exits_three() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);
        let config = write_temp_file(&dir, "bad.toml", "max_union_variants = \"many\"\n");

        cmd()
            .args([
                "lint",
                schema.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("bad.toml"));
    }

    #[test]
    fn missing_config_exits_four() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        cmd()
            .args([
                "lint",
                schema.to_str().unwrap(),
                "--config",
                dir.path().join("missing.toml").to_str().unwrap(),
            ])
            .assert()
            .code(4);
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn invalid_json_exits_three() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", "{ not valid json }");

        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("failed to parse JSON Schema"));
    }

    #[test]
    fn wrong_keyword_shape_exits_three() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", r#"{"properties": []}"#);

        cmd()
            .args(["lint", schema.to_str().unwrap()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("invalid schema at /properties"));
    }

    #[test]
    fn missing_file_exits_four() {
        cmd()
            .args(["lint", "/nonexistent/path/schema.json"])
            .assert()
            .code(4)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn unknown_profile_exits_three() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--profile", "strict"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains(
                "unknown profile: strict (use 'default' or 'scale')",
            ));
    }

    #[test]
    fn unknown_property_case_exits_three() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", CLEAN);

        cmd()
            .args(["lint", schema.to_str().unwrap(), "--property-case", "UPPER"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("UPPER"));
    }
}

mod required_args {
    use super::*;

    #[test]
    fn lint_requires_path() {
        cmd()
            .arg("lint")
            .assert()
            .failure()
            .stderr(predicate::str::contains("PATHS"));
    }

    #[test]
    fn subcommand_required() {
        cmd().assert().failure();
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn help_flag() {
        cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "JSON Schema linter for static type compatibility",
            ));
    }

    #[test]
    fn version_flag() {
        cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("schemalint"));
    }

    #[test]
    fn version_command() {
        cmd()
            .arg("version")
            .assert()
            .success()
            .stdout(format!("schemalint version {}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn lint_help() {
        cmd()
            .args(["lint", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--profile"))
            .stdout(predicate::str::contains("--property-case"))
            .stdout(predicate::str::contains("--discriminator-field"))
            .stdout(predicate::str::contains("Exit codes:"));
    }
}

mod fixtures {
    use super::*;

    #[test]
    fn animals_fixture_is_clean() {
        cmd()
            .args(["lint", "tests/fixtures/animals.json"])
            .assert()
            .success()
            .stdout("✅ No issues found\n");
    }

    #[test]
    fn animals_fixture_scale_profile() {
        cmd()
            .args(["lint", "tests/fixtures/animals.json", "--profile", "scale"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "$/properties/nickname/anyOf: anyOf is disallowed in scale profile",
            ))
            .stdout(predicate::str::contains(
                "$/$defs/Animal/oneOf: oneOf is disallowed in scale profile",
            ));
    }

    #[test]
    fn payments_fixture() {
        let output = cmd()
            .args(["lint", "tests/fixtures/payments.json", "--output", "json"])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let found: Vec<(&str, &str)> = value["issues"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| (i["code"].as_str().unwrap(), i["path"].as_str().unwrap()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("invalid-property-case", "$/properties/payment_method"),
                ("union-no-discriminator", "$/$defs/PaymentMethod/anyOf"),
                ("additional-properties", "$/$defs/PaymentMethod/anyOf/1"),
                ("union-no-discriminator", "$/$defs/Refund/oneOf"),
                ("duplicate-const-value", "$/$defs/Refund/oneOf/1/properties/kind"),
            ]
        );
    }

    #[test]
    fn fixture_directory() {
        cmd()
            .args(["lint", "tests/fixtures"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("==> tests/fixtures/animals.json"))
            .stdout(predicate::str::contains("==> tests/fixtures/payments.json"))
            .stdout(predicate::str::contains("Summary: 4 error(s), 1 warning(s)"));
    }
}

#[cfg(feature = "remote")]
mod remote {
    use super::*;

    #[test]
    fn lint_from_url() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/schemas/pet.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BAD_UNION)
            .create();
        let url = format!("{}/schemas/pet.json", server.url());

        cmd()
            .args(["lint", &url, "--output", "github"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(format!(
                "::error file={}::union-no-discriminator",
                url
            )));

        mock.assert();
    }

    #[test]
    fn url_404_exits_four() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/missing.json").with_status(404).create();
        let url = format!("{}/missing.json", server.url());

        cmd()
            .args(["lint", &url])
            .assert()
            .code(4)
            .stderr(predicate::str::contains("failed to fetch"));
    }

    #[test]
    fn url_with_invalid_body_exits_three() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/broken.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();
        let url = format!("{}/broken.json", server.url());

        cmd()
            .args(["lint", &url])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("failed to parse JSON Schema"));
    }
}
