//! End-to-end tests for the `monoseed` binary.
//!
//! Every test stays offline: dry runs skip the connectivity check, clone,
//! and install, and the update check is disabled through the environment.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn monoseed(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("monoseed");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("MONOSEED_NO_UPDATE_CHECK", "1")
        .env_remove("RUST_LOG")
        .env_remove("MONOSEED_CONFIG_FILE");
    cmd
}

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("monoseed.toml");
    fs::write(&path, contents).unwrap();
    path
}

// ── surface ───────────────────────────────────────────────────────────────────

#[test]
fn help_lists_flags_and_completions() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--skip-install"))
        .stdout(predicate::str::contains("--package-manager"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("monoseed"));
}

#[test]
fn unknown_license_is_an_argument_error() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["demo", "--license", "WTFPL", "--dry-run"])
        .assert()
        .code(2);
}

// ── user errors ───────────────────────────────────────────────────────────────

#[test]
fn conflicting_presets_exit_with_user_error() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["demo", "--all", "--minimal", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be combined"));
}

#[test]
fn invalid_project_name_exits_with_user_error() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["Bad Name", "--minimal", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name 'Bad Name'"));
}

#[test]
fn missing_name_without_terminal_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["--minimal", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("A project name is required"));
}

#[test]
fn existing_target_without_force_fails_even_in_dry_run() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("demo")).unwrap();

    monoseed(temp.path())
        .args(["demo", "--minimal", "--dry-run"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));
}

// ── dry run ───────────────────────────────────────────────────────────────────

#[test]
fn dry_run_prints_plan_and_creates_nothing() {
    let temp = TempDir::new().unwrap();

    monoseed(temp.path())
        .args(["demo", "--worker", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would: git clone --depth 1"))
        .stdout(predicate::str::contains("would: remove apps/api (api not selected)"))
        .stdout(predicate::str::contains("would: bun install"))
        .stdout(predicate::str::contains("nothing was changed"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn dry_run_with_force_keeps_existing_target() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("demo");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep.txt"), "mine").unwrap();

    monoseed(temp.path())
        .args(["demo", "--minimal", "--force", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would: remove existing"));

    assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "mine");
}

#[test]
fn skip_flags_drop_their_actions() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["demo", "--minimal", "--skip-install", "--skip-git", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("install").not())
        .stdout(predicate::str::contains("git init").not());
}

#[test]
fn quiet_dry_run_prints_nothing() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["demo", "--all", "--dry-run", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn json_output_is_the_serialized_result() {
    let temp = TempDir::new().unwrap();
    let assert = monoseed(temp.path())
        .args(["demo", "--rag", "--dry-run", "--output-format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["dry_run"], true);
    assert!(json["error"].is_null());
    let actions = json["actions"].as_array().unwrap();
    assert!(
        actions
            .iter()
            .any(|a| a["description"] == "create packages/rag/package.json")
    );
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn config_file_supplies_template_and_package_manager() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        r#"
[defaults]
package_manager = "pnpm"

[template]
repository = "https://example.invalid/starter.git"
"#,
    );

    monoseed(temp.path())
        .arg("--config-file")
        .arg(&config)
        .args(["demo", "--minimal", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "would: git clone --depth 1 https://example.invalid/starter.git",
        ))
        .stdout(predicate::str::contains("would: pnpm install"));
}

#[test]
fn flag_overrides_configured_package_manager() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "[defaults]\npackage_manager = \"pnpm\"\n");

    monoseed(temp.path())
        .arg("--config-file")
        .arg(&config)
        .args(["demo", "--minimal", "--dry-run", "-p", "npm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would: npm install"));
}

#[test]
fn invalid_config_value_exits_with_configuration_error() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "[defaults]\nlicense = \"WTFPL\"\n");

    monoseed(temp.path())
        .arg("--config-file")
        .arg(&config)
        .args(["demo", "--minimal", "--dry-run"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_config_file_exits_with_configuration_error() {
    let temp = TempDir::new().unwrap();
    monoseed(temp.path())
        .args(["--config-file", "absent.toml", "demo", "--minimal", "--dry-run"])
        .assert()
        .code(4);
}

#[test]
fn environment_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "[defaults]\npackage_manager = \"pnpm\"\n");

    monoseed(temp.path())
        .arg("--config-file")
        .arg(&config)
        .env("MONOSEED__DEFAULTS__PACKAGE_MANAGER", "yarn")
        .args(["demo", "--minimal", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would: yarn install"));
}

// ── real runs against stand-in tools ──────────────────────────────────────────

/// Put executable stand-ins for `git` and `bun` in `<dir>/bin`. The `git`
/// clone writes a tiny template; `bun install` always fails.
#[cfg(unix)]
fn stand_in_tools(dir: &Path) -> std::ffi::OsString {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let git = r#"#!/bin/sh
case "$1" in
  clone)
    for target; do :; done
    mkdir -p "$target/.git" "$target/apps/web"
    printf '{"name":"{{PROJECT_NAME}}"}\n' > "$target/package.json"
    ;;
esac
exit 0
"#;
    let bun = "#!/bin/sh\necho 'bun: lockfile is corrupt' >&2\nexit 1\n";
    for (name, body) in [("git", git), ("bun", bun)] {
        let path = bin.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    let mut path = std::ffi::OsString::from(&bin);
    if let Some(existing) = std::env::var_os("PATH") {
        path.push(":");
        path.push(existing);
    }
    path
}

#[cfg(unix)]
#[test]
fn quiet_run_still_reports_install_failure_on_stderr() {
    let temp = TempDir::new().unwrap();
    let path = stand_in_tools(temp.path());

    monoseed(temp.path())
        .env("PATH", path)
        .args(["quiet-demo", "--minimal", "-p", "bun", "--quiet", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Dependency installation failed"))
        .stderr(predicate::str::contains("run: cd "))
        .stderr(predicate::str::contains("&& bun install"));

    let manifest = fs::read_to_string(temp.path().join("quiet-demo/package.json")).unwrap();
    assert!(manifest.contains("quiet-demo"));
}
