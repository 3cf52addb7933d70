// tests/config_test.rs
use git_release::config::{load_config, Config, CONFIG_FILE};
use git_release::domain::{BranchEntry, BranchSpec};
use git_release::ReleaseError;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
tag_format = "release-{version}"
branches = [
    "main",
    { name = "2.x", channel = "2.x" },
    { name = "rc", prerelease = "rc" },
]
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.tag_format, "release-{version}");
    assert_eq!(config.branch_names(), vec!["main", "2.x", "rc"]);
    assert_eq!(
        config.branches[2],
        BranchEntry::from(BranchSpec::new("rc").with_prerelease("rc"))
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = load_config(Some(dir.path().join("missing.toml").as_path()));
    assert!(matches!(result, Err(ReleaseError::Io(_))));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"tag_format = ").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path()));
    assert!(matches!(result, Err(ReleaseError::Toml(_))));
}

#[test]
fn test_invalid_entries_survive_loading() {
    let config = Config::from_toml(r#"branches = [1, { name = 2 }, "master"]"#).unwrap();
    assert_eq!(config.branches.len(), 3);
    assert_eq!(config.branch_names(), vec!["master"]);
}

#[test]
#[serial]
fn test_config_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        "branches = [\"trunk\"]\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    let config = config.unwrap();
    assert_eq!(config.branch_names(), vec!["trunk"]);
    assert_eq!(config.tag_format, "v{version}");
}

#[test]
#[serial]
fn test_explicit_path_wins_over_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "branches = [\"trunk\"]\n").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "branches = [\"main\"]\n").unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let config = load_config(Some(explicit.as_path()));
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.unwrap().branch_names(), vec!["main"]);
}
