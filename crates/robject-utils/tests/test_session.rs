//! Tests for file-backed sessions.

use robject_utils::{Config, FileBackend, Session};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_file_session_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session");

    let mut first = Session::new(FileBackend::new(&path));
    assert_eq!(first.get("user").unwrap(), "");
    first.set("user", "Adam H.").unwrap().set("lang", "cs").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "user=Adam%20H.|lang=cs"
    );

    let mut second = Session::new(FileBackend::new(&path));
    assert_eq!(second.get("user").unwrap(), "Adam H.");
    assert_eq!(second.get("lang").unwrap(), "cs");
}

#[test]
fn test_unchanged_value_does_not_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session");
    fs::write(&path, "k=v").unwrap();

    let mut session = Session::new(FileBackend::new(&path));
    session.set("k", "v").unwrap();
    fs::write(&path, "k=external").unwrap();
    session.set("k", "v").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "k=external");
}

#[test]
fn test_config_opens_file_session_relative_to_root() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::new();
    config.session.path = Some(PathBuf::from("state"));

    let mut session = config.open_session(temp_dir.path());
    session.set("a", "1").unwrap();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("state")).unwrap(),
        "a=1"
    );
}

#[test]
fn test_config_without_path_uses_memory() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = Config::new().open_session(temp_dir.path());
    session.set("a", "1").unwrap();
    assert_eq!(session.get("a").unwrap(), "1");
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
