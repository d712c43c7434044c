//! Tests for configuration handling.

use parking_lot::RwLock;
use robject_core::{CollisionPolicy, Definition, InitializerRegistry, MemberMap, Value};
use robject_utils::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_new() {
    let config = Config::new();
    assert_eq!(config.factory.collision_policy, CollisionPolicy::Skip);
    assert!(config.session.path.is_none());
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("robject.toml");

    let mut config = Config::new();
    config.factory.collision_policy = CollisionPolicy::Reject;
    config.session.path = Some(PathBuf::from("session.dat"));
    config.save(&config_path).unwrap();

    let loaded = Config::load(&config_path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_saved_form() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("robject.toml");

    Config::new().save(&config_path).unwrap();

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("[factory]"));
    assert!(contents.contains("collision_policy = \"skip\""));
    assert!(!contents.contains("path"));
}

#[test]
fn test_config_find_from_subdirectory() {
    let temp_dir = TempDir::new().unwrap();
    let project_dir = temp_dir.path();

    let mut config = Config::new();
    config.factory.collision_policy = CollisionPolicy::Reject;
    config.save(project_dir.join("robject.toml")).unwrap();

    let sub_dir = project_dir.join("src").join("types");
    fs::create_dir_all(&sub_dir).unwrap();

    let (found_config, found_dir) = Config::find_from(&sub_dir).unwrap();
    assert_eq!(found_config.factory.collision_policy, CollisionPolicy::Reject);
    assert_eq!(found_dir, project_dir);
}

#[test]
fn test_config_load_reports_parse_errors() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("robject.toml");
    fs::write(&config_path, "[factory\n").unwrap();

    let err = Config::load(&config_path).unwrap_err();
    assert_eq!(err.to_string(), "Failed to parse robject.toml");
}

#[test]
fn test_configured_factory_uses_policy() {
    let registry = RwLock::new(InitializerRegistry::with_core());
    let mut trap = MemberMap::new();
    trap.insert("mixins".to_string(), Value::Null);

    let mut config = Config::new();
    assert!(
        config
            .factory(&registry)
            .define(Definition::new().mixin(trap.clone()))
            .is_ok()
    );

    config.factory.collision_policy = CollisionPolicy::Reject;
    assert!(
        config
            .factory(&registry)
            .define(Definition::new().mixin(trap))
            .is_err()
    );
}
