//! Tests for namespaces of composed types.

use robject_core::{Definition, Value, define};
use robject_utils::{Entry, Namespace, NamespaceError};

#[test]
fn test_publish_type_in_namespace() {
    let user = define(Definition::new().member("kind", "user"));
    let mut root = Namespace::new();
    root.publish("app.models.User", &user).unwrap();

    let found = root.value("app.models.User").and_then(Value::as_type).unwrap();
    assert_eq!(found, &user);
    assert!(matches!(root.lookup("app.models"), Some(Entry::Namespace(_))));
    assert!(root.value("app.models").is_none());
    assert!(root.lookup("app.views.User").is_none());
}

#[test]
fn test_publish_under_value_conflicts() {
    let mut root = Namespace::new();
    root.publish("app.name", "demo").unwrap();

    let err = root.publish("app.name.User", Value::Null).unwrap_err();
    assert_eq!(err.to_string(), "`app.name` is bound to a text, not a namespace");
    assert!(matches!(err, NamespaceError::Conflict { .. }));
}
