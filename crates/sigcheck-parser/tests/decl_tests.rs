use super::*;
use sigcheck_types::{ConversionChecker, TypeKind, method_set};

#[test]
fn test_declare_struct_types() {
    let db = TypeInterner::new();
    let ids = declare_types(
        &db,
        &[
            TypeDecl::new("a", "struct { name string }"),
            TypeDecl::new("b", "struct { name string }"),
        ],
    )
    .unwrap();

    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert_eq!(db.underlying(ids[0]), db.underlying(ids[1]));
    assert_eq!(db.kind(ids[0]), TypeKind::Struct);
    assert_eq!(db.lookup_named("b"), Some(ids[1]));
}

#[test]
fn test_forward_and_recursive_references() {
    let db = TypeInterner::new();
    let ids = declare_types(
        &db,
        &[
            TypeDecl::new("List", "struct { head *Node }"),
            TypeDecl::new("Node", "struct { value int; next *Node }"),
        ],
    )
    .unwrap();
    assert_eq!(db.kind(ids[0]), TypeKind::Struct);
    assert_eq!(db.kind(ids[1]), TypeKind::Struct);
}

#[test]
fn test_named_underlying_waits_for_its_definition() {
    let db = TypeInterner::new();
    let ids = declare_types(
        &db,
        &[
            TypeDecl::new("Celsius", "Temperature"),
            TypeDecl::new("Temperature", "float64"),
        ],
    )
    .unwrap();
    assert_eq!(db.underlying(ids[0]), TypeId::FLOAT64);
    assert_eq!(db.underlying(ids[1]), TypeId::FLOAT64);
}

#[test]
fn test_embedding_interface_may_come_first() {
    let db = TypeInterner::new();
    let ids = declare_types(
        &db,
        &[
            TypeDecl::new("ReadWriter", "interface { Reader; Write() }"),
            TypeDecl::new("Reader", "interface { Read() }"),
        ],
    )
    .unwrap();

    let shape = db.interface_shape(ids[0]).unwrap();
    let names: Vec<&str> = shape.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Read", "Write"]);
    assert!(ConversionChecker::new(&db).implements(ids[0], ids[1]));
}

#[test]
fn test_mutually_embedding_interfaces_are_rejected() {
    let db = TypeInterner::new();
    let err = declare_types(
        &db,
        &[
            TypeDecl::new("A", "interface { B }"),
            TypeDecl::new("B", "interface { A }"),
        ],
    )
    .unwrap_err();
    match err {
        DeclError::UnresolvedUnderlying { names } => assert_eq!(names, vec!["A", "B"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_declared_methods_implement_interfaces() {
    let db = TypeInterner::new();
    let ids = declare_types(
        &db,
        &[
            TypeDecl::new("Stringer", "interface { String() string }"),
            TypeDecl::new("Name", "string").with_method("String() string"),
        ],
    )
    .unwrap();

    let methods = method_set(&db, ids[1]);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name, "String");
    assert!(ConversionChecker::new(&db).implements(ids[1], ids[0]));
}

#[test]
fn test_cyclic_underlying_is_rejected() {
    let db = TypeInterner::new();
    let err = declare_types(
        &db,
        &[TypeDecl::new("A", "B"), TypeDecl::new("B", "A")],
    )
    .unwrap_err();
    match err {
        DeclError::UnresolvedUnderlying { names } => assert_eq!(names, vec!["A", "B"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_declaration() {
    let db = TypeInterner::new();
    let err = declare_types(
        &db,
        &[TypeDecl::new("T", "int"), TypeDecl::new("T", "string")],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DeclError::Type {
            source: TypeError::DuplicateName { .. },
            ..
        }
    ));

    // Redeclaring a predeclared name is also a duplicate.
    let err = declare_types(&db, &[TypeDecl::new("error", "int")]).unwrap_err();
    assert!(matches!(err, DeclError::Type { .. }));
}

#[test]
fn test_parse_errors_name_the_declaration() {
    let db = TypeInterner::new();
    let err = declare_types(&db, &[TypeDecl::new("Bad", "map[int")]).unwrap_err();
    let DeclError::Parse { name, text, .. } = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(name, "Bad");
    assert_eq!(text, "map[int");

    let err = declare_types(
        &db,
        &[TypeDecl::new("Also", "int").with_method("Missing() Nope")],
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("type Also: cannot parse `Missing() Nope`"));
}

#[test]
fn test_type_decl_deserializes_without_methods() {
    let decl: TypeDecl =
        serde_json::from_str(r#"{"name": "a", "underlying": "struct { name string }"}"#).unwrap();
    assert_eq!(decl, TypeDecl::new("a", "struct { name string }"));

    let decl: TypeDecl = serde_json::from_str(
        r#"{"name": "b", "underlying": "int", "methods": ["String() string"]}"#,
    )
    .unwrap();
    assert_eq!(decl.methods, vec!["String() string"]);
}
