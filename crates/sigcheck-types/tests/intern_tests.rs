use super::*;

#[test]
fn test_predeclared_types_registered() {
    let db = TypeInterner::new();

    for (idx, kind) in BasicKind::ALL.iter().enumerate() {
        assert_eq!(db.basic(*kind), TypeId(idx as u32));
        assert_eq!(db.kind(TypeId(idx as u32)), TypeKind::Primitive);
    }
    assert_eq!(db.kind(TypeId::EMPTY_INTERFACE), TypeKind::Interface);
    assert_eq!(db.kind(TypeId::ERROR), TypeKind::Interface);
    assert!(db.is_named(TypeId::ERROR));
    assert_eq!(db.lookup_named("error"), Some(TypeId::ERROR));
    assert!(TypeId::ERROR.is_predeclared());
    assert!(!TypeId(TypeId::FIRST_USER).is_predeclared());
}

#[test]
fn test_structural_deduplication() {
    let db = TypeInterner::new();

    let a = db.slice(TypeId::INT);
    let b = db.slice(TypeId::INT);
    let c = db.slice(TypeId::STRING);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let m1 = db.map(TypeId::STRING, TypeId::INT);
    let m2 = db.map(TypeId::STRING, TypeId::INT);
    assert_eq!(m1, m2);
}

#[test]
fn test_named_types_are_distinct_from_their_underlying() {
    let db = TypeInterner::new();

    let body = db.struct_type(vec![Field::new("name", TypeId::STRING)]);
    let a = db.named("a", body, Vec::new()).unwrap();
    let same_body = db.struct_type(vec![Field::new("name", TypeId::STRING)]);

    assert_eq!(body, same_body);
    assert_ne!(a, body);
    assert_eq!(db.underlying(a), body);
    assert_eq!(db.kind(a), TypeKind::Struct);
    assert_eq!(db.type_name(a).as_deref(), Some("a"));
}

#[test]
fn test_element_and_key_queries() {
    let db = TypeInterner::new();

    let slice = db.slice(TypeId::BOOL);
    let map = db.map(TypeId::EMPTY_INTERFACE, TypeId::INT);
    let ptr = db.pointer(TypeId::STRING);

    assert_eq!(db.element_type(slice), Some(TypeId::BOOL));
    assert_eq!(db.key_type(slice), None);
    assert_eq!(db.element_type(map), Some(TypeId::INT));
    assert_eq!(db.key_type(map), Some(TypeId::EMPTY_INTERFACE));
    assert_eq!(db.element_type(ptr), Some(TypeId::STRING));
    assert_eq!(db.element_type(TypeId::INT), None);
}

#[test]
fn test_named_slice_exposes_element_type() {
    let db = TypeInterner::new();

    let ints = db.named("Ints", db.slice(TypeId::INT), Vec::new()).unwrap();
    assert_eq!(db.kind(ints), TypeKind::Sequence);
    assert_eq!(db.element_type(ints), Some(TypeId::INT));
}

#[test]
fn test_variadic_function_stores_slice() {
    let db = TypeInterner::new();

    let f = db.variadic_function(vec![TypeId::STRING], TypeId::INT, vec![TypeId::BOOL]);
    let shape = db.function_shape(f).unwrap();
    assert!(shape.variadic);
    assert_eq!(shape.param_count(), 2);
    assert_eq!(shape.variadic_param(), Some(db.slice(TypeId::INT)));
    assert_eq!(db.kind(f), TypeKind::Function);
}

#[test]
fn test_variadic_flag_dropped_without_params() {
    let shape = FunctionShape::new(Vec::new(), vec![TypeId::BOOL], true);
    assert!(!shape.variadic);
    assert_eq!(shape.variadic_param(), None);
}

#[test]
fn test_interface_sorts_and_dedups_methods() {
    let db = TypeInterner::new();

    let name_sig = db.function(FunctionShape::new(Vec::new(), vec![TypeId::STRING], false));
    let iface = db
        .interface(vec![
            MethodSig::new("Name", name_sig),
            MethodSig::new("Foo", name_sig),
            MethodSig::new("Name", name_sig),
        ])
        .unwrap();
    let shape = db.interface_shape(iface).unwrap();
    let names: Vec<&str> = shape.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Foo", "Name"]);

    let same = db
        .interface(vec![
            MethodSig::new("Foo", name_sig),
            MethodSig::new("Name", name_sig),
        ])
        .unwrap();
    assert_eq!(iface, same);
}

#[test]
fn test_interface_rejects_conflicting_methods() {
    let db = TypeInterner::new();

    let a = db.function(FunctionShape::new(Vec::new(), vec![TypeId::STRING], false));
    let b = db.function(FunctionShape::new(Vec::new(), vec![TypeId::INT], false));
    assert!(matches!(
        db.interface(vec![MethodSig::new("Name", a), MethodSig::new("Name", b)]),
        Err(TypeError::DuplicateMethod { .. })
    ));
    assert!(matches!(
        db.interface(vec![MethodSig::new("Name", TypeId::INT)]),
        Err(TypeError::MethodNotFunction { .. })
    ));
}

#[test]
fn test_named_from_named_uses_underlying() {
    let db = TypeInterner::new();

    let temperature = db.named("Temperature", TypeId::FLOAT64, Vec::new()).unwrap();
    let celsius = db.named("Celsius", temperature, Vec::new()).unwrap();
    assert_eq!(db.underlying(celsius), TypeId::FLOAT64);
}

#[test]
fn test_pending_named_type() {
    let db = TypeInterner::new();

    let pending = db.declare_named("Later").unwrap();
    assert_eq!(db.kind(pending), TypeKind::Invalid);
    assert_eq!(db.underlying(pending), pending);

    let other = db.declare_named("Other").unwrap();
    assert!(matches!(
        db.define_named(other, pending, Vec::new()),
        Err(TypeError::UndefinedUnderlying { .. })
    ));
    assert!(matches!(
        db.define_named(TypeId::INT, TypeId::INT, Vec::new()),
        Err(TypeError::NotNamed { .. })
    ));
}

#[test]
fn test_recursive_named_type() {
    let db = TypeInterner::new();

    let node = db.declare_named("Node").unwrap();
    let body = db.struct_type(vec![Field::new("next", db.pointer(node))]);
    db.define_named(node, body, Vec::new()).unwrap();

    assert_eq!(db.kind(node), TypeKind::Struct);
    assert_eq!(db.definitions().undefined_names(), Vec::<String>::new());
}

#[test]
fn test_concurrent_interning_is_consistent() {
    use rayon::prelude::*;

    let db = TypeInterner::new();
    let ids: Vec<TypeId> = (0..64)
        .into_par_iter()
        .map(|i| {
            let elem = if i % 2 == 0 { TypeId::INT } else { TypeId::STRING };
            db.map(TypeId::STRING, db.slice(elem))
        })
        .collect();

    let ints = db.map(TypeId::STRING, db.slice(TypeId::INT));
    let strings = db.map(TypeId::STRING, db.slice(TypeId::STRING));
    for (i, id) in ids.iter().enumerate() {
        let expected = if i % 2 == 0 { ints } else { strings };
        assert_eq!(*id, expected);
    }
}
