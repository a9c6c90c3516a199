use super::*;
use crate::intern::TypeInterner;
use crate::types::{Field, FunctionShape, MethodSig};

#[test]
fn test_format_basic_and_composite() {
    let db = TypeInterner::new();
    assert_eq!(type_to_string(&db, TypeId::INT), "int");
    assert_eq!(type_to_string(&db, db.slice(TypeId::STRING)), "[]string");
    assert_eq!(
        type_to_string(&db, db.map(TypeId::EMPTY_INTERFACE, TypeId::INT)),
        "map[interface {}]int"
    );
    assert_eq!(type_to_string(&db, db.pointer(TypeId::BOOL)), "*bool");
    assert_eq!(type_to_string(&db, TypeId::ERROR), "error");
}

#[test]
fn test_format_functions() {
    let db = TypeInterner::new();
    let f = db.function(FunctionShape::new(vec![TypeId::INT], vec![TypeId::BOOL], false));
    assert_eq!(type_to_string(&db, f), "func(int) bool");

    let v = db.variadic_function(
        vec![TypeId::STRING],
        TypeId::EMPTY_INTERFACE,
        vec![TypeId::BOOL, TypeId::ERROR],
    );
    assert_eq!(
        type_to_string(&db, v),
        "func(string, ...interface {}) (bool, error)"
    );

    let unit = db.function(FunctionShape::new(Vec::new(), Vec::new(), false));
    assert_eq!(type_to_string(&db, unit), "func()");
}

#[test]
fn test_format_struct_and_interface() {
    let db = TypeInterner::new();
    let a = db
        .named("a", db.struct_type(Vec::new()), Vec::new())
        .unwrap();
    let s = db.struct_type(vec![Field::embedded("a", a), Field::new("foo", TypeId::STRING)]);
    assert_eq!(type_to_string(&db, s), "struct { a; foo string }");
    assert_eq!(type_to_string(&db, db.struct_type(Vec::new())), "struct {}");

    let getter = db.function(FunctionShape::new(Vec::new(), vec![TypeId::STRING], false));
    let iface = db
        .interface(vec![MethodSig::new("Name", getter)])
        .unwrap();
    assert_eq!(type_to_string(&db, iface), "interface { Name() string }");
}

#[test]
fn test_format_depth_limit() {
    let db = TypeInterner::new();
    let mut ty = TypeId::INT;
    for _ in 0..5 {
        ty = db.slice(ty);
    }
    let formatted = TypeFormatter::new(&db).with_max_depth(2).format(ty);
    assert_eq!(formatted, "[][][]...");
}
