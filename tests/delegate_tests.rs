use sigcheck::solver::Phase;
use sigcheck::{Action, Call, FailureKind, SignatureFailure, TypeDecl, TypeInterner, TypeId};
use sigcheck::{declare_types, parse_type};

fn ty(db: &TypeInterner, text: &str) -> TypeId {
    parse_type(db, text).unwrap_or_else(|err| panic!("failed to parse {text:?}: {err}"))
}

#[test]
fn test_compatible_delegate_is_registered() {
    let db = TypeInterner::new();
    let method = ty(&db, "func(...interface{}) bool");
    let delegate = ty(&db, "func([]int) bool");

    let mut call = Call::new(&db, "Logger", "Printf", method);
    call.run_with(delegate).unwrap();

    assert_eq!(call.actions(), &[Action::Delegate(delegate)]);
}

#[test]
fn test_rejected_delegate_is_not_registered() {
    let db = TypeInterner::new();
    let method = ty(&db, "func(int) bool");
    let mut call = Call::new(&db, "Store", "Has", method);

    let err = call.run_with(ty(&db, "func(string) bool")).unwrap_err();
    assert!(call.actions().is_empty());
    assert_eq!(err.signature_error().kind(), FailureKind::TypeMismatch);

    let message = err.to_string();
    assert!(message.starts_with("Store.Has: "), "{message}");
}

#[test]
fn test_registration_chains_in_order() {
    let db = TypeInterner::new();
    let method = ty(&db, "func(map[interface{}]int) error");
    let first = ty(&db, "func(map[string]int) error");
    let second = ty(&db, "func(map[int]int) error");

    let mut call = Call::new(&db, "Cache", "Load", method);
    call.run_with(first).unwrap().run_with(second).unwrap();

    assert_eq!(
        call.actions(),
        &[Action::Delegate(first), Action::Delegate(second)]
    );
}

#[test]
fn test_failure_is_recoverable_from_error() {
    let db = TypeInterner::new();
    let mut call = Call::new(&db, "Conn", "Close", ty(&db, "func() error"));

    let err = call.run_with(ty(&db, "func() (bool, error)")).unwrap_err();
    assert_eq!(
        err.signature_error().failure(),
        &SignatureFailure::ArityMismatch {
            phase: Phase::Return,
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_delegate_using_declared_types() {
    let db = TypeInterner::new();
    declare_types(
        &db,
        &[
            TypeDecl::new("Key", "string"),
            TypeDecl::new("Stringer", "interface { String() string }"),
            TypeDecl::new("Name", "string").with_method("String() string"),
        ],
    )
    .unwrap();

    let mut call = Call::new(&db, "Index", "Put", ty(&db, "func(Key, Stringer) error"));
    assert!(call.run_with(ty(&db, "func(Key, Name) error")).is_ok());
    assert!(call.run_with(ty(&db, "func(string, Name) error")).is_err());
    assert_eq!(call.actions().len(), 1);
}

#[test]
fn test_call_display() {
    let db = TypeInterner::new();
    let call = Call::new(&db, "Logger", "Printf", ty(&db, "func(string, ...interface{})"));
    assert_eq!(call.receiver(), "Logger");
    assert_eq!(call.method(), "Printf");
    assert_eq!(
        call.to_string(),
        "Logger.Printf(func(string, ...interface {}))"
    );
}
