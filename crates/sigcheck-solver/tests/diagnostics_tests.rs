use super::*;
use sigcheck_parser::parse_type;
use sigcheck_types::TypeInterner;

fn ty(db: &TypeInterner, text: &str) -> TypeId {
    parse_type(db, text).unwrap()
}

#[test]
fn test_fast_tracer_never_builds_the_failure() {
    let mut tracer = FastTracer;
    let mut built = false;
    let result = tracer.on_mismatch(|| {
        built = true;
        SignatureFailure::ArityMismatch {
            phase: Phase::Input,
            expected: 1,
            actual: 2,
        }
    });
    assert!(!result);
    assert!(!built);
}

#[test]
fn test_diagnostic_tracer_keeps_first_failure() {
    let mut tracer = DiagnosticTracer::new();
    assert!(!tracer.has_failure());

    let first = SignatureFailure::ArityMismatch {
        phase: Phase::Input,
        expected: 1,
        actual: 2,
    };
    let second = SignatureFailure::ArityMismatch {
        phase: Phase::Return,
        expected: 0,
        actual: 1,
    };
    assert!(!tracer.on_mismatch(|| first.clone()));
    assert!(!tracer.on_mismatch(|| second));
    assert_eq!(tracer.get_failure(), Some(&first));
    assert_eq!(tracer.take_failure(), Some(first));
    assert!(tracer.take_failure().is_none());
}

#[test]
fn test_render_arity_messages() {
    let db = TypeInterner::new();
    let input = SignatureFailure::ArityMismatch {
        phase: Phase::Input,
        expected: 2,
        actual: 1,
    };
    assert_eq!(input.render(&db), "expected function to have 2 arguments not 1");

    let output = SignatureFailure::ArityMismatch {
        phase: Phase::Return,
        expected: 2,
        actual: 1,
    };
    assert_eq!(
        output.render(&db),
        "expected function to have 2 return values not 1"
    );
}

#[test]
fn test_render_argument_messages() {
    let db = TypeInterner::new();

    let kind = ArgumentSite::input(0).fail(MismatchReason::KindMismatch {
        expected: TypeKind::Sequence,
        actual: TypeKind::Primitive,
    });
    assert_eq!(
        kind.render(&db),
        "input argument at 0: expected arg of kind sequence not primitive"
    );

    let identity = ArgumentSite::input(1).fail(MismatchReason::TypeMismatch {
        expected: TypeId::INT,
        actual: TypeId::STRING,
        slot: Slot::Value,
    });
    assert_eq!(
        identity.render(&db),
        "input argument at 1: expected arg of type int not type string"
    );

    let convert = ArgumentSite::result(0).fail(MismatchReason::NotConvertible {
        expected: TypeId::ERROR,
        actual: TypeId::BOOL,
        slot: Slot::Value,
    });
    assert_eq!(
        convert.render(&db),
        "return value at 0: expected arg convertible to type error not type bool"
    );
}

#[test]
fn test_render_map_slot_messages() {
    let db = TypeInterner::new();

    let key = ArgumentSite::input(0).fail(MismatchReason::TypeMismatch {
        expected: TypeId::INT,
        actual: TypeId::INT64,
        slot: Slot::MapKey,
    });
    assert_eq!(
        key.render(&db),
        "input argument at 0: expected map key of type int not type int64"
    );

    let elem = ArgumentSite::input(0).fail(MismatchReason::NotConvertible {
        expected: ty(&db, "interface { Name() string }"),
        actual: TypeId::STRING,
        slot: Slot::MapElement,
    });
    assert_eq!(
        elem.render(&db),
        "input argument at 0: map element: expected arg convertible to type \
         interface { Name() string } not type string"
    );
}

#[test]
fn test_render_variadic_and_not_a_function() {
    let db = TypeInterner::new();

    let variadic = ArgumentSite::input(2).fail(MismatchReason::VariadicMismatch {
        expected: ty(&db, "[]int"),
        actual: ty(&db, "[]string"),
    });
    assert_eq!(
        variadic.render(&db),
        "expected function to have arg of type []int at position 2 not type []string"
    );

    let declared = SignatureFailure::NotAFunction {
        role: SignatureRole::Declared,
        actual: TypeId::STRING,
    };
    assert_eq!(
        declared.render(&db),
        "expected a function type for the declared signature, got string"
    );
    let substitute = SignatureFailure::NotAFunction {
        role: SignatureRole::Substitute,
        actual: ty(&db, "map[string]int"),
    };
    assert_eq!(
        substitute.render(&db),
        "expected a function type for the substitute signature, got map[string]int"
    );
}

#[test]
fn test_failure_accessors() {
    let failure = ArgumentSite::result(3).fail(MismatchReason::TypeMismatch {
        expected: TypeId::INT,
        actual: TypeId::STRING,
        slot: Slot::Value,
    });
    assert_eq!(failure.kind(), FailureKind::TypeMismatch);
    assert_eq!(failure.phase(), Some(Phase::Return));
    assert_eq!(failure.position(), Some(3));

    let not_fn = SignatureFailure::NotAFunction {
        role: SignatureRole::Declared,
        actual: TypeId::INT,
    };
    assert_eq!(not_fn.kind(), FailureKind::NotAFunction);
    assert_eq!(not_fn.phase(), None);
    assert_eq!(not_fn.position(), None);
    assert_eq!(FailureKind::VariadicMismatch.to_string(), "variadic_mismatch");
}

#[test]
fn test_signature_error_carries_failure_and_message() {
    let db = TypeInterner::new();
    let failure = SignatureFailure::ArityMismatch {
        phase: Phase::Input,
        expected: 1,
        actual: 0,
    };
    let err = SignatureError::new(&db, failure.clone());
    assert_eq!(err.to_string(), "expected function to have 1 arguments not 0");
    assert_eq!(err.message(), err.to_string());
    assert_eq!(err.kind(), FailureKind::ArityMismatch);
    assert_eq!(err.failure(), &failure);
    assert_eq!(err.into_failure(), failure);
}
