//! Signature validation benchmarks.
//!
//! Measures parsing of signature text and validation of parsed signatures,
//! with and without diagnostic collection.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sigcheck::{
    TypeDecl, TypeInterner, declare_types, is_signature_compatible, parse_type,
    validate_signatures,
};

const CASES: &[(&str, &str, &str)] = &[
    ("identical", "func(int) bool", "func(int) bool"),
    ("interface_widening", "func(interface{}) bool", "func(int) bool"),
    ("variadic", "func(...interface{}) bool", "func([]int) bool"),
    (
        "mapping",
        "func(map[interface{}]interface{}) bool",
        "func(map[string]int) bool",
    ),
    (
        "method_interface",
        "func(Stringer, ...Stringer) (Stringer, error)",
        "func(Celsius, []Stringer) (Celsius, error)",
    ),
    (
        "wide",
        "func(int, string, []byte, map[string]int, *int, error, bool, float64) (int, error)",
        "func(int, string, []byte, map[string]int, *int, error, bool, float64) (int, error)",
    ),
    ("rejected", "func(int) bool", "func(string) bool"),
];

fn interner() -> TypeInterner {
    let db = TypeInterner::new();
    let decls = [
        TypeDecl::new("Celsius", "float64").with_method("String() string"),
        TypeDecl::new("Stringer", "interface { String() string }"),
    ];
    if let Err(err) = declare_types(&db, &decls) {
        panic!("bench declarations: {err}");
    }
    db
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_signature");

    for &(name, declared, _) in CASES {
        group.bench_with_input(BenchmarkId::new("parse", name), declared, |b, text| {
            let db = interner();
            b.iter(|| black_box(parse_type(&db, text).ok()))
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_signature");
    let db = interner();

    for &(name, declared, substitute) in CASES {
        let (Ok(declared), Ok(substitute)) = (parse_type(&db, declared), parse_type(&db, substitute))
        else {
            panic!("bench case {name} does not parse");
        };

        group.bench_function(BenchmarkId::new("diagnostic", name), |b| {
            b.iter(|| black_box(validate_signatures(&db, declared, substitute).is_ok()))
        });
        group.bench_function(BenchmarkId::new("fast", name), |b| {
            b.iter(|| black_box(is_signature_compatible(&db, declared, substitute)))
        });
    }

    group.finish();
}

criterion_group!(validate_benches, bench_parse, bench_validate);
criterion_main!(validate_benches);
